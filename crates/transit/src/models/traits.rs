//! Read-only view of a populated catalogue.
//!
//! Downstream consumers (statistics, graph construction, presentation) only
//! need lookups and iteration, so they are written against this trait rather
//! than the concrete store.

use std::collections::BTreeSet;

use geo::Point;

use crate::identifiers::*;
use crate::models::types::*;

pub trait TransitDirectory: Send + Sync {
    // ---- Lookups ----
    fn stop(&self, id: StopId) -> Option<&Stop>;
    fn bus(&self, id: BusId) -> Option<&Bus>;
    fn find_stop(&self, name: &str) -> Option<&Stop>;
    fn find_bus(&self, name: &str) -> Option<&Bus>;

    /// Road distance in meters from `from` to `to`.
    ///
    /// Falls back to the opposite direction when only that one is recorded.
    /// `None` means neither direction is known, which is different from a
    /// recorded distance of zero.
    fn distance(&self, from: StopId, to: StopId) -> Option<f64>;

    // ---- Collections ----

    /// All stops in insertion order
    fn stops(&self) -> &[Stop];

    /// All buses in insertion order
    fn buses(&self) -> &[Bus];

    fn stop_count(&self) -> usize {
        self.stops().len()
    }

    fn bus_count(&self) -> usize {
        self.buses().len()
    }

    /// Names of the buses calling at the named stop.
    ///
    /// `None` for an unknown stop; an empty set for a known stop no bus serves.
    fn buses_by_stop(&self, name: &str) -> Option<BTreeSet<BusName>> {
        let stop = self.find_stop(name)?;
        Some(
            stop.buses()
                .iter()
                .filter_map(|&id| self.bus(id))
                .map(|bus| bus.name().clone())
                .collect(),
        )
    }

    // ---- Spatial queries ----

    /// Stops within `radius_m` meters of `point`
    fn stops_near(&self, point: Point, radius_m: f64) -> Vec<&Stop>;

    /// The `n` stops closest to `point`, nearest first
    fn nearest_stops(&self, point: Point, n: usize) -> Vec<&Stop>;
}
