//! In-memory catalogue of stops, buses, and road distances.
//!
//! Stops and buses live in append-only vectors and are addressed by
//! [`StopId`]/[`BusId`] handles, so a handle issued once stays valid for the
//! lifetime of the catalogue. Names are indexed in hash maps for O(1) lookup,
//! and stop locations in an R-tree for spatial queries.

use std::collections::{BTreeSet, HashMap};

use geo::Point;
use rstar::{PointDistance, RTree};
use tracing::{debug, warn};

use crate::identifiers::*;
use crate::models::{traits::*, types::*};
use crate::spatial::index::StopNode;
use crate::spatial::queries::{haversine_distance, search_radius_degrees};

/// Mutable store filled once by the loader and read by everything else.
#[derive(Clone, Debug, Default)]
pub struct TransportCatalogue {
    // Core data
    stops: Vec<Stop>,
    buses: Vec<Bus>,

    // Lookup maps
    stop_map: HashMap<StopName, StopId>,
    bus_map: HashMap<BusName, BusId>,

    // Road distances keyed by ordered (from, to) pair
    distances: HashMap<(StopId, StopId), f64>,

    // Spatial index
    stop_tree: RTree<StopNode>,
}

impl TransportCatalogue {
    /// Create a new empty catalogue
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a stop.
    ///
    /// Names are unique: adding a name twice is rejected with
    /// [`TransitError::DuplicateStop`] and leaves the catalogue untouched.
    pub fn add_stop(&mut self, name: impl Into<StopName>, location: Point) -> Result<StopId> {
        let name = name.into();
        if self.stop_map.contains_key(&name) {
            warn!(stop = %name, "rejecting duplicate stop");
            return Err(TransitError::DuplicateStop(name));
        }
        if !location.x().is_finite() || !location.y().is_finite() {
            return Err(TransitError::InvalidData(format!(
                "stop {name} has non-finite coordinates"
            )));
        }

        let id = StopId(self.stops.len());
        debug!(stop = %name, %id, lat = location.y(), lng = location.x(), "adding stop");

        self.stop_map.insert(name.clone(), id);
        self.stop_tree.insert(StopNode::new(location, id));
        self.stops.push(Stop {
            id,
            name,
            location,
            buses: BTreeSet::new(),
        });
        Ok(id)
    }

    /// Register a bus running over the named stops.
    ///
    /// Every stop must already exist; the first unknown one is reported as
    /// [`TransitError::StopNotFound`]. An empty route and a repeated bus name
    /// are rejected too. On error the catalogue is left unchanged.
    pub fn add_bus<I>(&mut self, name: impl Into<BusName>, stops: I, is_roundtrip: bool) -> Result<BusId>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let name = name.into();
        if self.bus_map.contains_key(&name) {
            warn!(bus = %name, "rejecting duplicate bus");
            return Err(TransitError::DuplicateBus(name));
        }

        let route = stops
            .into_iter()
            .map(|stop| {
                let stop = stop.as_ref();
                self.stop_map
                    .get(stop)
                    .copied()
                    .ok_or_else(|| TransitError::StopNotFound(StopName::new(stop)))
            })
            .collect::<Result<Vec<_>>>()?;

        if route.is_empty() {
            return Err(TransitError::InvalidData(format!("bus {name} has no stops")));
        }

        let id = BusId(self.buses.len());
        debug!(bus = %name, %id, stops = route.len(), is_roundtrip, "adding bus");

        for stop in &route {
            self.stops[stop.0].buses.insert(id);
        }
        self.bus_map.insert(name.clone(), id);
        self.buses.push(Bus {
            id,
            name,
            stops: route,
            is_roundtrip,
        });
        Ok(id)
    }

    /// Record the road distance from one named stop to another.
    ///
    /// Overwrites any previous value for the same ordered pair; the opposite
    /// direction is stored separately.
    pub fn add_distance(&mut self, from: &str, to: &str, meters: f64) -> Result<()> {
        let from = self.resolve_stop(from)?;
        let to = self.resolve_stop(to)?;
        self.set_distance(from, to, meters)
    }

    /// Record a road distance between two stop handles
    pub fn set_distance(&mut self, from: StopId, to: StopId, meters: f64) -> Result<()> {
        if !meters.is_finite() || meters < 0.0 {
            return Err(TransitError::InvalidData(format!(
                "road distance must be a non-negative number of meters, got {meters}"
            )));
        }
        if from.0 >= self.stops.len() || to.0 >= self.stops.len() {
            return Err(TransitError::InvalidData(format!(
                "distance references unknown stop handle {from} or {to}"
            )));
        }
        self.distances.insert((from, to), meters);
        Ok(())
    }

    /// Road distance between two named stops, see [`TransitDirectory::distance`]
    pub fn distance_between(&self, from: &str, to: &str) -> Option<f64> {
        let from = *self.stop_map.get(from)?;
        let to = *self.stop_map.get(to)?;
        self.distance(from, to)
    }

    fn resolve_stop(&self, name: &str) -> Result<StopId> {
        self.stop_map
            .get(name)
            .copied()
            .ok_or_else(|| TransitError::StopNotFound(StopName::new(name)))
    }
}

impl TransitDirectory for TransportCatalogue {
    fn stop(&self, id: StopId) -> Option<&Stop> {
        self.stops.get(id.0)
    }

    fn bus(&self, id: BusId) -> Option<&Bus> {
        self.buses.get(id.0)
    }

    fn find_stop(&self, name: &str) -> Option<&Stop> {
        self.stop_map.get(name).and_then(|&id| self.stop(id))
    }

    fn find_bus(&self, name: &str) -> Option<&Bus> {
        self.bus_map.get(name).and_then(|&id| self.bus(id))
    }

    fn distance(&self, from: StopId, to: StopId) -> Option<f64> {
        self.distances
            .get(&(from, to))
            .or_else(|| self.distances.get(&(to, from)))
            .copied()
    }

    fn stops(&self) -> &[Stop] {
        &self.stops
    }

    fn buses(&self) -> &[Bus] {
        &self.buses
    }

    fn stops_near(&self, point: Point, radius_m: f64) -> Vec<&Stop> {
        // Validate radius is positive
        if radius_m <= 0.0 || !radius_m.is_finite() {
            return Vec::new();
        }

        let radius_deg = search_radius_degrees(radius_m, point.y());
        self.stop_tree
            .locate_within_distance([point.x(), point.y()], radius_deg * radius_deg)
            .filter_map(|node| self.stop(node.stop))
            .filter(|stop| haversine_distance(point, stop.location) <= radius_m)
            .collect()
    }

    fn nearest_stops(&self, point: Point, n: usize) -> Vec<&Stop> {
        if n == 0 {
            return Vec::new();
        }

        let query = [point.x(), point.y()];
        // Kept sorted by geodesic distance, at most `n` long
        let mut best: Vec<(f64, &Stop)> = Vec::with_capacity(n.min(self.stops.len()));

        // Degree-space order can disagree with geodesic order away from the
        // equator, so keep pulling until the tree can no longer beat the n-th best
        for node in self.stop_tree.nearest_neighbor_iter(&query) {
            if let Some(&(worst, _)) = best.get(n - 1) {
                let cutoff = search_radius_degrees(worst, point.y());
                if node.distance_2(&query) > cutoff * cutoff {
                    break;
                }
            }
            let Some(stop) = self.stop(node.stop) else {
                continue;
            };

            let meters = haversine_distance(point, stop.location);
            let at = best.partition_point(|(d, _)| *d <= meters);
            if at < n {
                best.insert(at, (meters, stop));
                best.truncate(n);
            }
        }

        best.into_iter().map(|(_, stop)| stop).collect()
    }
}
