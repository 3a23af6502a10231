//! Typed base requests and the order in which they populate a catalogue.
//!
//! A stop may declare road distances to stops defined later, and a bus may
//! list stops defined after it, so requests are applied in three passes:
//! every stop, then every road distance, then every bus.

use std::collections::BTreeMap;

use geo::Point;
use tracing::debug;

use crate::catalogue::TransportCatalogue;
use crate::models::types::Result;

/// A stop with its coordinates and road distances to its neighbours
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct StopDescription {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Meters from this stop to the named stop
    #[cfg_attr(feature = "serde", serde(default))]
    pub road_distances: BTreeMap<String, f64>,
}

/// A bus and the stops it calls at
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct BusDescription {
    pub name: String,
    pub stops: Vec<String>,
    pub is_roundtrip: bool,
}

/// One entry of the `base_requests` array
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum BaseRequest {
    Stop(StopDescription),
    Bus(BusDescription),
}

impl StopDescription {
    pub fn location(&self) -> Point {
        Point::new(self.longitude, self.latitude)
    }
}

/// Apply base requests to `catalogue`.
///
/// Stops the first error. Entries applied before the failing one stay in the
/// catalogue, so callers that need all-or-nothing should load into a fresh
/// catalogue and discard it on error.
pub fn load_base_requests<'a, I>(catalogue: &mut TransportCatalogue, requests: I) -> Result<()>
where
    I: IntoIterator<Item = &'a BaseRequest>,
{
    let mut stops = Vec::new();
    let mut buses = Vec::new();
    for request in requests {
        match request {
            BaseRequest::Stop(stop) => stops.push(stop),
            BaseRequest::Bus(bus) => buses.push(bus),
        }
    }

    for stop in &stops {
        catalogue.add_stop(stop.name.as_str(), stop.location())?;
    }

    for stop in &stops {
        for (to, &meters) in &stop.road_distances {
            catalogue.add_distance(&stop.name, to, meters)?;
        }
    }

    for bus in &buses {
        catalogue.add_bus(bus.name.as_str(), &bus.stops, bus.is_roundtrip)?;
    }

    debug!(stops = stops.len(), buses = buses.len(), "loaded base requests");
    Ok(())
}
