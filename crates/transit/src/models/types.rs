//! Core data types for catalogue entities.

use std::collections::BTreeSet;

use geo::Point;

use crate::identifiers::*;

// ============================================================================
// Entities
// ============================================================================

/// A named stop with its location and the buses that call at it.
///
/// `location` follows the `geo` convention: `x` is longitude, `y` is latitude.
#[derive(Clone, Debug)]
pub struct Stop {
    pub(crate) id: StopId,
    pub(crate) name: StopName,
    pub(crate) location: Point,
    pub(crate) buses: BTreeSet<BusId>,
}

impl Stop {
    pub fn id(&self) -> StopId {
        self.id
    }

    pub fn name(&self) -> &StopName {
        &self.name
    }

    pub fn location(&self) -> Point {
        self.location
    }

    pub fn latitude(&self) -> f64 {
        self.location.y()
    }

    pub fn longitude(&self) -> f64 {
        self.location.x()
    }

    /// Handles of every bus whose route passes through this stop
    pub fn buses(&self) -> &BTreeSet<BusId> {
        &self.buses
    }
}

/// A bus line running over an ordered sequence of stops.
#[derive(Clone, Debug)]
pub struct Bus {
    pub(crate) id: BusId,
    pub(crate) name: BusName,
    pub(crate) stops: Vec<StopId>,
    pub(crate) is_roundtrip: bool,
}

impl Bus {
    pub fn id(&self) -> BusId {
        self.id
    }

    pub fn name(&self) -> &BusName {
        &self.name
    }

    /// Stops as they were declared, without the return leg
    pub fn stops(&self) -> &[StopId] {
        &self.stops
    }

    pub fn is_roundtrip(&self) -> bool {
        self.is_roundtrip
    }

    /// The sequence of stops the bus actually visits.
    ///
    /// A round-trip bus visits its declared stops as-is. Any other bus runs
    /// out and back: `[A, B, C]` becomes `[A, B, C, B, A]`.
    pub fn effective_route(&self) -> Vec<StopId> {
        let mut route = self.stops.clone();
        if !self.is_roundtrip {
            route.extend(self.stops.iter().rev().skip(1));
        }
        route
    }
}

/// Aggregate statistics for a single bus
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BusStat {
    pub name: BusName,
    /// Stops on the effective route, repeats included
    pub stop_count: usize,
    pub unique_stop_count: usize,
    /// Road length in meters
    pub route_length: f64,
    /// Great-circle length in meters
    pub geo_length: f64,
    /// `route_length / geo_length`, or `1.0` when `geo_length` is zero
    pub curvature: f64,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TransitError {
    #[error("Stop not found: {0}")]
    StopNotFound(StopName),

    #[error("Stop already exists: {0}")]
    DuplicateStop(StopName),

    #[error("Bus already exists: {0}")]
    DuplicateBus(BusName),

    #[error("No road distance recorded between {from} and {to}")]
    UnknownDistance { from: StopName, to: StopName },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Invalid routing settings: {0}")]
    InvalidSettings(String),
}

pub type Result<T> = std::result::Result<T, TransitError>;
