//! Network-wide routing parameters.

use crate::models::types::{Result, TransitError};

const METERS_PER_KILOMETER: f64 = 1000.0;
const MINUTES_PER_HOUR: f64 = 60.0;

/// Constants the router uses to turn the catalogue into travel times.
///
/// With the `serde` feature this deserializes from
/// `{"bus_wait_time": 6, "bus_velocity": 40}`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawRoutingSettings"))]
pub struct RoutingSettings {
    /// Minutes spent waiting at any stop before boarding
    #[cfg_attr(feature = "serde", serde(rename = "bus_wait_time"))]
    wait_time: f64,
    /// Bus speed in km/h
    #[cfg_attr(feature = "serde", serde(rename = "bus_velocity"))]
    velocity: f64,
}

impl RoutingSettings {
    /// Validates and builds settings.
    ///
    /// `wait_time` must be finite and non-negative, `velocity` finite and
    /// strictly positive; anything else would break shortest-path search.
    pub fn new(wait_time: f64, velocity: f64) -> Result<Self> {
        if !wait_time.is_finite() || wait_time < 0.0 {
            return Err(TransitError::InvalidSettings(format!(
                "bus_wait_time must be a non-negative number of minutes, got {wait_time}"
            )));
        }
        if !velocity.is_finite() || velocity <= 0.0 {
            return Err(TransitError::InvalidSettings(format!(
                "bus_velocity must be a positive number of km/h, got {velocity}"
            )));
        }
        Ok(Self { wait_time, velocity })
    }

    pub fn wait_time(&self) -> f64 {
        self.wait_time
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Velocity expressed in meters per minute
    pub fn meters_per_minute(&self) -> f64 {
        self.velocity * METERS_PER_KILOMETER / MINUTES_PER_HOUR
    }

    /// Minutes needed to cover `meters` of road
    pub fn ride_time(&self, meters: f64) -> f64 {
        meters / self.meters_per_minute()
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawRoutingSettings {
    bus_wait_time: f64,
    bus_velocity: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawRoutingSettings> for RoutingSettings {
    type Error = TransitError;

    fn try_from(raw: RawRoutingSettings) -> Result<Self> {
        Self::new(raw.bus_wait_time, raw.bus_velocity)
    }
}
