//! Spatial query utilities for distance calculations.
//!
//! Uses Haversine formula for accurate distances on Earth's surface.

use geo::{HaversineDistance, Point};

/// Mean Earth radius used by [`geo::HaversineDistance`]
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

/// Great-circle meters per degree of arc on the haversine sphere
const METERS_PER_DEGREE: f64 = EARTH_RADIUS_METERS * std::f64::consts::PI / 180.0;

// Slack for rounding between degree space and the haversine formula
const RADIUS_MARGIN: f64 = 1.001;

/// Calculate Haversine distance between two points in meters
pub fn haversine_distance(p1: Point, p2: Point) -> f64 {
    p1.haversine_distance(&p2)
}

/// Sum of great-circle distances along consecutive points, in meters
pub fn path_length<I>(points: I) -> f64
where
    I: IntoIterator<Item = Point>,
{
    let mut points = points.into_iter();
    let Some(mut previous) = points.next() else {
        return 0.0;
    };
    let mut total = 0.0;
    for point in points {
        total += haversine_distance(previous, point);
        previous = point;
    }
    total
}

/// Radius in degrees that is guaranteed to cover `meters` around `latitude`.
///
/// A degree of longitude shrinks towards the poles, so the radius is widened
/// by `1 / cos` of the most poleward latitude the circle can reach; the
/// cosine is clamped to keep polar queries finite.
pub fn search_radius_degrees(meters: f64, latitude: f64) -> f64 {
    let span = meters / METERS_PER_DEGREE;
    let poleward = (latitude.abs() + span).min(90.0);
    let shrink = poleward.to_radians().cos().max(0.01);
    span / shrink * RADIUS_MARGIN
}
