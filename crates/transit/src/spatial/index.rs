//! R-tree nodes for spatial indexing of stops.
//!
//! ## Two-Stage Filtering
//!
//! Stop queries use a two-stage filtering approach:
//! 1. **R-tree filter**: Euclidean distance in degree space with a radius
//!    widened for the query latitude, so no candidate is missed
//! 2. **Haversine filter**: accurate geodesic distance on the candidates

use geo::Point;
use rstar::{PointDistance, RTreeObject, AABB};

use crate::identifiers::StopId;

#[derive(Clone, Debug)]
pub struct StopNode {
    pub stop: StopId,
    point: [f64; 2],
}

impl StopNode {
    pub fn new(location: Point, stop: StopId) -> Self {
        Self {
            stop,
            point: [location.x(), location.y()],
        }
    }
}

impl RTreeObject for StopNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for StopNode {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}
