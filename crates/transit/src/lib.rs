//! # transit-catalogue
//!
//! In-memory catalogue of a bus network: stops with coordinates, buses over
//! ordered stop sequences, and directional road distances between stops.
//!
//! ## Features
//!
//! - **Stable handles**: stops and buses live in append-only storage
//!   addressed by [`StopId`]/[`BusId`]
//! - **Directional distances**: each direction stored separately, with
//!   fallback to the opposite direction on lookup
//! - **Bus statistics**: stop counts, road length and curvature
//! - **Spatial queries**: R-tree backed radius and nearest-stop lookups
//! - **Typed loading**: apply `Stop`/`Bus` base requests in dependency order
//!
//! ## Example
//!
//! ```
//! use transit_catalogue::prelude::*;
//! use geo::Point;
//!
//! let mut catalogue = TransportCatalogue::new();
//! catalogue.add_stop("A", Point::new(37.0, 55.0)).unwrap();
//! catalogue.add_stop("B", Point::new(37.01, 55.01)).unwrap();
//! catalogue.add_distance("A", "B", 1000.0).unwrap();
//! catalogue.add_distance("B", "A", 1200.0).unwrap();
//! catalogue.add_bus("1", ["A", "B", "A"], true).unwrap();
//!
//! let stat = catalogue.bus_stat("1").unwrap().unwrap();
//! assert_eq!(stat.stop_count, 3);
//! assert_eq!(stat.unique_stop_count, 2);
//! assert_eq!(stat.route_length, 2200.0);
//!
//! assert!(catalogue.bus_stat("2").unwrap().is_none());
//! ```

pub mod catalogue;
pub mod identifiers;
pub mod loader;
pub mod models;
pub mod spatial;

// Re-exports for convenience
pub mod prelude {
    pub use crate::catalogue::{bus_stat, TransportCatalogue};
    pub use crate::identifiers::*;
    pub use crate::loader::{load_base_requests, BaseRequest, BusDescription, StopDescription};
    pub use crate::models::{settings::*, traits::*, types::*};
}

pub use prelude::*;
