//! # transit-routing
//!
//! Fastest-itinerary search over a [`transit_catalogue`] snapshot.
//!
//! The catalogue is turned into a directed graph where each stop owns a
//! *wait* and a *board* vertex, buses contribute one edge per pair of stops
//! they connect, and a router precomputes shortest paths from every vertex.
//!
//! ## Example
//!
//! ```
//! use geo::Point;
//! use transit_catalogue::{RoutingSettings, TransportCatalogue};
//! use transit_routing::{ItineraryItem, TransitRouter};
//!
//! let mut catalogue = TransportCatalogue::new();
//! catalogue.add_stop("A", Point::new(37.0, 55.0)).unwrap();
//! catalogue.add_stop("B", Point::new(37.01, 55.01)).unwrap();
//! catalogue.add_distance("A", "B", 1000.0).unwrap();
//! catalogue.add_distance("B", "A", 1200.0).unwrap();
//! catalogue.add_bus("1", ["A", "B", "A"], true).unwrap();
//!
//! let settings = RoutingSettings::new(6.0, 40.0).unwrap();
//! let router = TransitRouter::new(&catalogue, settings).unwrap();
//!
//! let itinerary = router.find_route("A", "B").unwrap().unwrap();
//! assert!((itinerary.total_time - 7.5).abs() < 1e-9);
//! assert!(matches!(itinerary.items[0], ItineraryItem::Wait { time, .. } if time == 6.0));
//! assert!(matches!(itinerary.items[1], ItineraryItem::Bus { span_count: 1, .. }));
//! ```

pub mod builder;
pub mod error;
pub mod graph;
pub mod router;
pub mod transit_router;

pub use builder::{BuiltGraph, GraphBuilder, Leg, LegKind, TransitGraph};
pub use error::{Result, RoutingError};
pub use graph::{DirectedWeightedGraph, Edge, EdgeId, VertexId, Weight};
pub use router::{RouteInfo, Router};
pub use transit_router::{Itinerary, ItineraryItem, TransitRouter};
