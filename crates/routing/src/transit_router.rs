//! Stop-name level routing over a built graph.

use std::collections::HashMap;

use tracing::debug;
use transit_catalogue::{BusName, RoutingSettings, StopName, TransitDirectory};

use crate::builder::{GraphBuilder, Leg, TransitGraph};
use crate::error::{Result, RoutingError};
use crate::graph::{Edge, EdgeId, VertexId};
use crate::router::Router;

/// One step of an itinerary
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum ItineraryItem {
    Wait {
        stop_name: StopName,
        time: f64,
    },
    Bus {
        bus_name: BusName,
        span_count: usize,
        time: f64,
    },
}

impl ItineraryItem {
    /// Minutes spent on this step
    pub fn time(&self) -> f64 {
        match self {
            ItineraryItem::Wait { time, .. } | ItineraryItem::Bus { time, .. } => *time,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Itinerary {
    /// Minutes from arriving at the origin stop to arriving at the destination
    pub total_time: f64,
    pub items: Vec<ItineraryItem>,
}

/// Routing facade owning the graph and the router precomputed over it.
///
/// Both are built together and never change afterwards; rebuilding from a
/// new catalogue snapshot means constructing a new `TransitRouter`.
#[derive(Clone, Debug)]
pub struct TransitRouter {
    settings: RoutingSettings,
    graph: TransitGraph,
    router: Router<f64>,
    stop_vertices: HashMap<StopName, VertexId>,
    vertex_stops: Vec<StopName>,
}

impl TransitRouter {
    /// Build the graph for `directory` and precompute all routes
    pub fn new<D>(directory: &D, settings: RoutingSettings) -> Result<Self>
    where
        D: TransitDirectory + ?Sized,
    {
        let built = GraphBuilder::new(directory, settings).build()?;
        let router = Router::new(&built.graph);

        Ok(Self {
            settings,
            graph: built.graph,
            router,
            stop_vertices: built.stop_vertices,
            vertex_stops: built.vertex_stops,
        })
    }

    /// Fastest itinerary between two named stops.
    ///
    /// Unknown stop names are an error; `Ok(None)` means both stops exist
    /// but no sequence of rides connects them.
    pub fn find_route(&self, from: &str, to: &str) -> Result<Option<Itinerary>> {
        let from_vertex = self.resolve(from)?;
        let to_vertex = self.resolve(to)?;

        let Some(route) = self.router.build_route(from_vertex, to_vertex) else {
            debug!(from, to, "no route");
            return Ok(None);
        };

        let items = route
            .edges
            .iter()
            .filter_map(|&id| self.graph.edge(id))
            .map(|edge| match &edge.label {
                Leg::Wait { stop } => ItineraryItem::Wait {
                    stop_name: stop.clone(),
                    time: edge.weight,
                },
                Leg::Ride { bus, span_count } => ItineraryItem::Bus {
                    bus_name: bus.clone(),
                    span_count: *span_count,
                    time: edge.weight,
                },
            })
            .collect();

        Ok(Some(Itinerary {
            total_time: route.weight,
            items,
        }))
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge<f64, Leg>> {
        self.graph.edge(id)
    }

    pub fn graph(&self) -> &TransitGraph {
        &self.graph
    }

    pub fn settings(&self) -> RoutingSettings {
        self.settings
    }

    /// Wait vertex of the named stop
    pub fn wait_vertex(&self, stop: &str) -> Option<VertexId> {
        self.stop_vertices.get(stop).copied()
    }

    /// Stop owning a wait or board vertex
    pub fn stop_at(&self, vertex: VertexId) -> Option<&StopName> {
        self.vertex_stops.get(vertex.index() / 2)
    }

    fn resolve(&self, stop: &str) -> Result<VertexId> {
        self.wait_vertex(stop)
            .ok_or_else(|| RoutingError::StopNotFound(StopName::new(stop)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::LegKind;
    use approx::assert_relative_eq;
    use geo::Point;
    use transit_catalogue::{TransitError, TransportCatalogue};

    fn settings() -> RoutingSettings {
        RoutingSettings::new(6.0, 40.0).unwrap()
    }

    fn two_stop_catalogue() -> TransportCatalogue {
        let mut catalogue = TransportCatalogue::new();
        catalogue.add_stop("A", Point::new(37.0, 55.0)).unwrap();
        catalogue.add_stop("B", Point::new(37.01, 55.01)).unwrap();
        catalogue.add_distance("A", "B", 1000.0).unwrap();
        catalogue.add_distance("B", "A", 1200.0).unwrap();
        catalogue
    }

    #[test]
    fn test_wait_then_ride() {
        let mut catalogue = two_stop_catalogue();
        catalogue.add_bus("1", ["A", "B", "A"], true).unwrap();
        let router = TransitRouter::new(&catalogue, settings()).unwrap();

        let itinerary = router.find_route("A", "B").unwrap().unwrap();
        assert_relative_eq!(itinerary.total_time, 7.5);
        assert_eq!(itinerary.items.len(), 2);
        assert_eq!(
            itinerary.items[0],
            ItineraryItem::Wait {
                stop_name: StopName::new("A"),
                time: 6.0
            }
        );
        match &itinerary.items[1] {
            ItineraryItem::Bus {
                bus_name,
                span_count,
                time,
            } => {
                assert_eq!(bus_name.as_str(), "1");
                assert_eq!(*span_count, 1);
                assert_relative_eq!(*time, 1.5);
            }
            other => panic!("expected a bus ride, got {other:?}"),
        }
    }

    #[test]
    fn test_reverse_direction_uses_its_own_distance() {
        let mut catalogue = two_stop_catalogue();
        catalogue.add_bus("1", ["A", "B", "A"], true).unwrap();
        let router = TransitRouter::new(&catalogue, settings()).unwrap();

        let itinerary = router.find_route("B", "A").unwrap().unwrap();
        assert_relative_eq!(itinerary.total_time, 7.8);
        assert_relative_eq!(itinerary.items[1].time(), 1.8);
    }

    #[test]
    fn test_same_stop_is_empty_itinerary() {
        let mut catalogue = two_stop_catalogue();
        catalogue.add_bus("1", ["A", "B", "A"], true).unwrap();
        let router = TransitRouter::new(&catalogue, settings()).unwrap();

        let itinerary = router.find_route("A", "A").unwrap().unwrap();
        assert_eq!(itinerary.total_time, 0.0);
        assert!(itinerary.items.is_empty());
    }

    #[test]
    fn test_unconnected_stops_have_no_route() {
        let catalogue = two_stop_catalogue();
        let router = TransitRouter::new(&catalogue, settings()).unwrap();

        assert_eq!(router.find_route("A", "B").unwrap(), None);
    }

    #[test]
    fn test_unknown_stop_is_an_error() {
        let catalogue = two_stop_catalogue();
        let router = TransitRouter::new(&catalogue, settings()).unwrap();

        assert!(matches!(
            router.find_route("A", "Nowhere"),
            Err(RoutingError::StopNotFound(name)) if name.as_str() == "Nowhere"
        ));
        assert!(router.find_route("Nowhere", "A").is_err());
    }

    #[test]
    fn test_missing_distance_fails_construction() {
        let mut catalogue = two_stop_catalogue();
        catalogue.add_stop("C", Point::new(37.02, 55.02)).unwrap();
        catalogue.add_bus("2", ["A", "C"], false).unwrap();

        assert!(matches!(
            TransitRouter::new(&catalogue, settings()),
            Err(RoutingError::Transit(TransitError::UnknownDistance { .. }))
        ));
    }

    #[test]
    fn test_transfer_pays_wait_again() {
        let mut catalogue = two_stop_catalogue();
        catalogue.add_stop("C", Point::new(37.02, 55.02)).unwrap();
        catalogue.add_distance("B", "C", 2000.0).unwrap();
        catalogue.add_bus("1", ["A", "B"], true).unwrap();
        catalogue.add_bus("2", ["B", "C"], true).unwrap();
        let router = TransitRouter::new(&catalogue, settings()).unwrap();

        let itinerary = router.find_route("A", "C").unwrap().unwrap();
        let kinds: Vec<&str> = itinerary
            .items
            .iter()
            .map(|item| match item {
                ItineraryItem::Wait { .. } => "wait",
                ItineraryItem::Bus { .. } => "bus",
            })
            .collect();
        assert_eq!(kinds, vec!["wait", "bus", "wait", "bus"]);
        // 6 + 1.5 + 6 + 3
        assert_relative_eq!(itinerary.total_time, 16.5);

        let sum: f64 = itinerary.items.iter().map(ItineraryItem::time).sum();
        assert_relative_eq!(sum, itinerary.total_time);
    }

    #[test]
    fn test_staying_on_board_beats_transfer() {
        let mut catalogue = two_stop_catalogue();
        catalogue.add_stop("C", Point::new(37.02, 55.02)).unwrap();
        catalogue.add_distance("B", "C", 2000.0).unwrap();
        catalogue.add_bus("long", ["A", "B", "C"], true).unwrap();
        let router = TransitRouter::new(&catalogue, settings()).unwrap();

        let itinerary = router.find_route("A", "C").unwrap().unwrap();
        assert_eq!(itinerary.items.len(), 2);
        assert!(matches!(
            &itinerary.items[1],
            ItineraryItem::Bus { span_count: 2, .. }
        ));
        assert_relative_eq!(itinerary.total_time, 6.0 + 4.5);
    }

    #[test]
    fn test_repeated_queries_are_identical() {
        let mut catalogue = two_stop_catalogue();
        catalogue.add_bus("1", ["A", "B"], false).unwrap();
        let router = TransitRouter::new(&catalogue, settings()).unwrap();

        let first = router.find_route("B", "A").unwrap();
        let second = router.find_route("B", "A").unwrap();
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn test_inspection() {
        let mut catalogue = two_stop_catalogue();
        catalogue.add_bus("1", ["A", "B", "A"], true).unwrap();
        let router = TransitRouter::new(&catalogue, settings()).unwrap();

        assert_eq!(router.graph().vertex_count(), 4);
        assert_eq!(router.settings(), settings());

        let b = router.wait_vertex("B").unwrap();
        assert_eq!(router.stop_at(b).unwrap().as_str(), "B");
        assert_eq!(router.stop_at(VertexId::new(b.index() + 1)).unwrap().as_str(), "B");
        assert!(router.wait_vertex("Z").is_none());

        let wait = router.edge(router.graph().edges_from(b)[0]).unwrap();
        assert_eq!(wait.label.kind(), LegKind::Wait);
        assert_eq!(wait.label.label(), "B");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_itinerary_serializes_with_type_tags() {
        let mut catalogue = two_stop_catalogue();
        catalogue.add_bus("1", ["A", "B", "A"], true).unwrap();
        let router = TransitRouter::new(&catalogue, settings()).unwrap();

        let itinerary = router.find_route("A", "B").unwrap().unwrap();
        let json = serde_json::to_value(&itinerary).unwrap();
        assert_eq!(json["items"][0]["type"], "Wait");
        assert_eq!(json["items"][0]["stop_name"], "A");
        assert_eq!(json["items"][1]["type"], "Bus");
        assert_eq!(json["items"][1]["span_count"], 1);
    }
}
