//! Turns a catalogue snapshot into a routing graph.
//!
//! Every stop becomes two vertices: a *wait* vertex where a passenger
//! arrives, and a *board* vertex (`wait + 1`) from which buses depart. A
//! WAIT edge between them carries the boarding wait; RIDE edges go from the
//! board vertex of one stop to the wait vertex of a later stop on the same
//! bus, so every transfer pays the wait again.

use std::collections::HashMap;

use tracing::debug;
use transit_catalogue::{Bus, BusName, RoutingSettings, StopId, StopName, TransitDirectory, TransitError};

use crate::error::Result;
use crate::graph::{DirectedWeightedGraph, Edge, VertexId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum LegKind {
    Wait,
    Ride,
}

/// What a passenger does while traversing an edge
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Leg {
    /// Wait at `stop` for a bus
    Wait { stop: StopName },
    /// Ride `bus` for `span_count` consecutive stops
    Ride { bus: BusName, span_count: usize },
}

impl Leg {
    pub fn kind(&self) -> LegKind {
        match self {
            Leg::Wait { .. } => LegKind::Wait,
            Leg::Ride { .. } => LegKind::Ride,
        }
    }

    /// Stops covered; zero for a wait
    pub fn span_count(&self) -> usize {
        match self {
            Leg::Wait { .. } => 0,
            Leg::Ride { span_count, .. } => *span_count,
        }
    }

    /// Stop name for a wait, bus name for a ride
    pub fn label(&self) -> &str {
        match self {
            Leg::Wait { stop } => stop.as_str(),
            Leg::Ride { bus, .. } => bus.as_str(),
        }
    }
}

/// Edge weights are minutes
pub type TransitGraph = DirectedWeightedGraph<f64, Leg>;

/// Graph plus the stop ↔ vertex mapping used to build it
#[derive(Clone, Debug)]
pub struct BuiltGraph {
    pub graph: TransitGraph,
    /// Wait vertex of every stop
    pub stop_vertices: HashMap<StopName, VertexId>,
    /// Stop owning each wait/board vertex pair, indexed by `vertex / 2`
    pub vertex_stops: Vec<StopName>,
}

pub fn wait_vertex(stop: StopId) -> VertexId {
    VertexId::new(stop.index() * 2)
}

pub fn board_vertex(stop: StopId) -> VertexId {
    VertexId::new(stop.index() * 2 + 1)
}

pub struct GraphBuilder<'a, D: ?Sized> {
    directory: &'a D,
    settings: RoutingSettings,
}

impl<'a, D> GraphBuilder<'a, D>
where
    D: TransitDirectory + ?Sized,
{
    pub fn new(directory: &'a D, settings: RoutingSettings) -> Self {
        Self { directory, settings }
    }

    /// Build the graph.
    ///
    /// Fails with [`TransitError::UnknownDistance`] as soon as a leg between
    /// consecutive route stops has no recorded road distance; no partial
    /// graph is returned.
    pub fn build(&self) -> Result<BuiltGraph> {
        let stops = self.directory.stops();
        let mut graph = TransitGraph::new(stops.len() * 2);
        let mut stop_vertices = HashMap::with_capacity(stops.len());
        let mut vertex_stops = Vec::with_capacity(stops.len());

        for stop in stops {
            let wait = wait_vertex(stop.id());
            graph.add_edge(Edge {
                from: wait,
                to: board_vertex(stop.id()),
                weight: self.settings.wait_time(),
                label: Leg::Wait {
                    stop: stop.name().clone(),
                },
            })?;
            stop_vertices.insert(stop.name().clone(), wait);
            vertex_stops.push(stop.name().clone());
        }

        for bus in self.directory.buses() {
            self.add_bus_edges(&mut graph, bus)?;
        }

        debug!(
            stops = stops.len(),
            buses = self.directory.bus_count(),
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "built routing graph"
        );

        Ok(BuiltGraph {
            graph,
            stop_vertices,
            vertex_stops,
        })
    }

    fn add_bus_edges(&self, graph: &mut TransitGraph, bus: &Bus) -> Result<()> {
        let route = bus.effective_route();

        for i in 0..route.len() {
            let mut forward = 0.0;
            let mut backward = 0.0;

            for j in i + 1..route.len() {
                forward += self.leg_distance(route[j - 1], route[j])?;

                let span_count = j - i;
                graph.add_edge(Edge {
                    from: board_vertex(route[i]),
                    to: wait_vertex(route[j]),
                    weight: self.settings.ride_time(forward),
                    label: Leg::Ride {
                        bus: bus.name().clone(),
                        span_count,
                    },
                })?;

                if !bus.is_roundtrip() {
                    backward += self.leg_distance(route[j], route[j - 1])?;
                    graph.add_edge(Edge {
                        from: board_vertex(route[j]),
                        to: wait_vertex(route[i]),
                        weight: self.settings.ride_time(backward),
                        label: Leg::Ride {
                            bus: bus.name().clone(),
                            span_count,
                        },
                    })?;
                }
            }
        }

        Ok(())
    }

    fn leg_distance(&self, from: StopId, to: StopId) -> Result<f64> {
        self.directory.distance(from, to).ok_or_else(|| {
            let name = |id: StopId| {
                self.directory
                    .stop(id)
                    .map(|stop| stop.name().clone())
                    .unwrap_or_else(|| StopName::new(id.to_string()))
            };
            TransitError::UnknownDistance {
                from: name(from),
                to: name(to),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RoutingError;
    use approx::assert_relative_eq;
    use geo::Point;
    use transit_catalogue::TransportCatalogue;

    fn settings() -> RoutingSettings {
        RoutingSettings::new(6.0, 40.0).unwrap()
    }

    fn catalogue() -> TransportCatalogue {
        let mut catalogue = TransportCatalogue::new();
        catalogue.add_stop("A", Point::new(37.0, 55.0)).unwrap();
        catalogue.add_stop("B", Point::new(37.01, 55.01)).unwrap();
        catalogue.add_stop("C", Point::new(37.02, 55.02)).unwrap();
        catalogue.add_distance("A", "B", 1000.0).unwrap();
        catalogue.add_distance("B", "A", 1200.0).unwrap();
        catalogue.add_distance("B", "C", 2000.0).unwrap();
        catalogue
    }

    fn ride_edges<'g>(graph: &'g TransitGraph, bus: &str) -> Vec<&'g Edge<f64, Leg>> {
        graph
            .edges()
            .map(|(_, edge)| edge)
            .filter(|edge| edge.label.kind() == LegKind::Ride && edge.label.label() == bus)
            .collect()
    }

    #[test]
    fn test_wait_edges_and_vertex_layout() {
        let catalogue = catalogue();
        let built = GraphBuilder::new(&catalogue, settings()).build().unwrap();

        assert_eq!(built.graph.vertex_count(), 6);
        assert_eq!(built.graph.edge_count(), 3);

        for (index, name) in ["A", "B", "C"].into_iter().enumerate() {
            let wait = built.stop_vertices[name];
            assert_eq!(wait.index(), index * 2);
            assert_eq!(built.vertex_stops[index].as_str(), name);

            let edges = built.graph.edges_from(wait);
            assert_eq!(edges.len(), 1);
            let edge = built.graph.edge(edges[0]).unwrap();
            assert_eq!(edge.to.index(), wait.index() + 1);
            assert_eq!(edge.weight, 6.0);
            assert_eq!(edge.label, Leg::Wait { stop: StopName::new(name) });
            assert_eq!(edge.label.span_count(), 0);
        }
    }

    #[test]
    fn test_roundtrip_bus_edges() {
        let mut catalogue = catalogue();
        catalogue.add_bus("1", ["A", "B", "A"], true).unwrap();
        let built = GraphBuilder::new(&catalogue, settings()).build().unwrap();

        // One edge per ordered pair of positions: (0,1), (0,2), (1,2)
        let rides = ride_edges(&built.graph, "1");
        assert_eq!(rides.len(), 3);

        let a = built.stop_vertices["A"].index();
        let b = built.stop_vertices["B"].index();

        assert_eq!((rides[0].from.index(), rides[0].to.index()), (a + 1, b));
        assert_relative_eq!(rides[0].weight, 1.5);
        assert_eq!(rides[0].label.span_count(), 1);

        assert_eq!((rides[1].from.index(), rides[1].to.index()), (a + 1, a));
        assert_relative_eq!(rides[1].weight, 2200.0 / (40_000.0 / 60.0));
        assert_eq!(rides[1].label.span_count(), 2);

        assert_eq!((rides[2].from.index(), rides[2].to.index()), (b + 1, a));
        assert_relative_eq!(rides[2].weight, 1.8);
        assert_eq!(rides[2].label.span_count(), 1);
    }

    #[test]
    fn test_linear_bus_honours_asymmetric_distances() {
        let mut catalogue = catalogue();
        catalogue.add_bus("2", ["A", "B"], false).unwrap();
        let built = GraphBuilder::new(&catalogue, settings()).build().unwrap();

        // Effective route A, B, A: 3 forward pairs, each mirrored
        let rides = ride_edges(&built.graph, "2");
        assert_eq!(rides.len(), 6);

        let a = built.stop_vertices["A"].index();
        let b = built.stop_vertices["B"].index();

        let a_to_b: Vec<f64> = rides
            .iter()
            .filter(|e| e.from.index() == a + 1 && e.to.index() == b)
            .map(|e| e.weight)
            .collect();
        let b_to_a: Vec<f64> = rides
            .iter()
            .filter(|e| e.from.index() == b + 1 && e.to.index() == a)
            .map(|e| e.weight)
            .collect();

        assert!(!a_to_b.is_empty() && !b_to_a.is_empty());
        for weight in a_to_b {
            assert_relative_eq!(weight, 1.5);
        }
        for weight in b_to_a {
            assert_relative_eq!(weight, 1.8);
        }
    }

    #[test]
    fn test_single_stop_bus_adds_no_rides() {
        let mut catalogue = catalogue();
        catalogue.add_bus("solo", ["C"], false).unwrap();
        let built = GraphBuilder::new(&catalogue, settings()).build().unwrap();

        assert!(ride_edges(&built.graph, "solo").is_empty());
        assert_eq!(built.graph.edge_count(), 3);
    }

    #[test]
    fn test_missing_distance_aborts_build() {
        let mut catalogue = catalogue();
        catalogue.add_stop("D", Point::new(37.03, 55.03)).unwrap();
        catalogue.add_bus("3", ["B", "C", "D"], true).unwrap();

        let err = GraphBuilder::new(&catalogue, settings()).build().unwrap_err();
        assert!(matches!(
            err,
            RoutingError::Transit(TransitError::UnknownDistance { ref from, ref to })
                if from.as_str() == "C" && to.as_str() == "D"
        ));
    }

    #[test]
    fn test_zero_distance_is_not_missing() {
        let mut catalogue = catalogue();
        catalogue.add_distance("C", "C", 0.0).unwrap();
        catalogue.add_bus("ring", ["C", "C"], true).unwrap();

        let built = GraphBuilder::new(&catalogue, settings()).build().unwrap();
        let rides = ride_edges(&built.graph, "ring");
        assert_eq!(rides.len(), 1);
        assert_eq!(rides[0].weight, 0.0);
    }
}
