//! All-pairs shortest paths by repeated Dijkstra.
//!
//! The router runs Dijkstra from every vertex once at construction and keeps
//! the distance and predecessor tables. Queries then only walk predecessors,
//! which costs O(path length).
//!
//! Predecessors store both the edge and the vertex it leaves from, so the
//! router does not need to borrow the graph after construction.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::graph::{DirectedWeightedGraph, EdgeId, VertexId, Weight};

/// Shortest path between two vertices
#[derive(Clone, Debug, PartialEq)]
pub struct RouteInfo<W> {
    pub weight: W,
    pub edges: Vec<EdgeId>,
}

#[derive(Clone, Copy, Debug)]
struct RouteInternalData<W> {
    weight: W,
    prev: Option<(EdgeId, VertexId)>,
}

#[derive(Copy, Clone)]
struct State<W> {
    cost: W,
    vertex: usize,
}

// The priority queue depends on `Ord`.
// Flip the ordering on costs so `BinaryHeap` becomes a min-heap; ties fall
// back to the vertex to keep `Ord` consistent with `PartialEq`.
impl<W: Weight> Ord for State<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| self.vertex.cmp(&other.vertex))
    }
}

impl<W: Weight> PartialOrd for State<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: Weight> PartialEq for State<W> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<W: Weight> Eq for State<W> {}

#[derive(Clone, Debug)]
pub struct Router<W> {
    routes: Vec<Vec<Option<RouteInternalData<W>>>>,
}

impl<W: Weight> Router<W> {
    /// Precompute shortest paths from every vertex of `graph`
    pub fn new<L>(graph: &DirectedWeightedGraph<W, L>) -> Self {
        let vertex_count = graph.vertex_count();
        let routes = (0..vertex_count)
            .map(|source| Self::single_source(graph, source))
            .collect();

        debug!(vertex_count, edge_count = graph.edge_count(), "router precomputed");
        Self { routes }
    }

    fn single_source<L>(
        graph: &DirectedWeightedGraph<W, L>,
        source: usize,
    ) -> Vec<Option<RouteInternalData<W>>> {
        let mut best: Vec<Option<RouteInternalData<W>>> = vec![None; graph.vertex_count()];
        let mut heap = BinaryHeap::new();

        best[source] = Some(RouteInternalData {
            weight: W::ZERO,
            prev: None,
        });
        heap.push(State {
            cost: W::ZERO,
            vertex: source,
        });

        while let Some(State { cost, vertex }) = heap.pop() {
            // Skip stale queue entries
            if let Some(known) = &best[vertex] {
                if cost.total_cmp(&known.weight) == Ordering::Greater {
                    continue;
                }
            }

            for &edge_id in graph.edges_from(VertexId::new(vertex)) {
                let Some(edge) = graph.edge(edge_id) else {
                    continue;
                };
                let next = edge.to.index();
                let candidate = cost + edge.weight;

                let improves = match &best[next] {
                    Some(known) => candidate.total_cmp(&known.weight) == Ordering::Less,
                    None => true,
                };
                if improves {
                    best[next] = Some(RouteInternalData {
                        weight: candidate,
                        prev: Some((edge_id, VertexId::new(vertex))),
                    });
                    heap.push(State {
                        cost: candidate,
                        vertex: next,
                    });
                }
            }
        }

        best
    }

    pub fn vertex_count(&self) -> usize {
        self.routes.len()
    }

    /// Shortest path from `from` to `to`.
    ///
    /// `from == to` yields an empty path of zero weight. `None` when `to`
    /// is unreachable or either vertex is out of range.
    pub fn build_route(&self, from: VertexId, to: VertexId) -> Option<RouteInfo<W>> {
        let table = self.routes.get(from.index())?;
        let target = (*table.get(to.index())?)?;

        let mut edges = Vec::new();
        let mut prev = target.prev;
        while let Some((edge, vertex)) = prev {
            edges.push(edge);
            prev = table[vertex.index()].and_then(|data| data.prev);
        }
        edges.reverse();

        Some(RouteInfo {
            weight: target.weight,
            edges,
        })
    }
}
