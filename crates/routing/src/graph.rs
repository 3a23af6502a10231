//! Directed weighted graph with edges addressable by a stable id.
//!
//! Edges are only ever appended, so an [`EdgeId`] handed out once keeps
//! pointing at the same edge for the lifetime of the graph. Self-loops and
//! parallel edges are allowed.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

use crate::error::{Result, RoutingError};

macro_rules! impl_index {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(usize);

        impl $name {
            pub fn new(index: usize) -> Self {
                Self(index)
            }

            pub fn index(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

impl_index!(VertexId);
impl_index!(EdgeId);

/// Edge weight usable by the shortest-path router.
///
/// Needs a zero, addition, and a total order (floats are ordered with
/// `total_cmp`).
pub trait Weight: Copy + PartialOrd + Add<Output = Self> + fmt::Debug {
    const ZERO: Self;

    fn total_cmp(&self, other: &Self) -> Ordering;
}

macro_rules! impl_float_weight {
    ($t:ty) => {
        impl Weight for $t {
            const ZERO: Self = 0.0;

            fn total_cmp(&self, other: &Self) -> Ordering {
                <$t>::total_cmp(self, other)
            }
        }
    };
}

macro_rules! impl_int_weight {
    ($t:ty) => {
        impl Weight for $t {
            const ZERO: Self = 0;

            fn total_cmp(&self, other: &Self) -> Ordering {
                Ord::cmp(self, other)
            }
        }
    };
}

impl_float_weight!(f32);
impl_float_weight!(f64);
impl_int_weight!(u32);
impl_int_weight!(u64);

#[derive(Clone, Debug, PartialEq)]
pub struct Edge<W, L> {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: W,
    pub label: L,
}

#[derive(Clone, Debug)]
pub struct DirectedWeightedGraph<W, L> {
    edges: Vec<Edge<W, L>>,
    incidence: Vec<Vec<EdgeId>>,
}

impl<W: Weight, L> DirectedWeightedGraph<W, L> {
    /// Create a graph with `vertex_count` vertices and no edges
    pub fn new(vertex_count: usize) -> Self {
        Self {
            edges: Vec::new(),
            incidence: vec![Vec::new(); vertex_count],
        }
    }

    /// Append an edge and return its id.
    ///
    /// Both endpoints must exist and the weight must be non-negative, since
    /// the router relies on Dijkstra's algorithm.
    pub fn add_edge(&mut self, edge: Edge<W, L>) -> Result<EdgeId> {
        for vertex in [edge.from, edge.to] {
            if vertex.0 >= self.incidence.len() {
                return Err(RoutingError::VertexOutOfRange {
                    vertex,
                    vertex_count: self.incidence.len(),
                });
            }
        }
        if !matches!(
            edge.weight.partial_cmp(&W::ZERO),
            Some(Ordering::Greater | Ordering::Equal)
        ) {
            return Err(RoutingError::InvalidWeight {
                from: edge.from,
                to: edge.to,
            });
        }

        let id = EdgeId(self.edges.len());
        self.incidence[edge.from.0].push(id);
        self.edges.push(edge);
        Ok(id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge<W, L>> {
        self.edges.get(id.0)
    }

    /// Outgoing edge ids of `vertex` in insertion order; empty for an unknown vertex
    pub fn edges_from(&self, vertex: VertexId) -> &[EdgeId] {
        self.incidence.get(vertex.0).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn vertex_count(&self) -> usize {
        self.incidence.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All edges with their ids, in insertion order
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge<W, L>)> {
        self.edges.iter().enumerate().map(|(i, edge)| (EdgeId(i), edge))
    }
}
