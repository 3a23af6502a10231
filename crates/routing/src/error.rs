//! Errors raised while building or querying the routing graph.

use transit_catalogue::{StopName, TransitError};

use crate::graph::VertexId;

#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    #[error("Vertex {vertex} is out of range for a graph with {vertex_count} vertices")]
    VertexOutOfRange { vertex: VertexId, vertex_count: usize },

    #[error("Edge {from} -> {to} has a negative or undefined weight")]
    InvalidWeight { from: VertexId, to: VertexId },

    #[error("Stop not found: {0}")]
    StopNotFound(StopName),

    #[error(transparent)]
    Transit(#[from] TransitError),
}

pub type Result<T> = std::result::Result<T, RoutingError>;
