//! Spatial indexing and geographic distance utilities.

pub mod index;
pub mod queries;

pub use queries::{haversine_distance, path_length};
