//! Catalogue storage and derived statistics.

pub mod stats;
pub mod store;

pub use stats::bus_stat;
pub use store::TransportCatalogue;
