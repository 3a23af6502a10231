//! Catalogue data models, settings, and traits.

pub mod settings;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use settings::RoutingSettings;
pub use traits::TransitDirectory;
pub use types::{Bus, BusStat, Result, Stop, TransitError};
