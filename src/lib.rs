//! `TripScout` - trip planning assistant combining weather and
//! tourist attraction lookups
//!
//! This library resolves a free-text place name to coordinates, then
//! fetches current weather and nearby tourist attractions from
//! external APIs and composes them into a single natural-language
//! reply.

pub mod api;
pub mod attractions;
pub mod config;
pub mod error;
pub mod geocoding;
pub mod models;
pub mod planner;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use attractions::AttractionsAgent;
pub use config::TripScoutConfig;
pub use error::TripScoutError;
pub use geocoding::Resolver;
pub use models::{ResolvedLocation, TripRequest, WeatherSummary};
pub use planner::TripPlanner;
pub use weather::WeatherAgent;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// User agent sent on all outbound API requests
pub const USER_AGENT: &str = concat!("TripScout/", env!("CARGO_PKG_VERSION"));
