//! Shared value types passed between the planner and its lookups.
//!
//! Everything here is request-scoped: values are produced, rendered to
//! text and dropped within a single plan call. Nothing is persisted.

use serde::{Deserialize, Serialize};

/// Reply used by both lookups when the place cannot be resolved.
pub const UNKNOWN_PLACE_REPLY: &str = "I don't know this place exists.";

/// Reply used by the planner when the place input is blank.
pub const EMPTY_PLACE_PROMPT: &str = "Please enter a place you want to visit.";

/// A geocoded place: coordinates plus the canonical display name
/// returned by the geocoding service. Either all three fields are
/// available or resolution failed and no value is produced at all.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ResolvedLocation {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Canonical display name, e.g. "Paris, Île-de-France, France"
    pub display_name: String,
}

impl ResolvedLocation {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, display_name: String) -> Self {
        Self {
            latitude,
            longitude,
            display_name,
        }
    }

    /// First comma-delimited segment of the display name, the part the
    /// resolver compares against the user's query.
    #[must_use]
    pub fn primary_name(&self) -> &str {
        self.display_name
            .split(',')
            .next()
            .unwrap_or(&self.display_name)
    }
}

/// Transient result of a weather fetch, rendered to a sentence
/// immediately after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSummary {
    /// Current temperature, absent when the upstream response lacked it
    pub temperature_celsius: Option<f64>,
    /// Peak of today's hourly precipitation probabilities
    pub max_rain_probability_percent: Option<i64>,
}

/// The sole input to the planner, constructed per incoming call and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRequest {
    pub place: String,
    pub want_weather: bool,
    pub want_attractions: bool,
}

impl TripRequest {
    #[must_use]
    pub fn new(place: impl Into<String>, want_weather: bool, want_attractions: bool) -> Self {
        Self {
            place: place.into(),
            want_weather,
            want_attractions,
        }
    }
}
