//! Trip planning orchestrator.
//!
//! Dispatches sequentially to the weather and attraction lookups and
//! joins their sentences into one reply. Holds no state beyond the
//! injected agents; every call is independent.

use tracing::info;

use crate::attractions::AttractionsAgent;
use crate::models::{EMPTY_PLACE_PROMPT, TripRequest};
use crate::weather::WeatherAgent;

/// Orchestrator over the two lookup agents
pub struct TripPlanner {
    weather: WeatherAgent,
    attractions: AttractionsAgent,
}

impl TripPlanner {
    #[must_use]
    pub fn new(weather: WeatherAgent, attractions: AttractionsAgent) -> Self {
        Self {
            weather,
            attractions,
        }
    }

    /// Build the combined reply for a trip request. Blank input is
    /// rejected before any network call; when neither lookup is
    /// requested the attractions lookup runs alone, since planning a
    /// trip is the point.
    pub async fn plan_trip(&self, request: &TripRequest) -> String {
        let place = request.place.trim();
        if place.is_empty() {
            return EMPTY_PLACE_PROMPT.to_string();
        }

        info!(
            "Planning trip for '{place}' (weather: {}, attractions: {})",
            request.want_weather, request.want_attractions
        );

        let mut responses = Vec::new();

        if request.want_weather {
            responses.push(self.weather.get_weather(place).await);
        }

        if request.want_attractions {
            responses.push(self.attractions.get_attractions(place).await);
        }

        if !request.want_weather && !request.want_attractions {
            responses.push(self.attractions.get_attractions(place).await);
        }

        responses.join(" And ")
    }
}
