//! Current-weather lookup backed by the Open-Meteo forecast API.
//!
//! Resolves the place first, then fetches the current temperature
//! together with today's hourly precipitation probabilities and
//! renders both into a single sentence. Every failure path returns a
//! fixed sentence rather than an error.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::warn;

use crate::TripScoutError;
use crate::config::{TripScoutConfig, WeatherConfig};
use crate::geocoding::Resolver;
use crate::models::{ResolvedLocation, UNKNOWN_PLACE_REPLY, WeatherSummary};

/// Weather lookup agent
pub struct WeatherAgent {
    resolver: Arc<Resolver>,
    client: Client,
    config: WeatherConfig,
}

impl WeatherAgent {
    /// Create a new weather agent sharing the given resolver
    pub fn new(resolver: Arc<Resolver>, config: &TripScoutConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(crate::USER_AGENT)
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            resolver,
            client,
            config: config.weather.clone(),
        })
    }

    /// Produce the weather sentence for a place name. The sentence
    /// always names the user-supplied place, never the resolved
    /// display name.
    pub async fn get_weather(&self, place_name: &str) -> String {
        let Some(location) = self.resolver.resolve(place_name).await else {
            return UNKNOWN_PLACE_REPLY.to_string();
        };

        let summary = match self.fetch_summary(&location).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!("Weather fetch failed for '{place_name}': {e:#}");
                return could_not_fetch(place_name);
            }
        };

        let Some(temperature) = summary.temperature_celsius else {
            return could_not_fetch(place_name);
        };

        match summary.max_rain_probability_percent {
            Some(rain) => format!(
                "In {place_name} it's currently {temperature}°C with a chance of {rain}% to rain."
            ),
            None => format!("In {place_name} it's currently {temperature}°C."),
        }
    }

    #[tracing::instrument(name = "fetch_weather", level = "debug", skip_all)]
    async fn fetch_summary(&self, location: &ResolvedLocation) -> Result<WeatherSummary> {
        let url = format!(
            "{}/forecast?latitude={}&longitude={}&current_weather=true&hourly=precipitation_probability&forecast_days=1",
            self.config.base_url, location.latitude, location.longitude
        );

        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(self.config.timeout_seconds.into()))
            .send()
            .await
            .with_context(|| "Weather request failed")?;

        if !response.status().is_success() {
            return Err(
                TripScoutError::api(format!("Weather API error {}", response.status())).into(),
            );
        }

        let forecast: open_meteo::ForecastResponse = response
            .json()
            .await
            .map_err(|e| TripScoutError::parse(format!("Bad weather response: {e}")))?;

        Ok(forecast.into_summary())
    }
}

fn could_not_fetch(place_name: &str) -> String {
    format!("I couldn't fetch weather for {place_name} right now.")
}

/// Open-Meteo API response structures
mod open_meteo {
    use serde::Deserialize;

    use crate::models::WeatherSummary;

    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub current_weather: Option<CurrentWeather>,
        pub hourly: Option<HourlyData>,
    }

    #[derive(Debug, Deserialize)]
    pub struct CurrentWeather {
        pub temperature: f64,
    }

    #[derive(Debug, Deserialize)]
    pub struct HourlyData {
        #[serde(default)]
        pub precipitation_probability: Vec<i64>,
    }

    impl ForecastResponse {
        pub fn into_summary(self) -> WeatherSummary {
            WeatherSummary {
                temperature_celsius: self.current_weather.map(|current| current.temperature),
                max_rain_probability_percent: self
                    .hourly
                    .and_then(|hourly| hourly.precipitation_probability.into_iter().max()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary_from(body: &str) -> WeatherSummary {
        let forecast: open_meteo::ForecastResponse = serde_json::from_str(body).unwrap();
        forecast.into_summary()
    }

    #[test]
    fn test_summary_with_temperature_and_rain() {
        let summary = summary_from(
            r#"{"current_weather": {"temperature": 21.5},
                "hourly": {"precipitation_probability": [10, 40, 15]}}"#,
        );
        assert_eq!(summary.temperature_celsius, Some(21.5));
        assert_eq!(summary.max_rain_probability_percent, Some(40));
    }

    #[test]
    fn test_summary_without_rain_data() {
        let summary = summary_from(r#"{"current_weather": {"temperature": 3.0}}"#);
        assert_eq!(summary.temperature_celsius, Some(3.0));
        assert_eq!(summary.max_rain_probability_percent, None);
    }

    #[test]
    fn test_summary_empty_probability_list() {
        let summary = summary_from(
            r#"{"current_weather": {"temperature": 3.0},
                "hourly": {"precipitation_probability": []}}"#,
        );
        assert_eq!(summary.max_rain_probability_percent, None);
    }

    #[test]
    fn test_summary_missing_current_weather() {
        let summary = summary_from(r#"{"hourly": {"precipitation_probability": [5]}}"#);
        assert_eq!(summary.temperature_celsius, None);
    }
}
