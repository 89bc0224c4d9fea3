//! Tourist attraction lookup backed by an Overpass API endpoint.
//!
//! Resolves the place, then runs a tag-filtered spatial query around
//! the resolved coordinates and collects up to a configured number of
//! distinct attraction names, in the order the upstream returns them.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::warn;

use crate::TripScoutError;
use crate::config::{AttractionsConfig, TripScoutConfig};
use crate::geocoding::Resolver;
use crate::models::{ResolvedLocation, UNKNOWN_PLACE_REPLY};

/// Node tag predicates OR-ed together in the spatial query.
const POI_TAG_FILTERS: [(&str, &str); 6] = [
    ("tourism", "attraction"),
    ("tourism", "museum"),
    ("leisure", "park"),
    ("historic", "monument"),
    ("historic", "temple"),
    ("amenity", "place_of_worship"),
];

/// Attraction lookup agent
pub struct AttractionsAgent {
    resolver: Arc<Resolver>,
    client: Client,
    config: AttractionsConfig,
}

impl AttractionsAgent {
    /// Create a new attractions agent sharing the given resolver
    pub fn new(resolver: Arc<Resolver>, config: &TripScoutConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(crate::USER_AGENT)
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            resolver,
            client,
            config: config.attractions.clone(),
        })
    }

    /// Produce the attractions reply for a place name.
    pub async fn get_attractions(&self, place_name: &str) -> String {
        let Some(location) = self.resolver.resolve(place_name).await else {
            return UNKNOWN_PLACE_REPLY.to_string();
        };

        let elements = match self.fetch_elements(&location).await {
            Ok(elements) => elements,
            Err(e) => {
                warn!("Attractions fetch failed for '{place_name}': {e:#}");
                return format!("I couldn't fetch tourist places for {place_name} right now.");
            }
        };

        let names = collect_names(&elements, self.config.max_results);
        if names.is_empty() {
            return format!(
                "In {place_name} I couldn't find popular tourist attractions from the API."
            );
        }

        format!(
            "In {place_name} these are the places you can go,\n{}",
            names.join("\n")
        )
    }

    #[tracing::instrument(name = "fetch_attractions", level = "debug", skip_all)]
    async fn fetch_elements(&self, location: &ResolvedLocation) -> Result<Vec<overpass::Element>> {
        let query = build_query(
            location.latitude,
            location.longitude,
            self.config.radius_meters,
        );
        let url = format!("{}/interpreter", self.config.base_url);

        let response = self
            .client
            .post(&url)
            .form(&[("data", query.as_str())])
            .timeout(Duration::from_secs(self.config.timeout_seconds.into()))
            .send()
            .await
            .with_context(|| "Attractions request failed")?;

        if !response.status().is_success() {
            return Err(
                TripScoutError::api(format!("Attractions API error {}", response.status())).into(),
            );
        }

        let body: overpass::QueryResponse = response
            .json()
            .await
            .map_err(|e| TripScoutError::parse(format!("Bad attractions response: {e}")))?;

        Ok(body.elements)
    }
}

/// Build the Overpass QL payload for nodes within `radius_meters` of
/// the coordinates, matching any of the tag predicates.
fn build_query(latitude: f64, longitude: f64, radius_meters: u32) -> String {
    let mut query = String::from("[out:json][timeout:25];\n(\n");
    for (key, value) in POI_TAG_FILTERS {
        query.push_str(&format!(
            "    node[\"{key}\"=\"{value}\"](around:{radius_meters},{latitude},{longitude});\n"
        ));
    }
    query.push_str(");\nout body;");
    query
}

/// Collect up to `max_results` distinct names from the elements, in
/// first-seen order. Stops as soon as the limit is reached.
fn collect_names(elements: &[overpass::Element], max_results: usize) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for element in elements {
        if let Some(name) = element.tags.get("name") {
            if !name.is_empty() && !names.iter().any(|seen| seen == name) {
                names.push(name.clone());
            }
        }
        if names.len() >= max_results {
            break;
        }
    }
    names
}

/// Overpass API response structures
mod overpass {
    use std::collections::HashMap;

    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct QueryResponse {
        #[serde(default)]
        pub elements: Vec<Element>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Element {
        #[serde(default)]
        pub tags: HashMap<String, String>,
    }
}
