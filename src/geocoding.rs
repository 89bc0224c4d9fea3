//! Place name resolution via the LocationIQ geocoding API.
//!
//! Sends the raw place name upstream with `limit=1`, then gates the
//! top candidate with a sequence-matching similarity check so that
//! garbled input does not silently resolve to a far-off place. All
//! failure modes (transport, malformed body, empty result, low
//! similarity) collapse to `None` and are indistinguishable to
//! callers; the causes are only visible in the debug log.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::TripScoutError;
use crate::config::{GeocodingConfig, TripScoutConfig};
use crate::models::ResolvedLocation;

/// Geocoding resolver with a fuzzy-match acceptance gate
pub struct Resolver {
    client: Client,
    config: GeocodingConfig,
}

/// One candidate from the geocoding API. Coordinates arrive
/// string-encoded and are parsed explicitly.
#[derive(Debug, Deserialize)]
struct GeocodeCandidate {
    lat: String,
    lon: String,
    display_name: String,
}

impl Resolver {
    /// Create a new resolver from application configuration
    pub fn new(config: &TripScoutConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(crate::USER_AGENT)
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            config: config.geocoding.clone(),
        })
    }

    /// Resolve a free-text place name to coordinates and a canonical
    /// display name. Returns `None` when the place cannot be resolved,
    /// for any reason.
    pub async fn resolve(&self, place_name: &str) -> Option<ResolvedLocation> {
        let candidate = match self.fetch_top_candidate(place_name).await {
            Ok(Some(candidate)) => candidate,
            Ok(None) => {
                debug!("No geocoding candidates for '{place_name}'");
                return None;
            }
            Err(e) => {
                debug!("Geocoding failed for '{place_name}': {e:#}");
                return None;
            }
        };

        let latitude: f64 = candidate.lat.parse().ok()?;
        let longitude: f64 = candidate.lon.parse().ok()?;
        let location = ResolvedLocation::new(latitude, longitude, candidate.display_name);

        // Reject plausible-looking but unrelated matches for nonsense input
        let ratio = sequence_ratio(
            &place_name.to_lowercase(),
            &location.primary_name().to_lowercase(),
        );
        if ratio < self.config.similarity_threshold {
            debug!(
                "Rejecting geocoding match '{}' for query '{place_name}' (ratio {ratio:.2})",
                location.display_name
            );
            return None;
        }

        debug!(
            "Resolved '{place_name}' to '{}' at ({}, {})",
            location.display_name, location.latitude, location.longitude
        );
        Some(location)
    }

    #[tracing::instrument(name = "geocode", level = "debug", skip(self))]
    async fn fetch_top_candidate(&self, place_name: &str) -> Result<Option<GeocodeCandidate>> {
        let url = format!(
            "{}/search?key={}&q={}&format=json&limit=1",
            self.config.base_url,
            self.config.api_key.as_deref().unwrap_or_default(),
            urlencoding::encode(place_name)
        );

        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(self.config.timeout_seconds.into()))
            .send()
            .await
            .with_context(|| "Geocoding request failed")?;

        if !response.status().is_success() {
            return Err(
                TripScoutError::api(format!("Geocoding API error {}", response.status())).into(),
            );
        }

        // Error responses arrive as an object with an "error" key and
        // fail this decode, which is exactly the collapse we want.
        let candidates: Vec<GeocodeCandidate> = response
            .json()
            .await
            .map_err(|e| TripScoutError::parse(format!("Bad geocoding response: {e}")))?;

        Ok(candidates.into_iter().next())
    }
}

/// Normalized similarity ratio in [0, 1] between two strings:
/// 2 * matches / total length, where matches is the combined length of
/// the longest matching blocks found recursively (Ratcliff/Obershelp,
/// the same ratio Python's `difflib.SequenceMatcher` computes).
#[must_use]
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matches = matching_chars(&a, &b);
    2.0 * matches as f64 / total as f64
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (i, j, len) = longest_match(a, b);
    if len == 0 {
        return 0;
    }
    len + matching_chars(&a[..i], &b[..j]) + matching_chars(&a[i + len..], &b[j + len..])
}

/// Longest contiguous matching block between `a` and `b`, preferring
/// the earliest occurrence on ties.
fn longest_match(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    // run_lengths[j] = length of the common run ending at a[i], b[j]
    let mut run_lengths = vec![0usize; b.len()];
    for (i, ca) in a.iter().enumerate() {
        let mut new_runs = vec![0usize; b.len()];
        for (j, cb) in b.iter().enumerate() {
            if ca == cb {
                let len = if j > 0 { run_lengths[j - 1] + 1 } else { 1 };
                new_runs[j] = len;
                if len > best.2 {
                    best = (i + 1 - len, j + 1 - len, len);
                }
            }
        }
        run_lengths = new_runs;
    }
    best
}
