//! Configuration management for `TripScout`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings. The
//! geocoding API key is never hard-coded; it must arrive via the
//! config file or the `TRIPSCOUT_GEOCODING__API_KEY` environment
//! variable.

use crate::TripScoutError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `TripScout` application
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TripScoutConfig {
    /// Geocoding service configuration
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    /// Weather service configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Points-of-interest service configuration
    #[serde(default)]
    pub attractions: AttractionsConfig,
    /// Web server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Geocoding service configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Geocoding API key (required)
    pub api_key: Option<String>,
    /// Base URL for the geocoding API
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_geocoding_timeout")]
    pub timeout_seconds: u32,
    /// Minimum similarity ratio between query and resolved name
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
}

/// Weather service configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL for the weather API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
}

/// Points-of-interest service configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttractionsConfig {
    /// Base URL for the points-of-interest API
    #[serde(default = "default_attractions_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_attractions_timeout")]
    pub timeout_seconds: u32,
    /// Search radius around the resolved coordinates, in meters
    #[serde(default = "default_search_radius")]
    pub radius_meters: u32,
    /// Maximum number of distinct attraction names to return
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

/// Web server configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port the HTTP server listens on
    #[serde(default = "default_server_port")]
    pub port: u16,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_geocoding_base_url() -> String {
    "https://us1.locationiq.com/v1".to_string()
}

fn default_geocoding_timeout() -> u32 {
    10
}

fn default_similarity_threshold() -> f64 {
    0.55
}

fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_weather_timeout() -> u32 {
    10
}

fn default_attractions_base_url() -> String {
    "https://overpass-api.de/api".to_string()
}

fn default_attractions_timeout() -> u32 {
    30
}

fn default_search_radius() -> u32 {
    30_000
}

fn default_max_results() -> usize {
    5
}

fn default_server_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_geocoding_base_url(),
            timeout_seconds: default_geocoding_timeout(),
            similarity_threshold: default_similarity_threshold(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            timeout_seconds: default_weather_timeout(),
        }
    }
}

impl Default for AttractionsConfig {
    fn default() -> Self {
        Self {
            base_url: default_attractions_base_url(),
            timeout_seconds: default_attractions_timeout(),
            radius_meters: default_search_radius(),
            max_results: default_max_results(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_server_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl TripScoutConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with TRIPSCOUT_ prefix
        builder = builder.add_source(
            Environment::with_prefix("TRIPSCOUT")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: TripScoutConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tripscout").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate API keys and credentials
    pub fn validate_api_keys(&self) -> Result<()> {
        match &self.geocoding.api_key {
            None => Err(TripScoutError::config(
                "Geocoding API key is required. Set TRIPSCOUT_GEOCODING__API_KEY or add it to the config file.",
            )
            .into()),
            Some(api_key) if api_key.is_empty() => {
                Err(TripScoutError::config("Geocoding API key cannot be empty").into())
            }
            Some(_) => Ok(()),
        }
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.geocoding.timeout_seconds == 0 || self.geocoding.timeout_seconds > 300 {
            return Err(
                TripScoutError::config("Geocoding timeout must be between 1 and 300 seconds")
                    .into(),
            );
        }

        if self.weather.timeout_seconds == 0 || self.weather.timeout_seconds > 300 {
            return Err(TripScoutError::config(
                "Weather timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        if self.attractions.timeout_seconds == 0 || self.attractions.timeout_seconds > 300 {
            return Err(TripScoutError::config(
                "Attractions timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        if !(0.0..=1.0).contains(&self.geocoding.similarity_threshold) {
            return Err(TripScoutError::config(
                "Similarity threshold must be between 0.0 and 1.0",
            )
            .into());
        }

        if self.attractions.radius_meters == 0 || self.attractions.radius_meters > 100_000 {
            return Err(TripScoutError::config(
                "Search radius must be between 1 and 100000 meters",
            )
            .into());
        }

        if self.attractions.max_results == 0 || self.attractions.max_results > 50 {
            return Err(TripScoutError::config(
                "Maximum attraction results must be between 1 and 50",
            )
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TripScoutError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TripScoutError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("Geocoding", &self.geocoding.base_url),
            ("Weather", &self.weather.base_url),
            ("Attractions", &self.attractions.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(TripScoutError::config(format!(
                    "{name} base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}
