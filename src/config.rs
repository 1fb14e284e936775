//! Configuration management for the `MamaeZen` service
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::MamaeZenError;
use crate::models::Coordinate;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MamaeZenConfig {
    /// Generative AI service configuration
    #[serde(default)]
    pub gemini: GeminiConfig,
    /// Guided navigation timings and speech settings
    #[serde(default)]
    pub navigation: NavigationConfig,
    /// Geolocation defaults
    #[serde(default)]
    pub location: LocationConfig,
    /// Preference store configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

/// Generative AI service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key; without it every AI call resolves to bundled data
    pub api_key: Option<String>,
    /// Base URL of the REST API
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
    /// Model used for every call
    #[serde(default = "default_gemini_model")]
    pub model: String,
    /// Request timeout in seconds
    #[serde(default = "default_gemini_timeout")]
    pub timeout_seconds: u32,
}

/// Guided navigation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Seconds between comfort phrases
    #[serde(default = "default_comfort_interval")]
    pub comfort_interval_seconds: u32,
    /// Seconds a comfort phrase stays on screen
    #[serde(default = "default_comfort_display")]
    pub comfort_display_seconds: u32,
    /// Pause before the greeting is spoken, in milliseconds
    #[serde(default = "default_greeting_pause")]
    pub greeting_pause_ms: u32,
    /// Speaking pace used to estimate utterance length
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: u32,
    /// Maximum number of places returned by a search
    #[serde(default = "default_max_places")]
    pub max_places: u32,
}

/// Geolocation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Latitude used when no position can be read
    #[serde(default = "default_latitude")]
    pub default_latitude: f64,
    /// Longitude used when no position can be read
    #[serde(default = "default_longitude")]
    pub default_longitude: f64,
    /// Timeout for a single position read in seconds
    #[serde(default = "default_location_timeout")]
    pub timeout_seconds: u32,
    /// Ask the device for its most accurate fix
    #[serde(default = "default_high_accuracy")]
    pub high_accuracy: bool,
}

/// Preference store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory of the preference database
    #[serde(default = "default_storage_location")]
    pub location: String,
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
    /// OTLP/HTTP endpoint for trace export; disabled when absent
    pub otlp_endpoint: Option<String>,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listening port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory with a built front-end, served for non-API paths
    pub static_dir: Option<String>,
    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u32,
}

// Default value functions
fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_gemini_timeout() -> u32 {
    30
}

fn default_comfort_interval() -> u32 {
    30
}

fn default_comfort_display() -> u32 {
    8
}

fn default_greeting_pause() -> u32 {
    300
}

fn default_words_per_minute() -> u32 {
    170
}

fn default_max_places() -> u32 {
    5
}

fn default_latitude() -> f64 {
    -23.5505
}

fn default_longitude() -> f64 {
    -46.6333
}

fn default_location_timeout() -> u32 {
    10
}

fn default_high_accuracy() -> bool {
    true
}

fn default_storage_location() -> String {
    dirs::data_dir()
        .map(|dir| dir.join("mamaezen"))
        .unwrap_or_else(|| PathBuf::from(".mamaezen"))
        .to_string_lossy()
        .into_owned()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u32 {
    60
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_gemini_base_url(),
            model: default_gemini_model(),
            timeout_seconds: default_gemini_timeout(),
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            comfort_interval_seconds: default_comfort_interval(),
            comfort_display_seconds: default_comfort_display(),
            greeting_pause_ms: default_greeting_pause(),
            words_per_minute: default_words_per_minute(),
            max_places: default_max_places(),
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            default_latitude: default_latitude(),
            default_longitude: default_longitude(),
            timeout_seconds: default_location_timeout(),
            high_accuracy: default_high_accuracy(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            location: default_storage_location(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            otlp_endpoint: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            static_dir: None,
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl Default for MamaeZenConfig {
    fn default() -> Self {
        Self {
            gemini: GeminiConfig::default(),
            navigation: NavigationConfig::default(),
            location: LocationConfig::default(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl NavigationConfig {
    #[must_use]
    pub fn comfort_interval(&self) -> Duration {
        Duration::from_secs(self.comfort_interval_seconds.into())
    }

    #[must_use]
    pub fn comfort_display(&self) -> Duration {
        Duration::from_secs(self.comfort_display_seconds.into())
    }

    #[must_use]
    pub fn greeting_pause(&self) -> Duration {
        Duration::from_millis(self.greeting_pause_ms.into())
    }
}

impl LocationConfig {
    #[must_use]
    pub fn default_coordinate(&self) -> Coordinate {
        Coordinate::new(self.default_latitude, self.default_longitude)
    }
}

impl MamaeZenConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

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

        // MAMAEZEN__GEMINI__API_KEY style overrides
        builder = builder.add_source(
            Environment::with_prefix("MAMAEZEN")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: MamaeZenConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("mamaezen").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.gemini.base_url.is_empty() {
            self.gemini.base_url = default_gemini_base_url();
        }
        if self.gemini.model.is_empty() {
            self.gemini.model = default_gemini_model();
        }
        if self.gemini.timeout_seconds == 0 {
            self.gemini.timeout_seconds = default_gemini_timeout();
        }
        if self.navigation.comfort_interval_seconds == 0 {
            self.navigation.comfort_interval_seconds = default_comfort_interval();
        }
        if self.navigation.comfort_display_seconds == 0 {
            self.navigation.comfort_display_seconds = default_comfort_display();
        }
        if self.navigation.words_per_minute == 0 {
            self.navigation.words_per_minute = default_words_per_minute();
        }
        if self.navigation.max_places == 0 {
            self.navigation.max_places = default_max_places();
        }
        if self.location.timeout_seconds == 0 {
            self.location.timeout_seconds = default_location_timeout();
        }
        if self.storage.location.is_empty() {
            self.storage.location = default_storage_location();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
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
        if let Some(api_key) = &self.gemini.api_key {
            if api_key.is_empty() {
                return Err(MamaeZenError::config(
                    "Gemini API key cannot be empty if provided. Either remove it or provide a valid key.",
                )
                .into());
            }

            if api_key.len() < 8 {
                return Err(MamaeZenError::config(
                    "Gemini API key appears to be invalid (too short). Please check your API key.",
                )
                .into());
            }

            if api_key.len() > 100 {
                return Err(MamaeZenError::config(
                    "Gemini API key appears to be invalid (too long). Please check your API key.",
                )
                .into());
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.gemini.timeout_seconds > 300 {
            return Err(MamaeZenError::config("Gemini API timeout cannot exceed 300 seconds").into());
        }

        if self.navigation.comfort_display_seconds >= self.navigation.comfort_interval_seconds {
            return Err(MamaeZenError::config(
                "Comfort phrase display time must be shorter than the comfort interval",
            )
            .into());
        }

        if self.navigation.greeting_pause_ms > 10_000 {
            return Err(MamaeZenError::config("Greeting pause cannot exceed 10000 ms").into());
        }

        if !(60..=400).contains(&self.navigation.words_per_minute) {
            return Err(MamaeZenError::config(
                "Speaking pace must be between 60 and 400 words per minute",
            )
            .into());
        }

        if self.navigation.max_places > 20 {
            return Err(MamaeZenError::config("Maximum places cannot exceed 20").into());
        }

        if !(-90.0..=90.0).contains(&self.location.default_latitude)
            || !(-180.0..=180.0).contains(&self.location.default_longitude)
        {
            return Err(MamaeZenError::config("Default coordinate is out of range").into());
        }

        if self.location.timeout_seconds > 120 {
            return Err(MamaeZenError::config("Location timeout cannot exceed 120 seconds").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(MamaeZenError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(MamaeZenError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.gemini.base_url.starts_with("http://")
            && !self.gemini.base_url.starts_with("https://")
        {
            return Err(MamaeZenError::config(
                "Gemini API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }
}
