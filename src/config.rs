use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::core::error::QueryError;
use crate::models::{
    Coordinate, QueryParameters, DEFAULT_FILTER_RADIUS_KM, DEFAULT_LIMIT, DEFAULT_MATCH_RADIUS_KM,
    DEFAULT_QUERY, DEFAULT_REFERENCE,
};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub query: QuerySettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 5000 }

/// Where the pilot listing comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    File,
    Http,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceSettings {
    #[serde(default = "default_source_kind")]
    pub kind: SourceKind,
    /// JSON listing file, used when `kind = "file"`
    pub path: Option<String>,
    /// Remote listing URL, used when `kind = "http"`
    pub url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            kind: default_source_kind(),
            path: Some(default_source_path()),
            url: None,
            timeout_secs: None,
        }
    }
}

fn default_source_kind() -> SourceKind { SourceKind::File }
fn default_source_path() -> String { "data/pilots.json".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct QuerySettings {
    #[serde(default = "default_reference_lat")]
    pub reference_lat: f64,
    #[serde(default = "default_reference_lon")]
    pub reference_lon: f64,
    #[serde(default = "default_query_lat")]
    pub default_lat: f64,
    #[serde(default = "default_query_lon")]
    pub default_lon: f64,
    #[serde(default = "default_match_radius_km")]
    pub match_radius_km: f64,
    #[serde(default = "default_filter_radius_km")]
    pub filter_radius_km: f64,
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            reference_lat: default_reference_lat(),
            reference_lon: default_reference_lon(),
            default_lat: default_query_lat(),
            default_lon: default_query_lon(),
            match_radius_km: default_match_radius_km(),
            filter_radius_km: default_filter_radius_km(),
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

impl QuerySettings {
    /// Validate the configured coordinates and build the default query parameters
    pub fn to_parameters(&self) -> Result<QueryParameters, QueryError> {
        Ok(QueryParameters {
            query: Coordinate::new(self.default_lat, self.default_lon)?,
            match_radius_km: self.match_radius_km,
            reference: Coordinate::new(self.reference_lat, self.reference_lon)?,
            filter_radius_km: self.filter_radius_km,
            limit: self.default_limit.min(self.max_limit),
        })
    }
}

fn default_reference_lat() -> f64 { DEFAULT_REFERENCE.latitude() }
fn default_reference_lon() -> f64 { DEFAULT_REFERENCE.longitude() }
fn default_query_lat() -> f64 { DEFAULT_QUERY.latitude() }
fn default_query_lon() -> f64 { DEFAULT_QUERY.longitude() }
fn default_match_radius_km() -> f64 { DEFAULT_MATCH_RADIUS_KM }
fn default_filter_radius_km() -> f64 { DEFAULT_FILTER_RADIUS_KM }
fn default_limit() -> usize { DEFAULT_LIMIT }
fn default_max_limit() -> usize { 100 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with PILOTS__)
    /// 5. A plain `PORT` variable, as set by most hosting platforms
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., PILOTS__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("PILOTS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_port_override(settings, std::env::var("PORT").ok())?;

        settings.try_deserialize()
    }
}

/// Let a bare `PORT` value win over every other port setting
fn apply_port_override(settings: Config, port: Option<String>) -> Result<Config, ConfigError> {
    let Some(port) = port else {
        return Ok(settings);
    };

    let port: i64 = port
        .trim()
        .parse()
        .map_err(|e| ConfigError::Message(format!("PORT must be a number, got {:?}: {}", port, e)))?;

    Config::builder()
        .add_source(settings)
        .set_override("server.port", port)?
        .build()
}
