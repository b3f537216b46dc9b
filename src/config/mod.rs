//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `LOSTITEM_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{DEFAULT_MATCH_THRESHOLD, DEFAULT_PROVIDER_TIMEOUT};

/// Service configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `LOSTITEM_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8505`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Catalog location: a directory of JSON artifacts or a packed `.rkyv` snapshot.
    /// Default: `./data`.
    pub catalog_path: PathBuf,

    /// Base URL of the embedding model server (`POST {url}/encode`).
    pub model_server_url: String,

    /// Timeout applied to every embedding request. Default: 10 seconds.
    pub provider_timeout: Duration,

    /// Similarity the best alias must strictly exceed. Default: `0.6`.
    pub match_threshold: f64,
}

/// Default model server URL used when `LOSTITEM_MODEL_SERVER` is not set.
pub const DEFAULT_MODEL_SERVER_URL: &str = "http://localhost:8000";

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8505,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            catalog_path: PathBuf::from("./data"),
            model_server_url: DEFAULT_MODEL_SERVER_URL.to_string(),
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
            match_threshold: DEFAULT_MATCH_THRESHOLD,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "LOSTITEM_PORT";
    const ENV_BIND_ADDR: &'static str = "LOSTITEM_BIND_ADDR";
    const ENV_CATALOG_PATH: &'static str = "LOSTITEM_CATALOG_PATH";
    const ENV_MODEL_SERVER: &'static str = "LOSTITEM_MODEL_SERVER";
    const ENV_PROVIDER_TIMEOUT_MS: &'static str = "LOSTITEM_PROVIDER_TIMEOUT_MS";
    const ENV_MATCH_THRESHOLD: &'static str = "LOSTITEM_MATCH_THRESHOLD";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let catalog_path = Self::parse_path_from_env(Self::ENV_CATALOG_PATH, defaults.catalog_path);
        let model_server_url =
            Self::parse_string_from_env(Self::ENV_MODEL_SERVER, defaults.model_server_url);
        let provider_timeout = Self::parse_timeout_from_env(defaults.provider_timeout)?;
        let match_threshold = Self::parse_threshold_from_env(defaults.match_threshold)?;

        Ok(Self {
            port,
            bind_addr,
            catalog_path,
            model_server_url,
            provider_timeout,
            match_threshold,
        })
    }

    /// Validates paths and basic invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.catalog_path.exists() {
            return Err(ConfigError::PathNotFound {
                path: self.catalog_path.clone(),
            });
        }

        if self.model_server_url.trim().is_empty() {
            return Err(ConfigError::MissingEnvVar {
                name: Self::ENV_MODEL_SERVER,
            });
        }

        if self.provider_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout {
                value: self.provider_timeout.as_millis().to_string(),
            });
        }

        check_threshold(self.match_threshold)
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_timeout_from_env(default: Duration) -> Result<Duration, ConfigError> {
        match env::var(Self::ENV_PROVIDER_TIMEOUT_MS) {
            Ok(value) => {
                let millis: u64 = value.trim().parse().map_err(|e| {
                    ConfigError::TimeoutParseError {
                        value: value.clone(),
                        source: e,
                    }
                })?;

                if millis == 0 {
                    return Err(ConfigError::InvalidTimeout { value });
                }

                Ok(Duration::from_millis(millis))
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_threshold_from_env(default: f64) -> Result<f64, ConfigError> {
        match env::var(Self::ENV_MATCH_THRESHOLD) {
            Ok(value) => {
                let threshold: f64 = value.trim().parse().map_err(|e| {
                    ConfigError::ThresholdParseError {
                        value: value.clone(),
                        source: e,
                    }
                })?;
                check_threshold(threshold)?;
                Ok(threshold)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or(default)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }
}

// Cosine similarity lives in [-1, 1]; anything outside can never (or always) match.
fn check_threshold(threshold: f64) -> Result<(), ConfigError> {
    if !threshold.is_finite() || !(-1.0..=1.0).contains(&threshold) {
        return Err(ConfigError::InvalidThreshold {
            value: threshold.to_string(),
        });
    }
    Ok(())
}
