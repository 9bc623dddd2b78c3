//! Configuration loading for the annotations service
//!
//! Settings are resolved per key in priority order:
//! 1. Command-line argument or environment variable (highest priority)
//! 2. TOML config file
//! 3. Compiled default (fallback)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Directory name under the platform config dir
const CONFIG_DIR_NAME: &str = "public-annotations";

/// Compiled defaults used when neither CLI/env nor TOML set a value
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub port: u16,
    pub env: String,
    pub cache_duration: String,
    pub log_level: String,
}

impl Default for CompiledDefaults {
    fn default() -> Self {
        Self {
            port: 8080,
            env: "local".to_string(),
            cache_duration: "30s".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Contents of the optional TOML config file
///
/// Every key is optional; missing keys fall back to compiled defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    pub port: Option<u16>,
    pub env: Option<String>,
    pub cache_duration: Option<String>,
    pub log_level: Option<String>,
    pub fixture_path: Option<PathBuf>,
}

/// Values given on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub port: Option<u16>,
    pub env: Option<String>,
    pub cache_duration: Option<String>,
    pub log_level: Option<String>,
    pub fixture_path: Option<PathBuf>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub port: u16,
    /// Deployment environment; `test` switches API URLs to the test host
    pub env: String,
    pub cache_duration: Duration,
    pub log_level: String,
    /// JSON file with graph rows keyed by content UUID
    pub fixture_path: Option<PathBuf>,
}

impl ServiceConfig {
    /// Merge overrides, TOML and compiled defaults
    ///
    /// # Errors
    /// Returns `Error::Config` if the cache duration cannot be parsed.
    pub fn resolve(overrides: ConfigOverrides, toml: TomlConfig) -> Result<Self> {
        let defaults = CompiledDefaults::default();

        let cache_duration = overrides
            .cache_duration
            .or(toml.cache_duration)
            .unwrap_or(defaults.cache_duration);

        Ok(Self {
            port: overrides.port.or(toml.port).unwrap_or(defaults.port),
            env: overrides.env.or(toml.env).unwrap_or(defaults.env),
            cache_duration: parse_duration(&cache_duration)?,
            log_level: overrides.log_level.or(toml.log_level).unwrap_or(defaults.log_level),
            fixture_path: overrides.fixture_path.or(toml.fixture_path),
        })
    }

    /// Value of the `Cache-Control` header for successful responses
    pub fn cache_control_header(&self) -> String {
        cache_control_header(self.cache_duration)
    }
}

/// Default config file location, e.g. `~/.config/public-annotations/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join("config.toml"))
}

/// Load the TOML config file
///
/// An explicitly given path must exist and parse. When no path is given the
/// default location is tried; a missing default file is not an error and
/// yields empty settings.
pub fn load_toml_config(path: Option<&Path>) -> Result<TomlConfig> {
    if let Some(path) = path {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read config {} failed: {}", path.display(), e)))?;
        let config = toml::from_str(&content)?;
        info!("Loaded configuration from {}", path.display());
        return Ok(config);
    }

    match default_config_path() {
        Some(path) if path.exists() => match std::fs::read_to_string(&path) {
            Ok(content) => {
                let config = toml::from_str(&content)?;
                info!("Loaded configuration from {}", path.display());
                Ok(config)
            }
            Err(e) => {
                warn!("Could not read {}: {}. Using defaults", path.display(), e);
                Ok(TomlConfig::default())
            }
        },
        _ => Ok(TomlConfig::default()),
    }
}

/// Parse a duration such as `30s`, `5m`, `1.5h` or `2h45m`
pub fn parse_duration(s: &str) -> Result<Duration> {
    let invalid = || Error::Config(format!("failed to parse cache duration string: {:?}", s));

    let s = s.trim();
    if s.is_empty() {
        return Err(invalid());
    }
    if s == "0" {
        return Ok(Duration::ZERO);
    }

    let mut total_ms = 0f64;
    let mut rest = s;
    while !rest.is_empty() {
        let num_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or_else(invalid)?;
        let value: f64 = rest[..num_end].parse().map_err(|_| invalid())?;
        rest = &rest[num_end..];

        let unit_end = rest.find(|c: char| c.is_ascii_digit() || c == '.').unwrap_or(rest.len());
        let ms_per_unit = match &rest[..unit_end] {
            "h" => 3_600_000.0,
            "m" => 60_000.0,
            "s" => 1_000.0,
            "ms" => 1.0,
            _ => return Err(invalid()),
        };
        rest = &rest[unit_end..];

        total_ms += value * ms_per_unit;
    }

    Duration::try_from_secs_f64(total_ms / 1_000.0).map_err(|_| invalid())
}

/// `Cache-Control` header value for the given max age
pub fn cache_control_header(duration: Duration) -> String {
    format!("max-age={:.0}, public", duration.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("30s").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_duration("5m").unwrap(), Duration::from_secs(300));
        assert_eq!(parse_duration("2h45m").unwrap(), Duration::from_secs(9900));
        assert_eq!(parse_duration("1.5h").unwrap(), Duration::from_secs(5400));
        assert_eq!(parse_duration("500ms").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        for bad in ["", "30", "s", "10x", "1h-5m", "abc"] {
            assert!(parse_duration(bad).is_err(), "{:?} should be rejected", bad);
        }
    }

    #[test]
    fn test_cache_control_header() {
        assert_eq!(cache_control_header(Duration::from_secs(30)), "max-age=30, public");
        assert_eq!(cache_control_header(Duration::from_secs(9900)), "max-age=9900, public");
    }

    #[test]
    fn test_resolve_uses_compiled_defaults() {
        let config = ServiceConfig::resolve(ConfigOverrides::default(), TomlConfig::default()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.env, "local");
        assert_eq!(config.cache_duration, Duration::from_secs(30));
        assert_eq!(config.log_level, "info");
        assert!(config.fixture_path.is_none());
        assert_eq!(config.cache_control_header(), "max-age=30, public");
    }

    #[test]
    fn test_resolve_priority() {
        let toml = TomlConfig {
            port: Some(9000),
            env: Some("test".to_string()),
            cache_duration: Some("1m".to_string()),
            log_level: Some("debug".to_string()),
            fixture_path: Some(PathBuf::from("/tmp/toml.json")),
        };
        let overrides = ConfigOverrides {
            port: Some(9100),
            cache_duration: Some("2m".to_string()),
            ..Default::default()
        };

        let config = ServiceConfig::resolve(overrides, toml).unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.env, "test");
        assert_eq!(config.cache_duration, Duration::from_secs(120));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.fixture_path, Some(PathBuf::from("/tmp/toml.json")));
    }

    #[test]
    fn test_resolve_rejects_bad_cache_duration() {
        let overrides = ConfigOverrides {
            cache_duration: Some("forever".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            ServiceConfig::resolve(overrides, TomlConfig::default()),
            Err(Error::Config(_))
        ));
    }
}
