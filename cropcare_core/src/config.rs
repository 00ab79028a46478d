//! Configuration file support for CropCare.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/cropcare/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub log: LogConfig,
}

/// Two-tier cache configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Prefix applied to every physical key
    #[serde(default = "default_namespace")]
    pub namespace: String,

    #[serde(default = "default_true")]
    pub redis_enabled: bool,

    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// Upper bound on any single external-store round trip
    #[serde(default = "default_operation_timeout_ms")]
    pub operation_timeout_ms: u64,

    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// Maximum entries held by the in-process tier
    #[serde(default = "default_memory_capacity")]
    pub memory_capacity: usize,

    #[serde(default = "default_ttl_default_secs")]
    pub ttl_default_secs: u64,

    #[serde(default = "default_ttl_disease_info_secs")]
    pub ttl_disease_info_secs: u64,

    #[serde(default = "default_ttl_suppliers_secs")]
    pub ttl_suppliers_secs: u64,

    #[serde(default = "default_ttl_prices_secs")]
    pub ttl_prices_secs: u64,

    /// Logical keys longer than this are replaced by their SHA-256 digest
    #[serde(default = "default_long_key_threshold")]
    pub long_key_threshold: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            redis_enabled: default_true(),
            redis_url: default_redis_url(),
            operation_timeout_ms: default_operation_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            memory_capacity: default_memory_capacity(),
            ttl_default_secs: default_ttl_default_secs(),
            ttl_disease_info_secs: default_ttl_disease_info_secs(),
            ttl_suppliers_secs: default_ttl_suppliers_secs(),
            ttl_prices_secs: default_ttl_prices_secs(),
            long_key_threshold: default_long_key_threshold(),
        }
    }
}

impl CacheConfig {
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_default_secs)
    }

    pub fn disease_info_ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_disease_info_secs)
    }

    pub fn suppliers_ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_suppliers_secs)
    }

    pub fn prices_ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_prices_secs)
    }
}

/// Outbound collaborator configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_nominatim_url")]
    pub nominatim_url: String,

    #[serde(default = "default_overpass_url")]
    pub overpass_url: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Bound applied to every outbound call
    #[serde(default = "default_upstream_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_supplier_radius_km")]
    pub supplier_radius_km: u32,

    #[serde(default = "default_max_suppliers")]
    pub max_suppliers: usize,

    /// How many of the top treatments get price lookups
    #[serde(default = "default_priced_treatments")]
    pub priced_treatments: usize,

    #[serde(default = "default_prices_per_treatment")]
    pub prices_per_treatment: usize,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            nominatim_url: default_nominatim_url(),
            overpass_url: default_overpass_url(),
            user_agent: default_user_agent(),
            timeout_ms: default_upstream_timeout_ms(),
            supplier_radius_km: default_supplier_radius_km(),
            max_suppliers: default_max_suppliers(),
            priced_treatments: default_priced_treatments(),
            prices_per_treatment: default_prices_per_treatment(),
        }
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResolverConfig {
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            suggestion_limit: default_suggestion_limit(),
        }
    }
}

/// Log output configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `text` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Default value functions
fn default_true() -> bool {
    true
}

fn default_namespace() -> String {
    "crop_api".into()
}

fn default_redis_url() -> String {
    "redis://127.0.0.1:6379/0".into()
}

fn default_operation_timeout_ms() -> u64 {
    2_000
}

fn default_connect_timeout_ms() -> u64 {
    10_000
}

fn default_memory_capacity() -> usize {
    1_000
}

fn default_ttl_default_secs() -> u64 {
    3_600
}

fn default_ttl_disease_info_secs() -> u64 {
    86_400
}

fn default_ttl_suppliers_secs() -> u64 {
    1_800
}

fn default_ttl_prices_secs() -> u64 {
    900
}

fn default_long_key_threshold() -> usize {
    200
}

fn default_nominatim_url() -> String {
    "https://nominatim.openstreetmap.org".into()
}

fn default_overpass_url() -> String {
    "https://overpass-api.de/api/interpreter".into()
}

fn default_user_agent() -> String {
    "CropDiseaseAPI/1.0 (agricultural-assistant)".into()
}

fn default_upstream_timeout_ms() -> u64 {
    30_000
}

fn default_supplier_radius_km() -> u32 {
    20
}

fn default_max_suppliers() -> usize {
    5
}

fn default_priced_treatments() -> usize {
    3
}

fn default_prices_per_treatment() -> usize {
    3
}

fn default_suggestion_limit() -> usize {
    5
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "text".into()
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(Error::Config(errors.join("; ")));
        }
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let base = match dirs::config_dir() {
            Some(dir) => dir,
            None => {
                let home = std::env::var("HOME").map_err(|_| {
                    Error::Config("HOME environment variable not set".to_string())
                })?;
                PathBuf::from(home).join(".config")
            }
        };
        Ok(base.join("cropcare").join("config.toml"))
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Validate the configuration
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let cache = &self.cache;

        if cache.namespace.trim().is_empty() {
            errors.push("cache.namespace must not be empty".to_string());
        }
        for (field, value) in [
            ("cache.operation_timeout_ms", cache.operation_timeout_ms),
            ("cache.connect_timeout_ms", cache.connect_timeout_ms),
            ("cache.ttl_default_secs", cache.ttl_default_secs),
            ("cache.ttl_disease_info_secs", cache.ttl_disease_info_secs),
            ("cache.ttl_suppliers_secs", cache.ttl_suppliers_secs),
            ("cache.ttl_prices_secs", cache.ttl_prices_secs),
            ("upstream.timeout_ms", self.upstream.timeout_ms),
        ] {
            if value == 0 {
                errors.push(format!("{} must be greater than zero", field));
            }
        }
        if cache.memory_capacity == 0 {
            errors.push("cache.memory_capacity must be greater than zero".to_string());
        }
        if cache.long_key_threshold == 0 {
            errors.push("cache.long_key_threshold must be greater than zero".to_string());
        }
        if !matches!(self.log.format.as_str(), "text" | "json") {
            errors.push(format!(
                "log.format must be 'text' or 'json', got '{}'",
                self.log.format
            ));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.cache.namespace, "crop_api");
        assert_eq!(config.cache.ttl_disease_info_secs, 86_400);
        assert_eq!(config.cache.long_key_threshold, 200);
        assert_eq!(config.resolver.suggestion_limit, 5);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.cache.redis_url, parsed.cache.redis_url);
        assert_eq!(config.upstream.max_suppliers, parsed.upstream.max_suppliers);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[cache]
redis_enabled = false
memory_capacity = 50
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(!config.cache.redis_enabled);
        assert_eq!(config.cache.memory_capacity, 50);
        // Unspecified fields keep their defaults
        assert_eq!(config.cache.ttl_prices_secs, 900);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let mut config = Config::default();
        config.cache.namespace = " ".into();
        config.cache.memory_capacity = 0;
        config.upstream.timeout_ms = 0;
        config.log.format = "xml".into();

        let errors = config.validate();
        assert_eq!(errors.len(), 4, "{:?}", errors);
    }

    #[test]
    fn test_save_and_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.cache.namespace = "test_ns".into();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.cache.namespace, "test_ns");
    }

    #[test]
    fn test_load_from_rejects_invalid_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[cache]\nmemory_capacity = 0\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
