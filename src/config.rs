//! Configuration management for surfcast
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::SurfcastError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
const VALID_LOG_FORMATS: [&str; 2] = ["pretty", "json"];

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurfcastConfig {
    /// Forecast aggregation settings
    #[serde(default)]
    pub forecast: ForecastConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Forecast aggregation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Rating given to points whose source supplies none
    #[serde(default = "default_rating")]
    pub default_rating: f64,
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

fn default_rating() -> f64 {
    crate::rating::DEFAULT_RATING
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            default_rating: default_rating(),
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

impl SurfcastConfig {
    /// Load configuration from the default file and environment variables
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

        // SURFCAST__FORECAST__DEFAULT_RATING=2 etc.
        builder = builder.add_source(
            Environment::with_prefix("SURFCAST")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: SurfcastConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("surfcast").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if !self.forecast.default_rating.is_finite() {
            return Err(SurfcastError::config(format!(
                "Default rating must be a finite number (got {})",
                self.forecast.default_rating
            ))
            .into());
        }

        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(SurfcastError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                VALID_LOG_LEVELS.join(", ")
            ))
            .into());
        }

        if !VALID_LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(SurfcastError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                VALID_LOG_FORMATS.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::io::Write;
    use std::sync::{Mutex, MutexGuard};

    // Serializes tests that read SURFCAST__* variables
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    #[test]
    fn test_default_config() {
        let config = SurfcastConfig::default();
        assert_eq!(config.forecast.default_rating, 1.0);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = SurfcastConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_invalid_format() {
        let mut config = SurfcastConfig::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_non_finite_rating() {
        let mut config = SurfcastConfig::default();
        config.forecast.default_rating = f64::NAN;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Default rating"));
        assert!(matches!(
            err.downcast_ref::<SurfcastError>(),
            Some(SurfcastError::Config { .. })
        ));
    }

    #[test]
    fn test_apply_defaults_fills_empty_strings() {
        let mut config = SurfcastConfig::default();
        config.logging.level.clear();
        config.logging.format.clear();
        config.apply_defaults();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_from_file() {
        let _guard = env_lock();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[forecast]\ndefault_rating = 2.5\n\n[logging]\nlevel = \"debug\"").unwrap();

        let config = SurfcastConfig::load_from_path(Some(path)).unwrap();
        assert_eq!(config.forecast.default_rating, 2.5);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_rejects_invalid_file_values() {
        let _guard = env_lock();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nformat = \"yaml\"\n").unwrap();

        let result = SurfcastConfig::load_from_path(Some(path));
        assert!(result.is_err());
    }

    #[test]
    fn test_environment_overrides_file() {
        let _guard = env_lock();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[forecast]\ndefault_rating = 2.5\n").unwrap();

        // SAFETY: ENV_LOCK keeps other config tests from reading the environment concurrently
        unsafe {
            env::set_var("SURFCAST__FORECAST__DEFAULT_RATING", "4");
            env::set_var("SURFCAST__LOGGING__FORMAT", "json");
        }

        let result = SurfcastConfig::load_from_path(Some(path));

        // SAFETY: same as above
        unsafe {
            env::remove_var("SURFCAST__FORECAST__DEFAULT_RATING");
            env::remove_var("SURFCAST__LOGGING__FORMAT");
        }

        let config = result.unwrap();
        assert_eq!(config.forecast.default_rating, 4.0);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = SurfcastConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("surfcast"));
            assert!(path.to_string_lossy().ends_with("config.toml"));
        }
    }
}
