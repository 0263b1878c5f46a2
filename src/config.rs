//! Configuration management for the AQI advisor
//!
//! Handles loading configuration from files and environment variables,
//! and validates the settings the service cannot start without.

use crate::AqiError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

const ENV_PREFIX: &str = "AQI_ADVISOR";
const OPENWEATHER_KEY_PLACEHOLDER: &str = "YOUR_OPENWEATHER_API_KEY_HERE";
const GEMINI_KEY_PLACEHOLDER: &str = "YOUR_GEMINI_API_KEY_HERE";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// HTTP server settings
    pub server: ServerConfig,
    /// OpenWeather geocoding and air pollution API
    pub openweather: OpenWeatherConfig,
    /// Gemini generative-text API
    pub gemini: GeminiConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served at `/`
    pub static_dir: String,
}

/// OpenWeather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenWeatherConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
}

/// Gemini API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            static_dir: "static".to_string(),
        }
    }
}

impl Default for OpenWeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openweathermap.org".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-1.5-flash".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AdvisorConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|p| p.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // AQI_ADVISOR_SERVER__PORT=8080 style overrides
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // The conventional bare key variables win over everything else
        builder = builder
            .set_override_option("openweather.api_key", env::var("OPENWEATHER_API_KEY").ok())
            .with_context(|| "Failed to apply OPENWEATHER_API_KEY")?
            .set_override_option("gemini.api_key", env::var("GEMINI_API_KEY").ok())
            .with_context(|| "Failed to apply GEMINI_API_KEY")?;

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: AdvisorConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("aqi-advisor").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Both provider keys must be set to something other than a placeholder
    pub fn validate_api_keys(&self) -> Result<()> {
        validate_key("OPENWEATHER_API_KEY", self.openweather.api_key.as_deref(), OPENWEATHER_KEY_PLACEHOLDER)?;
        validate_key("GEMINI_API_KEY", self.gemini.api_key.as_deref(), GEMINI_KEY_PLACEHOLDER)?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        for (name, timeout) in [
            ("OpenWeather", self.openweather.timeout_seconds),
            ("Gemini", self.gemini.timeout_seconds),
        ] {
            if !(1..=300).contains(&timeout) {
                return Err(AqiError::config(format!(
                    "{name} timeout must be between 1 and 300 seconds, got {timeout}"
                ))
                .into());
            }
        }

        if self.server.port == 0 {
            return Err(AqiError::config("Server port cannot be 0").into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(AqiError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(AqiError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("OpenWeather", &self.openweather.base_url),
            ("Gemini", &self.gemini.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(AqiError::config(format!(
                    "{name} base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        if self.gemini.model.trim().is_empty() {
            return Err(AqiError::config("Gemini model name cannot be empty").into());
        }

        Ok(())
    }
}

fn validate_key(name: &str, key: Option<&str>, placeholder: &str) -> Result<()> {
    match key.map(str::trim) {
        None | Some("") => Err(AqiError::config(format!("{name} is not set.")).into()),
        Some(k) if k == placeholder => {
            Err(AqiError::config(format!("{name} is still set to its placeholder value.")).into())
        }
        Some(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn valid_config() -> AdvisorConfig {
        let mut config = AdvisorConfig::default();
        config.openweather.api_key = Some("openweather_key_123".to_string());
        config.gemini.api_key = Some("gemini_key_123".to_string());
        config
    }

    #[test]
    fn test_default_config() {
        let config = AdvisorConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.static_dir, "static");
        assert_eq!(config.openweather.base_url, "https://api.openweathermap.org");
        assert_eq!(config.openweather.timeout_seconds, 30);
        assert_eq!(config.gemini.model, "gemini-1.5-flash");
        assert_eq!(config.logging.level, "info");
        assert!(config.openweather.api_key.is_none());
    }

    #[test]
    fn test_missing_keys_rejected() {
        let config = AdvisorConfig::default();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("OPENWEATHER_API_KEY is not set"));

        let mut config = valid_config();
        config.gemini.api_key = Some("   ".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY is not set"));
    }

    #[test]
    fn test_placeholder_keys_rejected() {
        let mut config = valid_config();
        config.openweather.api_key = Some(OPENWEATHER_KEY_PLACEHOLDER.to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("placeholder"));

        let mut config = valid_config();
        config.gemini.api_key = Some(GEMINI_KEY_PLACEHOLDER.to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = valid_config();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_timeout_range() {
        let mut config = valid_config();
        config.gemini.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("timeout must be between"));

        let mut config = valid_config();
        config.openweather.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_base_url() {
        let mut config = valid_config();
        config.openweather.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = env::temp_dir().join(format!("aqi-advisor-test-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[server]
port = 8080

[openweather]
api_key = "file_openweather_key"

[gemini]
api_key = "file_gemini_key"
model = "gemini-1.5-pro"
"#
        )
        .unwrap();

        let result = AdvisorConfig::load_from_path(Some(path.clone()));
        std::fs::remove_file(&path).unwrap();

        let config = result.unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.gemini.model, "gemini-1.5-pro");
        assert_eq!(config.logging.format, "pretty");
        assert!(config.openweather.api_key.is_some());
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = AdvisorConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("aqi-advisor"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
