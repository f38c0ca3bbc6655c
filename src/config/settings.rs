//! Application settings and configuration
//!
//! Module parameters come from the automation framework; this is the
//! process-level configuration around them, loaded from environment
//! variables with defaults.

use anyhow::Result;
use std::env;

/// Log levels accepted for `LOG_LEVEL`
const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Main application settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub app_name: String,
    pub app_version: String,

    /// Default tracing filter; `RUST_LOG` takes precedence
    pub log_level: String,

    /// Bedrock Runtime endpoint override (local mocks)
    pub bedrock_endpoint_url: Option<String>,
}

impl Settings {
    /// Load settings from environment variables with defaults
    pub fn load() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let settings = Self {
            app_name: env_or_default("APP_NAME", "bedrock-prompt"),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            log_level: env_or_default("LOG_LEVEL", "warn").to_lowercase(),
            bedrock_endpoint_url: env::var("BEDROCK_ENDPOINT_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
        };

        settings.validate()?;

        Ok(settings)
    }

    /// Validate settings
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            anyhow::bail!(
                "Invalid LOG_LEVEL: {}. Expected one of: {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            );
        }

        if let Some(url) = &self.bedrock_endpoint_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                anyhow::bail!("BEDROCK_ENDPOINT_URL must be an http(s) URL, got: {}", url);
            }
        }

        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "bedrock-prompt".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            log_level: "warn".to_string(),
            bedrock_endpoint_url: None,
        }
    }
}

/// Helper function to get environment variable with default
fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.app_name, "bedrock-prompt");
        assert_eq!(settings.log_level, "warn");
        assert!(settings.bedrock_endpoint_url.is_none());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_invalid_log_level() {
        let settings = Settings {
            log_level: "verbose".to_string(),
            ..Settings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("Invalid LOG_LEVEL"));
    }

    #[test]
    fn test_endpoint_must_be_http() {
        let mut settings = Settings::default();
        settings.bedrock_endpoint_url = Some("localhost:4566".to_string());
        assert!(settings.validate().is_err());

        settings.bedrock_endpoint_url = Some("http://localhost:4566".to_string());
        assert!(settings.validate().is_ok());
    }
}
