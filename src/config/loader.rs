//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", format_validation_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|err| err.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
///
/// Environment overrides are applied between parsing and validation, so a
/// token supplied via `API_TOKEN` passes validation even when the file
/// leaves it unset.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: AppConfig = toml::from_str(&content)?;
    apply_env_overrides(&mut config);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Defaults plus environment overrides, for running without a config file.
pub fn load_default() -> Result<AppConfig, ConfigError> {
    let mut config = AppConfig::default();
    apply_env_overrides(&mut config);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply process-environment overrides. The deployment environment wins
/// over the file for the secret, matching how the hosted service is keyed.
pub fn apply_env_overrides(config: &mut AppConfig) {
    if let Ok(token) = std::env::var("API_TOKEN") {
        if !token.is_empty() {
            config.auth.api_token = token;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_file_parses_with_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [auth]
            api_token = "secret"
            "#,
        )
        .unwrap();

        assert_eq!(config.auth.api_token, "secret");
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.listener.request_timeout_secs, 30);
    }

    #[test]
    fn test_full_file_parses() {
        let config: AppConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "127.0.0.1:3000"
            request_timeout_secs = 10
            max_body_bytes = 4096

            [auth]
            api_token = "secret"

            [observability]
            log_level = "debug"
            metrics_enabled = true
            metrics_address = "127.0.0.1:9100"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:3000");
        assert_eq!(config.listener.max_body_bytes, 4096);
        assert_eq!(config.observability.log_level, "debug");
        assert!(config.observability.metrics_enabled);
    }
}
