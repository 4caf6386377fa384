//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::AppConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("auth.api_token must not be empty")]
    EmptyApiToken,

    #[error("listener.bind_address `{0}` is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("listener.request_timeout_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("listener.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,

    #[error("observability.metrics_address `{0}` is not a valid socket address")]
    InvalidMetricsAddress(String),
}

/// Check a parsed configuration for semantic problems.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.auth.api_token.is_empty() {
        errors.push(ValidationError::EmptyApiToken);
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if config.listener.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
