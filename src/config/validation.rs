//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check addresses parse and the resolver endpoint is a usable URL
//! - Validate value ranges (timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: RedirectorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::RedirectorConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid {field} address `{value}`: {reason}")]
    Address {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("invalid resolver endpoint `{value}`: {reason}")]
    ResolverEndpoint { value: String, reason: String },

    #[error("{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &RedirectorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = config.listener.bind_address.parse::<SocketAddr>() {
        errors.push(ValidationError::Address {
            field: "listener bind",
            value: config.listener.bind_address.clone(),
            reason: e.to_string(),
        });
    }

    match Url::parse(&config.resolver.endpoint) {
        Ok(url) if url.scheme() == "https" || url.scheme() == "http" => {}
        Ok(url) => errors.push(ValidationError::ResolverEndpoint {
            value: config.resolver.endpoint.clone(),
            reason: format!("unsupported scheme `{}`", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError::ResolverEndpoint {
            value: config.resolver.endpoint.clone(),
            reason: e.to_string(),
        }),
    }

    if config.resolver.lookup_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "resolver.lookup_timeout_secs",
        });
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "timeouts.request_secs",
        });
    }

    if config.observability.metrics_enabled {
        if let Err(e) = config.observability.metrics_address.parse::<SocketAddr>() {
            errors.push(ValidationError::Address {
                field: "metrics",
                value: config.observability.metrics_address.clone(),
                reason: e.to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
