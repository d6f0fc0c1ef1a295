//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Flag missing or malformed upstream credentials
//! - Validate value ranges (body limit > 0, metrics address parses)
//!
//! # Design Decisions
//! - Returns all validation issues, not just first
//! - Credential issues are warnings: the gateway still starts and every
//!   upstream call fails until they are fixed
//! - Validation is pure function: GatewayConfig → Vec<ValidationError>

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is not set")]
    MissingValue(&'static str),

    #[error("upstream base URL '{0}' is not a valid URL")]
    InvalidBaseUrl(String),

    #[error("http.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,

    #[error("metrics address '{0}' is not a valid socket address")]
    InvalidMetricsAddress(String),
}

impl ValidationError {
    /// Whether this finding should stop startup.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ValidationError::ZeroBodyLimit | ValidationError::InvalidMetricsAddress(_)
        )
    }
}

/// Check a configuration, returning every finding.
pub fn validate_config(config: &GatewayConfig) -> Vec<ValidationError> {
    let mut findings = Vec::new();
    let upstream = &config.upstream;

    if upstream.base_url.is_empty() {
        findings.push(ValidationError::MissingValue("upstream base URL"));
    } else if url::Url::parse(&upstream.base_url).is_err() {
        findings.push(ValidationError::InvalidBaseUrl(upstream.base_url.clone()));
    }
    if upstream.username.is_empty() {
        findings.push(ValidationError::MissingValue("upstream username"));
    }
    if upstream.password.is_empty() {
        findings.push(ValidationError::MissingValue("upstream password"));
    }

    if config.http.max_body_bytes == 0 {
        findings.push(ValidationError::ZeroBodyLimit);
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        findings.push(ValidationError::InvalidMetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    findings
}
