//! Configuration validation.
//!
//! Serde handles syntax; this module checks value ranges and formats.
//! Validation is a pure function over `LoadgenConfig` and reports every
//! violation, not just the first.

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::LoadgenConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `worker.tick_millis`.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Check a parsed configuration.
pub fn validate_config(config: &LoadgenConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if !config.probe.http_path.starts_with('/') {
        errors.push(ValidationError::new(
            "probe.http_path",
            "must start with '/'",
        ));
    }

    if config.probe.set_key.is_empty() {
        errors.push(ValidationError::new("probe.set_key", "must not be empty"));
    }

    if config.probe.exists_key.is_empty() {
        errors.push(ValidationError::new("probe.exists_key", "must not be empty"));
    }

    if config.probe.timeout_secs == Some(0) {
        errors.push(ValidationError::new(
            "probe.timeout_secs",
            "must be greater than zero when set",
        ));
    }

    if config.probe.key_value_timeout_millis == 0 {
        errors.push(ValidationError::new(
            "probe.key_value_timeout_millis",
            "must be greater than zero",
        ));
    }

    if config.worker.tick_millis == 0 {
        errors.push(ValidationError::new(
            "worker.tick_millis",
            "must be greater than zero",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
