//! Configuration validation.
//!
//! Semantic checks only; serde already handled the syntax. Every problem is
//! reported, not just the first one.

use std::fmt;
use std::net::SocketAddr;

use alloy::primitives::Address;

use crate::config::schema::{DeskConfig, StoreKind};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
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

/// Validate a configuration, collecting all errors.
pub fn validate_config(config: &DeskConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Some(address) = config.contract.address.as_deref() {
        if !address.is_empty() && address.parse::<Address>().is_err() {
            errors.push(ValidationError::new(
                "contract.address",
                format!("'{}' is not a valid contract address", address),
            ));
        }
    }

    if let Err(e) = config.chain.rpc_url.parse::<url::Url>() {
        errors.push(ValidationError::new(
            "chain.rpc_url",
            format!("invalid URL '{}': {}", config.chain.rpc_url, e),
        ));
    }

    if config.chain.chain_id == 0 {
        errors.push(ValidationError::new("chain.chain_id", "must be non-zero"));
    }

    match config.store.kind {
        StoreKind::File if config.store.path.trim().is_empty() => {
            errors.push(ValidationError::new(
                "store.path",
                "required for the file store",
            ));
        }
        StoreKind::Http => {
            if let Err(e) = config.store.base_url.parse::<url::Url>() {
                errors.push(ValidationError::new(
                    "store.base_url",
                    format!("invalid URL '{}': {}", config.store.base_url, e),
                ));
            }
        }
        StoreKind::File => {}
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!(
                "'{}' is not a socket address",
                config.observability.metrics_address
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&DeskConfig::default()).is_ok());
    }

    #[test]
    fn test_reports_every_error() {
        let mut config = DeskConfig::default();
        config.contract.address = Some("not-an-address".to_string());
        config.chain.rpc_url = "::nope".to_string();
        config.chain.chain_id = 0;
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "localhost".to_string();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "contract.address",
                "chain.rpc_url",
                "chain.chain_id",
                "observability.metrics_address",
            ]
        );
    }

    #[test]
    fn test_empty_address_is_tolerated() {
        let mut config = DeskConfig::default();
        config.contract.address = Some(String::new());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_http_store_needs_url() {
        let mut config = DeskConfig::default();
        config.store.kind = StoreKind::Http;
        config.store.base_url = "no scheme".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "store.base_url");
    }
}
