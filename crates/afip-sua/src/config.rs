//! # Authentication Policy
//!
//! [`AuthConfig`] decides which tickets are acceptable. Every relaxation
//! defaults to off, so an empty configuration only accepts signed,
//! unexpired tickets checked against a trusted key.
//!
//! ```yaml
//! trusted_key: 3b6a27bcceb6a42d62a3a8d02a6f0d73653215771de243a63ac048a18b59da29
//! allow_unsigned: false
//! allow_untrusted: false
//! allow_expired: false
//! allowed_services:
//!   - padron
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::signature::TrustedKey;

/// Ticket acceptance policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Accept tickets that come without a signature. Test setups only.
    pub allow_unsigned: bool,
    /// Skip signature checks when no trusted key is configured.
    pub allow_untrusted: bool,
    /// Accept tickets past their expiration time.
    pub allow_expired: bool,
    /// Services a ticket may be issued for. Empty means any service.
    pub allowed_services: Vec<String>,
    /// Public key of the ticket issuer.
    pub trusted_key: Option<TrustedKey>,
}

impl AuthConfig {
    /// Parse a YAML configuration document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, AuthError> {
        serde_yaml::from_str(yaml).map_err(|e| AuthError::Config(format!("invalid YAML: {e}")))
    }

    /// Read and parse a YAML configuration file.
    pub fn from_yaml_file(path: &Path) -> Result<Self, AuthError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AuthError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let config = Self::from_yaml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            trusted_key = config.trusted_key.is_some(),
            "loaded authentication config"
        );
        Ok(config)
    }

    /// Whether a ticket for `service` passes the allow list.
    pub fn allows_service(&self, service: &str) -> bool {
        self.allowed_services.is_empty() || self.allowed_services.iter().any(|s| s == service)
    }
}
