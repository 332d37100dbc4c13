//! Webhook verification configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Creem webhook configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookConfig {
    /// Creem webhook signing secret
    pub secret: Option<Secret<String>>,

    /// Accept deliveries without a signature header (development only)
    #[serde(default)]
    pub allow_unsigned: bool,
}

impl WebhookConfig {
    /// The signing secret, if set and non-blank.
    pub fn secret(&self) -> Option<&str> {
        self.secret
            .as_ref()
            .map(|s| s.expose_secret().as_str())
            .filter(|s| !s.trim().is_empty())
    }

    /// Validate webhook configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.secret().is_none() {
            return Err(ValidationError::MissingRequired("WEBHOOK__SECRET"));
        }
        if self.allow_unsigned && *environment == Environment::Production {
            return Err(ValidationError::UnsignedWebhooksInProduction);
        }
        Ok(())
    }
}
