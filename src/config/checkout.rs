//! Hosted checkout configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Creem hosted checkout configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutConfig {
    /// Base URL of the hosted payment page
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Creem product for the paid plan; unset disables checkout links
    pub product_id: Option<String>,

    /// Where Creem redirects after a successful payment
    pub success_url: Option<String>,
}

impl CheckoutConfig {
    /// Validate checkout configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_http_url(&self.base_url) {
            return Err(ValidationError::InvalidUrl("CHECKOUT__BASE_URL"));
        }
        if let Some(success_url) = &self.success_url {
            if !is_http_url(success_url) {
                return Err(ValidationError::InvalidUrl("CHECKOUT__SUCCESS_URL"));
            }
        }
        Ok(())
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            product_id: None,
            success_url: None,
        }
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn default_base_url() -> String {
    "https://www.creem.io/payment".to_string()
}
