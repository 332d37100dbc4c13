//! Supabase configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Supabase project configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseConfig {
    /// Project URL (e.g., https://abc.supabase.co)
    pub url: String,

    /// Service-role key; bypasses row level security
    pub service_role_key: Secret<String>,

    /// Table holding subscription profiles
    #[serde(default = "default_profiles_table")]
    pub profiles_table: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl SupabaseConfig {
    /// Validate Supabase configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("SUPABASE__URL"));
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ValidationError::InvalidUrl("SUPABASE__URL"));
        }
        if *environment == Environment::Production && !self.url.starts_with("https://") {
            return Err(ValidationError::UrlMustBeHttps("SUPABASE__URL"));
        }
        if self.service_role_key.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("SUPABASE__SERVICE_ROLE_KEY"));
        }
        if !is_table_name(&self.profiles_table) {
            return Err(ValidationError::InvalidTableName);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 60 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn is_table_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn default_profiles_table() -> String {
    "profiles".to_string()
}

fn default_timeout() -> u64 {
    10
}
