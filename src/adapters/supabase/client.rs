//! Shared HTTP client for the Supabase REST surfaces.

use reqwest::{Client, Method, RequestBuilder, Response};
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Connection settings for a Supabase project.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://abc.supabase.co`.
    pub url: String,
    service_role_key: Secret<String>,
    /// Table holding subscription profiles.
    pub profiles_table: String,
    pub timeout: Duration,
}

impl SupabaseConfig {
    pub fn new(url: impl Into<String>, service_role_key: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            service_role_key: Secret::new(service_role_key.into()),
            profiles_table: "profiles".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_profiles_table(mut self, table: impl Into<String>) -> Self {
        self.profiles_table = table.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn service_role_key(&self) -> &str {
        self.service_role_key.expose_secret()
    }
}

/// Authenticated client shared by the Supabase adapters.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    config: SupabaseConfig,
    http: Client,
}

impl SupabaseClient {
    pub fn new(config: SupabaseConfig) -> Result<Self, DomainError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &SupabaseConfig {
        &self.config
    }

    /// Starts a request to `{url}{path}` carrying the service-role headers.
    pub(super) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let key = self.config.service_role_key();
        self.http
            .request(method, format!("{}{}", self.config.url, path))
            .header("apikey", key)
            .bearer_auth(key)
    }

    /// Sends a request, turning transport failures and non-2xx statuses
    /// into domain errors.
    pub(super) async fn send(
        &self,
        request: RequestBuilder,
        operation: &str,
    ) -> Result<Response, DomainError> {
        let response = request.send().await.map_err(|e| {
            let message = if e.is_timeout() {
                format!("{} timed out after {}s", operation, self.config.timeout.as_secs())
            } else if e.is_connect() {
                format!("{} connection failed: {}", operation, e)
            } else {
                format!("{} failed: {}", operation, e)
            };
            DomainError::new(ErrorCode::BackendUnavailable, message)
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(%status, error = %error_text, operation, "Supabase request failed");
            return Err(DomainError::new(
                ErrorCode::BackendRejected,
                format!("{} returned {}", operation, status),
            )
            .with_detail("status", status.as_u16().to_string()));
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder_works() {
        let config = SupabaseConfig::new("https://abc.supabase.co/", "service-key")
            .with_profiles_table("user_profiles")
            .with_timeout(Duration::from_secs(3));

        assert_eq!(config.url, "https://abc.supabase.co");
        assert_eq!(config.profiles_table, "user_profiles");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.service_role_key(), "service-key");
    }

    #[test]
    fn debug_output_hides_service_role_key() {
        let config = SupabaseConfig::new("https://abc.supabase.co", "super-secret-key");
        assert!(!format!("{:?}", config).contains("super-secret-key"));
    }

    #[test]
    fn requests_carry_service_role_headers() {
        let client =
            SupabaseClient::new(SupabaseConfig::new("https://abc.supabase.co", "key-1")).unwrap();

        let request = client
            .request(Method::GET, "/auth/v1/admin/users")
            .build()
            .unwrap();

        assert_eq!(request.url().as_str(), "https://abc.supabase.co/auth/v1/admin/users");
        assert_eq!(request.headers()["apikey"], "key-1");
        assert_eq!(request.headers()["authorization"], "Bearer key-1");
    }
}
