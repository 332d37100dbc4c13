//! Webhook error types for Creem webhook handling.
//!
//! Defines the error conditions that end a webhook request early, with HTTP
//! status code mapping and retryability semantics. Unknown event types and
//! unknown customers are not errors; they are acknowledged no-ops.

use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::foundation::DomainError;

/// Errors that occur during webhook processing.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Signature present but does not match the body.
    #[error("Invalid signature")]
    SignatureRejected,

    /// Signature header or signing secret absent.
    #[error("Missing signature or secret")]
    MissingVerificationMaterial,

    /// Body is not parseable JSON.
    #[error("Malformed event: {0}")]
    MalformedEvent(String),

    /// Identity lookup or profile write failed.
    #[error("Backend error: {0}")]
    Backend(String),
}

impl WebhookError {
    /// Returns true if Creem should retry delivering this webhook.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WebhookError::Backend(_))
    }

    /// Maps the error to an HTTP status code.
    ///
    /// - 401: signature mismatch
    /// - 400: nothing to verify against
    /// - 500: everything else; Creem retries non-2xx deliveries
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::SignatureRejected => StatusCode::UNAUTHORIZED,
            WebhookError::MissingVerificationMaterial => StatusCode::BAD_REQUEST,
            WebhookError::MalformedEvent(_) | WebhookError::Backend(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message reported to the caller in the `details` field.
    pub fn details(&self) -> String {
        match self {
            WebhookError::MalformedEvent(message) | WebhookError::Backend(message) => {
                message.clone()
            }
            other => other.to_string(),
        }
    }
}

impl From<DomainError> for WebhookError {
    fn from(err: DomainError) -> Self {
        WebhookError::Backend(err.to_string())
    }
}

impl From<serde_json::Error> for WebhookError {
    fn from(err: serde_json::Error) -> Self {
        WebhookError::MalformedEvent(err.to_string())
    }
}
