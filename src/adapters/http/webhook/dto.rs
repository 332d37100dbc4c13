//! HTTP DTOs for the webhook, checkout, and health endpoints.
//!
//! Webhook response bodies are part of the contract with Creem and must not
//! change shape.

use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════════
// Webhook Responses
// ════════════════════════════════════════════════════════════════════════════════

/// 200 body for every accepted delivery, including no-ops.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebhookSuccessResponse {
    pub success: bool,
    pub message: String,
}

impl WebhookSuccessResponse {
    pub fn processed() -> Self {
        Self {
            success: true,
            message: "Webhook processed successfully".to_string(),
        }
    }
}

/// 400/401 body for verification failures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebhookRejectedResponse {
    pub success: bool,
    pub error: String,
}

impl WebhookRejectedResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// 500 body for processing failures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebhookFailureResponse {
    pub error: String,
    pub details: String,
}

impl WebhookFailureResponse {
    pub fn new(details: impl Into<String>) -> Self {
        Self {
            error: "Failed to process webhook".to_string(),
            details: details.into(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Checkout
// ════════════════════════════════════════════════════════════════════════════════

/// Query for `GET /checkout/link`.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutLinkQuery {
    pub email: String,
}

/// Hosted checkout URL for the paid plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutLinkResponse {
    pub url: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Misc
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Standard error response for non-webhook endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}
