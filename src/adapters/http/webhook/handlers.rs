//! HTTP handlers for the Creem webhook, checkout link, and health endpoints.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::application::handlers::subscription::{
    HandleCreemWebhookCommand, HandleCreemWebhookHandler, ReconcileSubscriptionHandler,
};
use crate::domain::foundation::EmailAddress;
use crate::domain::subscription::{checkout_url, CreemWebhookVerifier, WebhookError};
use crate::ports::{IdentityDirectory, ProfileRepository, WebhookAuditSink};

use super::dto::{
    CheckoutLinkQuery, CheckoutLinkResponse, ErrorResponse, HealthResponse,
    WebhookFailureResponse, WebhookRejectedResponse, WebhookSuccessResponse,
};

/// Signature headers, in lookup order.
pub const SIGNATURE_HEADERS: [&str; 2] = ["creem-signature", "x-creem-signature"];

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Hosted checkout settings.
#[derive(Debug, Clone)]
pub struct CheckoutSettings {
    pub base_url: String,
    /// `None` disables the checkout link endpoint.
    pub product_id: Option<String>,
    pub success_url: Option<String>,
}

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct WebhookAppState {
    pub verifier: Arc<CreemWebhookVerifier>,
    pub identity_directory: Arc<dyn IdentityDirectory>,
    pub profile_repository: Arc<dyn ProfileRepository>,
    pub audit_sink: Arc<dyn WebhookAuditSink>,
    pub checkout: CheckoutSettings,
}

impl WebhookAppState {
    pub fn webhook_handler(&self) -> HandleCreemWebhookHandler {
        HandleCreemWebhookHandler::new(
            self.verifier.clone(),
            ReconcileSubscriptionHandler::new(
                self.identity_directory.clone(),
                self.profile_repository.clone(),
            ),
            self.audit_sink.clone(),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Webhook
// ════════════════════════════════════════════════════════════════════════════════

/// POST /webhooks/creem - Handle Creem webhook events
pub async fn handle_creem_webhook(
    State(state): State<WebhookAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, WebhookApiError> {
    let cmd = HandleCreemWebhookCommand {
        payload: body.to_vec(),
        signature: signature_from(&headers),
    };

    state.webhook_handler().handle(cmd).await?;

    Ok(Json(WebhookSuccessResponse::processed()))
}

/// OPTIONS /webhooks/creem - Preflight without a CORS layer in front
pub async fn webhook_preflight() -> StatusCode {
    StatusCode::OK
}

fn signature_from(headers: &HeaderMap) -> Option<String> {
    SIGNATURE_HEADERS
        .iter()
        .find_map(|name| headers.get(*name))
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

// ════════════════════════════════════════════════════════════════════════════════
// Checkout & Health
// ════════════════════════════════════════════════════════════════════════════════

/// GET /checkout/link?email= - Hosted checkout URL prefilled with the email
pub async fn checkout_link(
    State(state): State<WebhookAppState>,
    Query(query): Query<CheckoutLinkQuery>,
) -> Result<Json<CheckoutLinkResponse>, CheckoutApiError> {
    let product_id = state
        .checkout
        .product_id
        .as_deref()
        .ok_or(CheckoutApiError::NotConfigured)?;
    let email = EmailAddress::parse(&query.email)
        .map_err(|e| CheckoutApiError::InvalidEmail(e.to_string()))?;

    let url = checkout_url(
        &state.checkout.base_url,
        product_id,
        &email,
        state.checkout.success_url.as_deref(),
    )
    .map_err(|e| {
        tracing::error!(error = %e, "Failed to build checkout link");
        CheckoutApiError::Internal
    })?;

    Ok(Json(CheckoutLinkResponse {
        url: url.to_string(),
    }))
}

/// GET /health - Liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts webhook errors to the Creem-facing bodies.
#[derive(Debug)]
pub struct WebhookApiError(WebhookError);

impl From<WebhookError> for WebhookApiError {
    fn from(err: WebhookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        match &self.0 {
            WebhookError::SignatureRejected | WebhookError::MissingVerificationMaterial => {
                (status, Json(WebhookRejectedResponse::new(self.0.to_string()))).into_response()
            }
            WebhookError::MalformedEvent(_) | WebhookError::Backend(_) => {
                (status, Json(WebhookFailureResponse::new(self.0.details()))).into_response()
            }
        }
    }
}

/// Errors from the checkout link endpoint.
#[derive(Debug)]
pub enum CheckoutApiError {
    NotConfigured,
    InvalidEmail(String),
    Internal,
}

impl IntoResponse for CheckoutApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            CheckoutApiError::NotConfigured => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("CHECKOUT_UNAVAILABLE", "No checkout product is configured"),
            ),
            CheckoutApiError::InvalidEmail(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("VALIDATION_FAILED", message),
            ),
            CheckoutApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("INTERNAL_ERROR", "Failed to build checkout link"),
            ),
        };
        (status, Json(error)).into_response()
    }
}
