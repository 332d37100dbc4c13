//! Axum router configuration for the billing endpoints.

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};

use super::handlers::{
    checkout_link, handle_creem_webhook, health, webhook_preflight, WebhookAppState,
};

/// Create the billing router.
///
/// # Routes
/// - `POST /webhooks/creem` - Creem webhook (signature verified)
/// - `OPTIONS /webhooks/creem` - CORS preflight
/// - `GET /checkout/link` - Hosted checkout URL for the paid plan
/// - `GET /health` - Liveness probe
///
/// Any other method on the webhook path gets `405 Method Not Allowed`.
pub fn billing_router() -> Router<WebhookAppState> {
    Router::new()
        .route(
            "/webhooks/creem",
            post(handle_creem_webhook).options(webhook_preflight),
        )
        .route("/checkout/link", get(checkout_link))
        .route("/health", get(health))
}

/// Build the CORS layer.
///
/// An empty origin list allows any origin. The signature, not the origin,
/// is what authenticates a webhook.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            origins
                .iter()
                .filter_map(|origin| HeaderValue::from_str(origin).ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            HeaderName::from_static("authorization"),
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            HeaderName::from_static("content-type"),
            HeaderName::from_static("creem-signature"),
            HeaderName::from_static("x-creem-signature"),
        ])
        .max_age(Duration::from_secs(3600))
}
