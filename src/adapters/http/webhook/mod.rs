//! HTTP adapter for the Creem billing endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CheckoutLinkResponse, ErrorResponse, HealthResponse, WebhookFailureResponse,
    WebhookRejectedResponse, WebhookSuccessResponse,
};
pub use handlers::{CheckoutSettings, WebhookApiError, WebhookAppState, SIGNATURE_HEADERS};
pub use routes::{billing_router, cors_layer};
