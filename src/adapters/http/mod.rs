//! HTTP adapters - REST API implementations.

pub mod webhook;

pub use webhook::{billing_router, cors_layer, WebhookAppState};
