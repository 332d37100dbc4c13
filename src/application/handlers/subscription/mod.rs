//! Subscription handlers.
//!
//! ## Commands
//! - Processing Creem payment webhooks
//! - Reconciling a payment event into a subscription profile

mod handle_creem_webhook;
mod reconcile_subscription;

pub use handle_creem_webhook::{
    HandleCreemWebhookCommand, HandleCreemWebhookHandler, HandleCreemWebhookResult,
};
pub use reconcile_subscription::{ReconcileResult, ReconcileSubscriptionHandler};
