//! Subscription domain module.
//!
//! Turns verified Creem webhook deliveries into subscription profile
//! overwrites.
//!
//! # Module Structure
//!
//! - `plan` / `status` - Profile column values
//! - `profile` - SubscriptionProfile and the SubscriptionUpdate overwrite
//! - `payment_event` - Payload shape detection and normalization
//! - `webhook_verifier` - HMAC-SHA256 signature verification
//! - `webhook_stage` - Request lifecycle state machine
//! - `decision` - Audit record per delivery
//! - `checkout` - Hosted checkout links

mod checkout;
mod decision;
mod payment_event;
mod plan;
mod profile;
mod status;
mod webhook_errors;
mod webhook_stage;
mod webhook_verifier;

pub use checkout::checkout_url;
pub use decision::{DecisionOutcome, NoOpReason, WebhookDecision};
pub use payment_event::{EventKind, PayloadShape, PaymentEvent};
pub use plan::SubscriptionPlan;
pub use profile::{SubscriptionProfile, SubscriptionUpdate};
pub use status::SubscriptionStatus;
pub use webhook_errors::WebhookError;
pub use webhook_stage::WebhookStage;
pub use webhook_verifier::{
    compute_signature, CreemWebhookVerifier, RejectionReason, WebhookVerificationResult,
};
