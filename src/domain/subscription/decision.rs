//! Audit record of what the service decided for one webhook delivery.

use serde::Serialize;

use crate::domain::foundation::{Timestamp, UserId};

use super::payment_event::PaymentEvent;
use super::plan::SubscriptionPlan;
use super::status::SubscriptionStatus;

/// Why an accepted event changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoOpReason {
    UnhandledEvent,
    MissingCustomerEmail,
    UserNotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DecisionOutcome {
    /// Profile overwritten.
    Accepted {
        user_id: UserId,
        plan: SubscriptionPlan,
        status: SubscriptionStatus,
    },
    /// Acknowledged without a write.
    NoOp { reason: NoOpReason },
    /// Failed verification.
    Rejected { reason: String },
    /// Verified but processing errored.
    Failed { message: String },
}

/// One record per webhook delivery that reached the handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookDecision {
    pub recorded_at: Timestamp,
    pub event_type: Option<String>,
    pub event_id: Option<String>,
    #[serde(flatten)]
    pub outcome: DecisionOutcome,
}

impl WebhookDecision {
    pub fn new(outcome: DecisionOutcome) -> Self {
        Self {
            recorded_at: Timestamp::now(),
            event_type: None,
            event_id: None,
            outcome,
        }
    }

    /// Decision for a normalized event.
    pub fn for_event(event: &PaymentEvent, outcome: DecisionOutcome) -> Self {
        Self {
            event_type: event.event_type.clone(),
            event_id: event.event_id.clone(),
            ..Self::new(outcome)
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self.outcome, DecisionOutcome::Accepted { .. })
    }
}
