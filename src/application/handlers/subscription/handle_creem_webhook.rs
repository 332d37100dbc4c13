//! HandleCreemWebhookHandler - Command handler for Creem payment webhooks.
//!
//! Drives one delivery through verification, normalization, and
//! reconciliation, and records a [`WebhookDecision`] for every outcome.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::foundation::{StateMachine, UserId};
use crate::domain::subscription::{
    CreemWebhookVerifier, DecisionOutcome, NoOpReason, PaymentEvent, SubscriptionPlan,
    SubscriptionStatus, WebhookDecision, WebhookError, WebhookStage, WebhookVerificationResult,
};
use crate::ports::WebhookAuditSink;

use super::reconcile_subscription::{ReconcileResult, ReconcileSubscriptionHandler};

/// Command to handle a Creem webhook.
#[derive(Debug, Clone)]
pub struct HandleCreemWebhookCommand {
    /// Raw request body, exactly as received.
    pub payload: Vec<u8>,
    /// Value of the signature header, if any.
    pub signature: Option<String>,
}

/// Result of webhook processing.
///
/// Both variants are reported to Creem as success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleCreemWebhookResult {
    /// Profile overwritten.
    SubscriptionUpdated {
        user_id: UserId,
        plan: SubscriptionPlan,
        status: SubscriptionStatus,
    },
    /// Event accepted, nothing changed.
    Acknowledged(NoOpReason),
}

/// Handler for processing Creem webhooks.
pub struct HandleCreemWebhookHandler {
    verifier: Arc<CreemWebhookVerifier>,
    reconciler: ReconcileSubscriptionHandler,
    audit: Arc<dyn WebhookAuditSink>,
}

impl HandleCreemWebhookHandler {
    pub fn new(
        verifier: Arc<CreemWebhookVerifier>,
        reconciler: ReconcileSubscriptionHandler,
        audit: Arc<dyn WebhookAuditSink>,
    ) -> Self {
        Self {
            verifier,
            reconciler,
            audit,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandleCreemWebhookCommand,
    ) -> Result<HandleCreemWebhookResult, WebhookError> {
        let stage = advance(WebhookStage::Received, WebhookStage::Verifying);

        // 1. Verify signature over the raw body
        match self
            .verifier
            .verify(&cmd.payload, cmd.signature.as_deref())
        {
            WebhookVerificationResult::Verified => {}
            WebhookVerificationResult::Skipped(reason) => {
                warn!(%reason, "Webhook signature verification skipped");
            }
            WebhookVerificationResult::Rejected(reason) => {
                warn!(%reason, "Webhook rejected");
                self.record(WebhookDecision::new(DecisionOutcome::Rejected {
                    reason: reason.to_string(),
                }))
                .await;
                advance(stage, WebhookStage::Responded);
                return Err(reason.into());
            }
        }

        let stage = advance(stage, WebhookStage::Processing);

        // 2. Parse and normalize
        let body: serde_json::Value = match serde_json::from_slice(&cmd.payload) {
            Ok(body) => body,
            Err(e) => {
                let err = WebhookError::from(e);
                error!(error = %err, "Error processing webhook");
                self.record(WebhookDecision::new(DecisionOutcome::Failed {
                    message: err.details(),
                }))
                .await;
                advance(stage, WebhookStage::Responded);
                return Err(err);
            }
        };
        let event = PaymentEvent::normalize(&body);
        info!(
            event_type = ?event.event_type,
            event_id = ?event.event_id,
            shape = ?event.shape,
            kind = ?event.kind,
            "Processing Creem webhook"
        );

        // 3. Reconcile
        let result = self.reconciler.handle(&event).await;
        advance(stage, WebhookStage::Responded);

        match result {
            Ok(ReconcileResult::Updated { user_id, update }) => {
                self.record(WebhookDecision::for_event(
                    &event,
                    DecisionOutcome::Accepted {
                        user_id: user_id.clone(),
                        plan: update.plan(),
                        status: update.status(),
                    },
                ))
                .await;
                Ok(HandleCreemWebhookResult::SubscriptionUpdated {
                    user_id,
                    plan: update.plan(),
                    status: update.status(),
                })
            }
            Ok(ReconcileResult::NoOp(reason)) => {
                self.record(WebhookDecision::for_event(
                    &event,
                    DecisionOutcome::NoOp { reason },
                ))
                .await;
                Ok(HandleCreemWebhookResult::Acknowledged(reason))
            }
            Err(e) => {
                let err = WebhookError::from(e);
                error!(error = %err, "Error processing webhook");
                self.record(WebhookDecision::for_event(
                    &event,
                    DecisionOutcome::Failed {
                        message: err.details(),
                    },
                ))
                .await;
                Err(err)
            }
        }
    }

    async fn record(&self, decision: WebhookDecision) {
        if let Err(e) = self.audit.record(&decision).await {
            warn!(error = %e, "Failed to record webhook decision");
        }
    }
}

fn advance(from: WebhookStage, to: WebhookStage) -> WebhookStage {
    debug_assert!(from.can_transition_to(&to), "{:?} -> {:?}", from, to);
    debug!(from = ?from, to = ?to, "Webhook stage");
    to
}
