//! Audit sink that emits one structured log event per webhook decision.
//!
//! Events go to the `audit` target so they can be routed separately with
//! `RUST_LOG=audit=info`.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::subscription::{DecisionOutcome, WebhookDecision};
use crate::ports::WebhookAuditSink;

/// Writes webhook decisions to the tracing subscriber.
#[derive(Debug, Clone, Default)]
pub struct TracingAuditSink;

impl TracingAuditSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl WebhookAuditSink for TracingAuditSink {
    async fn record(&self, decision: &WebhookDecision) -> Result<(), DomainError> {
        let event_type = decision.event_type.as_deref().unwrap_or("-");
        let event_id = decision.event_id.as_deref().unwrap_or("-");
        let recorded_at = &decision.recorded_at;

        match &decision.outcome {
            DecisionOutcome::Accepted {
                user_id,
                plan,
                status,
            } => tracing::info!(
                target: "audit",
                recorded_at = %recorded_at,
                event_type,
                event_id,
                user_id = %user_id,
                plan = plan.as_str(),
                status = status.as_str(),
                "webhook.accepted"
            ),
            DecisionOutcome::NoOp { reason } => tracing::info!(
                target: "audit",
                recorded_at = %recorded_at,
                event_type,
                event_id,
                reason = ?reason,
                "webhook.no_op"
            ),
            DecisionOutcome::Rejected { reason } => tracing::warn!(
                target: "audit",
                recorded_at = %recorded_at,
                reason = %reason,
                "webhook.rejected"
            ),
            DecisionOutcome::Failed { message } => tracing::error!(
                target: "audit",
                recorded_at = %recorded_at,
                event_type,
                event_id,
                message = %message,
                "webhook.failed"
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::subscription::NoOpReason;

    #[tokio::test]
    async fn recording_never_fails() {
        let sink = TracingAuditSink::new();
        let decision = WebhookDecision::new(DecisionOutcome::NoOp {
            reason: NoOpReason::UnhandledEvent,
        });

        assert!(sink.record(&decision).await.is_ok());
    }
}
