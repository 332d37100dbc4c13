//! Webhook audit port.
//!
//! Receives one [`WebhookDecision`] per delivery so decisions can be
//! inspected without parsing log output.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::subscription::WebhookDecision;

#[async_trait]
pub trait WebhookAuditSink: Send + Sync {
    /// Record a decision. Failures never change the webhook response.
    async fn record(&self, decision: &WebhookDecision) -> Result<(), DomainError>;
}
