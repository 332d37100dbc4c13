//! In-memory webhook audit sink.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::foundation::DomainError;
use crate::domain::subscription::WebhookDecision;
use crate::ports::WebhookAuditSink;

/// Captures webhook decisions for assertions.
pub struct InMemoryAuditSink {
    decisions: RwLock<Vec<WebhookDecision>>,
}

impl InMemoryAuditSink {
    pub fn new() -> Self {
        Self {
            decisions: RwLock::new(Vec::new()),
        }
    }

    /// Returns all recorded decisions, oldest first.
    pub fn decisions(&self) -> Vec<WebhookDecision> {
        self.decisions
            .read()
            .expect("InMemoryAuditSink: decisions lock poisoned")
            .clone()
    }
}

impl Default for InMemoryAuditSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WebhookAuditSink for InMemoryAuditSink {
    async fn record(&self, decision: &WebhookDecision) -> Result<(), DomainError> {
        self.decisions
            .write()
            .expect("InMemoryAuditSink: decisions write lock poisoned")
            .push(decision.clone());
        Ok(())
    }
}
