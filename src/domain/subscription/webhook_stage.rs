//! Lifecycle of one webhook request.

use crate::domain::foundation::StateMachine;

/// Stage of a webhook request, from arrival to response.
///
/// `Received → Verifying → Processing → Responded`, with early exits to
/// `Responded` from `Received` (preflight) and `Verifying` (rejection).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookStage {
    Received,
    Verifying,
    Processing,
    Responded,
}

impl StateMachine for WebhookStage {
    fn can_transition_to(&self, target: &Self) -> bool {
        use WebhookStage::*;
        matches!(
            (self, target),
            (Received, Verifying)
                | (Received, Responded)
                | (Verifying, Processing)
                | (Verifying, Responded)
                | (Processing, Responded)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use WebhookStage::*;
        match self {
            Received => vec![Verifying, Responded],
            Verifying => vec![Processing, Responded],
            Processing => vec![Responded],
            Responded => vec![],
        }
    }
}
