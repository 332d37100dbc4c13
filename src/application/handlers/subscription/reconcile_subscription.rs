//! ReconcileSubscriptionHandler - Applies a normalized payment event to the
//! owning user's subscription profile.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::foundation::{DomainError, EmailAddress, UserId};
use crate::domain::subscription::{NoOpReason, PaymentEvent, SubscriptionUpdate};
use crate::ports::{IdentityDirectory, ProfileRepository};

/// Result of reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileResult {
    /// Profile overwritten with `update`.
    Updated {
        user_id: UserId,
        update: SubscriptionUpdate,
    },
    /// Nothing written.
    NoOp(NoOpReason),
}

/// Resolves the customer by email, then overwrites their profile.
///
/// Lookup and write are separate backend calls with no isolation between
/// them; concurrent deliveries resolve as last write wins.
pub struct ReconcileSubscriptionHandler {
    directory: Arc<dyn IdentityDirectory>,
    profiles: Arc<dyn ProfileRepository>,
}

impl ReconcileSubscriptionHandler {
    pub fn new(directory: Arc<dyn IdentityDirectory>, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self {
            directory,
            profiles,
        }
    }

    pub async fn handle(&self, event: &PaymentEvent) -> Result<ReconcileResult, DomainError> {
        let Some(update) = SubscriptionUpdate::for_event(event) else {
            info!(event_type = ?event.event_type, "Unhandled webhook event");
            return Ok(ReconcileResult::NoOp(NoOpReason::UnhandledEvent));
        };

        let email = match event.customer_email.as_deref().map(EmailAddress::parse) {
            Some(Ok(email)) => email,
            Some(Err(e)) => {
                warn!(error = %e, event_type = ?event.event_type, "Webhook customer email is invalid");
                return Ok(ReconcileResult::NoOp(NoOpReason::MissingCustomerEmail));
            }
            None => {
                warn!(event_type = ?event.event_type, "Webhook event has no customer email");
                return Ok(ReconcileResult::NoOp(NoOpReason::MissingCustomerEmail));
            }
        };

        let Some(user) = self.directory.find_user_by_email(&email).await? else {
            info!(event_type = ?event.event_type, "No user matches webhook customer email");
            return Ok(ReconcileResult::NoOp(NoOpReason::UserNotFound));
        };

        self.profiles.upsert_subscription(&user.id, &update).await?;

        info!(
            user_id = %user.id,
            plan = %update.plan(),
            status = %update.status(),
            "Updated user subscription"
        );

        Ok(ReconcileResult::Updated {
            user_id: user.id,
            update,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryIdentityDirectory, InMemoryProfileRepository};
    use crate::domain::foundation::ErrorCode;
    use crate::domain::subscription::{SubscriptionPlan, SubscriptionStatus};
    use async_trait::async_trait;
    use serde_json::json;

    struct Fixture {
        directory: Arc<InMemoryIdentityDirectory>,
        profiles: Arc<InMemoryProfileRepository>,
        handler: ReconcileSubscriptionHandler,
    }

    fn fixture() -> Fixture {
        let directory = Arc::new(InMemoryIdentityDirectory::new());
        let profiles = Arc::new(InMemoryProfileRepository::new());
        let handler = ReconcileSubscriptionHandler::new(directory.clone(), profiles.clone());
        Fixture {
            directory,
            profiles,
            handler,
        }
    }

    fn user_id(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn activation_writes_pro_plus() {
        let f = fixture();
        f.directory.add_user("u1", "a@b.com");
        let event = PaymentEvent::normalize(&json!({
            "event_type": "subscription.activated",
            "user_email": "a@b.com",
            "customer_id": "cus_1"
        }));

        let result = f.handler.handle(&event).await.unwrap();

        assert!(matches!(result, ReconcileResult::Updated { .. }));
        let profile = f.profiles.profile(&user_id("u1")).unwrap();
        assert_eq!(profile.subscription_plan, SubscriptionPlan::ProPlus);
        assert_eq!(profile.subscription_status, SubscriptionStatus::Active);
        assert_eq!(profile.creem_customer_id.as_deref(), Some("cus_1"));
    }

    #[tokio::test]
    async fn deactivation_writes_free_inactive() {
        let f = fixture();
        f.directory.add_user("u1", "a@b.com");
        let event = PaymentEvent::normalize(&json!({
            "eventType": "payment.failed",
            "object": {"customer": {"email": "a@b.com"}, "status": "failed"}
        }));

        f.handler.handle(&event).await.unwrap();

        let profile = f.profiles.profile(&user_id("u1")).unwrap();
        assert_eq!(profile.subscription_plan, SubscriptionPlan::Free);
        assert_eq!(profile.subscription_status, SubscriptionStatus::Inactive);
    }

    #[tokio::test]
    async fn cancellation_keeps_cancelled_status() {
        let f = fixture();
        f.directory.add_user("u1", "a@b.com");
        let event = PaymentEvent::normalize(&json!({
            "eventType": "subscription.cancelled",
            "object": {"customer": {"email": "a@b.com"}, "status": "cancelled"}
        }));

        f.handler.handle(&event).await.unwrap();

        let profile = f.profiles.profile(&user_id("u1")).unwrap();
        assert_eq!(profile.subscription_status, SubscriptionStatus::Cancelled);
    }

    #[tokio::test]
    async fn replaying_activation_is_idempotent() {
        let f = fixture();
        f.directory.add_user("u1", "a@b.com");
        let event = PaymentEvent::normalize(&json!({
            "event_type": "payment.succeeded",
            "user_email": "a@b.com",
            "customer_id": "cus_1"
        }));

        f.handler.handle(&event).await.unwrap();
        let once = f.profiles.profile(&user_id("u1")).unwrap();
        f.handler.handle(&event).await.unwrap();
        let twice = f.profiles.profile(&user_id("u1")).unwrap();

        assert_eq!(once, twice);
        assert_eq!(f.profiles.write_count(), 2);
    }

    #[tokio::test]
    async fn lookup_ignores_email_case() {
        let f = fixture();
        f.directory.add_user("u1", "Jane@Example.com");
        let event = PaymentEvent::normalize(&json!({
            "event_type": "subscription.created",
            "user_email": " jane@EXAMPLE.com "
        }));

        let result = f.handler.handle(&event).await.unwrap();

        assert!(matches!(result, ReconcileResult::Updated { ref user_id, .. } if user_id.as_str() == "u1"));
    }

    #[tokio::test]
    async fn unhandled_event_writes_nothing() {
        let f = fixture();
        f.directory.add_user("u1", "a@b.com");
        let event = PaymentEvent::normalize(&json!({
            "event_type": "subscription.updated",
            "user_email": "a@b.com"
        }));

        let result = f.handler.handle(&event).await.unwrap();

        assert_eq!(result, ReconcileResult::NoOp(NoOpReason::UnhandledEvent));
        assert_eq!(f.profiles.write_count(), 0);
        assert_eq!(f.directory.lookup_count(), 0);
    }

    #[tokio::test]
    async fn unknown_email_is_a_silent_no_op() {
        let f = fixture();
        let event = PaymentEvent::normalize(&json!({
            "event_type": "subscription.activated",
            "user_email": "ghost@b.com"
        }));

        let result = f.handler.handle(&event).await.unwrap();

        assert_eq!(result, ReconcileResult::NoOp(NoOpReason::UserNotFound));
        assert_eq!(f.profiles.write_count(), 0);
    }

    #[tokio::test]
    async fn missing_or_invalid_email_is_a_no_op() {
        let f = fixture();
        for body in [
            json!({"event_type": "subscription.activated"}),
            json!({"event_type": "subscription.activated", "user_email": "nobody"}),
        ] {
            let result = f.handler.handle(&PaymentEvent::normalize(&body)).await.unwrap();
            assert_eq!(result, ReconcileResult::NoOp(NoOpReason::MissingCustomerEmail));
        }
        assert_eq!(f.directory.lookup_count(), 0);
    }

    struct FailingProfiles;

    #[async_trait]
    impl ProfileRepository for FailingProfiles {
        async fn upsert_subscription(
            &self,
            _user_id: &UserId,
            _update: &SubscriptionUpdate,
        ) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::BackendRejected, "profiles upsert returned 500"))
        }
    }

    #[tokio::test]
    async fn write_failure_propagates() {
        let directory = Arc::new(InMemoryIdentityDirectory::new());
        directory.add_user("u1", "a@b.com");
        let handler = ReconcileSubscriptionHandler::new(directory, Arc::new(FailingProfiles));
        let event = PaymentEvent::normalize(&json!({
            "event_type": "subscription.activated",
            "user_email": "a@b.com"
        }));

        let result = handler.handle(&event).await;

        assert!(matches!(result, Err(e) if e.code == ErrorCode::BackendRejected));
    }
}
