//! In-memory profile repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::subscription::{SubscriptionProfile, SubscriptionUpdate};
use crate::ports::ProfileRepository;

/// Profile store keyed by user id.
///
/// Upserts behave like the production table: an absent row is created
/// with free/inactive defaults before the update is applied.
pub struct InMemoryProfileRepository {
    profiles: RwLock<HashMap<UserId, SubscriptionProfile>>,
    writes: AtomicUsize,
    unavailable: RwLock<bool>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self {
            profiles: RwLock::new(HashMap::new()),
            writes: AtomicUsize::new(0),
            unavailable: RwLock::new(false),
        }
    }

    // === Test Helpers ===

    /// Returns the stored profile for a user.
    pub fn profile(&self, user_id: &UserId) -> Option<SubscriptionProfile> {
        self.profiles
            .read()
            .expect("InMemoryProfileRepository: profiles lock poisoned")
            .get(user_id)
            .cloned()
    }

    /// Makes every subsequent write fail as if the backend were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        *self
            .unavailable
            .write()
            .expect("InMemoryProfileRepository: flag write lock poisoned") = unavailable;
    }

    /// Number of successful writes.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryProfileRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn upsert_subscription(
        &self,
        user_id: &UserId,
        update: &SubscriptionUpdate,
    ) -> Result<(), DomainError> {
        if *self
            .unavailable
            .read()
            .expect("InMemoryProfileRepository: flag lock poisoned")
        {
            return Err(DomainError::new(
                ErrorCode::BackendUnavailable,
                "profile store unavailable",
            ));
        }

        let mut profiles = self
            .profiles
            .write()
            .expect("InMemoryProfileRepository: profiles write lock poisoned");
        profiles
            .entry(user_id.clone())
            .or_insert_with(|| SubscriptionProfile::new(user_id.clone()))
            .apply(update);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::subscription::{SubscriptionPlan, SubscriptionStatus};

    fn user_id() -> UserId {
        UserId::new("u1").unwrap()
    }

    #[tokio::test]
    async fn upsert_creates_missing_profile() {
        let repo = InMemoryProfileRepository::new();

        repo.upsert_subscription(&user_id(), &SubscriptionUpdate::activate(None))
            .await
            .unwrap();

        let profile = repo.profile(&user_id()).unwrap();
        assert_eq!(profile.subscription_plan, SubscriptionPlan::ProPlus);
        assert_eq!(profile.subscription_status, SubscriptionStatus::Active);
        assert_eq!(repo.write_count(), 1);
    }

    #[tokio::test]
    async fn upsert_keeps_customer_id_when_update_has_none() {
        let repo = InMemoryProfileRepository::new();
        repo.upsert_subscription(
            &user_id(),
            &SubscriptionUpdate::activate(Some("cus_1".to_string())),
        )
        .await
        .unwrap();

        repo.upsert_subscription(&user_id(), &SubscriptionUpdate::deactivate(Some("cancelled")))
            .await
            .unwrap();

        let profile = repo.profile(&user_id()).unwrap();
        assert_eq!(profile.subscription_plan, SubscriptionPlan::Free);
        assert_eq!(profile.subscription_status, SubscriptionStatus::Cancelled);
        assert_eq!(profile.creem_customer_id.as_deref(), Some("cus_1"));
    }

    #[tokio::test]
    async fn unavailable_store_rejects_writes() {
        let repo = InMemoryProfileRepository::new();
        repo.set_unavailable(true);

        let result = repo
            .upsert_subscription(&user_id(), &SubscriptionUpdate::activate(None))
            .await;

        assert!(result.is_err());
        assert_eq!(repo.write_count(), 0);
        assert!(repo.profile(&user_id()).is_none());
    }
}
