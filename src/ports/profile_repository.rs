//! Profile repository port (write side).
//!
//! Persists subscription overwrites to the `profiles` table, keyed by user.
//!
//! # Design
//!
//! - **Upsert**: one profile per user; the write creates the row if the
//!   sign-up trigger has not run yet
//! - **Overwrite**: only the columns carried by the update are written

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::subscription::SubscriptionUpdate;

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Write `update` to the profile owned by `user_id`.
    ///
    /// # Errors
    ///
    /// - `BackendUnavailable` if the store cannot be reached
    /// - `BackendRejected` if the store refuses the write
    async fn upsert_subscription(
        &self,
        user_id: &UserId,
        update: &SubscriptionUpdate,
    ) -> Result<(), DomainError>;
}
