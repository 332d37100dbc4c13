//! Identity directory port.
//!
//! Resolves a customer email to the application user that owns it. Backed
//! by the Supabase auth admin API in production.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EmailAddress, UserId};

/// A user account as known to the identity system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityUser {
    pub id: UserId,
    pub email: String,
}

/// Read-only lookup of user accounts.
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Find the user whose email matches `email`, ignoring case.
    ///
    /// Returns `None` if no account uses this address.
    async fn find_user_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<IdentityUser>, DomainError>;
}
