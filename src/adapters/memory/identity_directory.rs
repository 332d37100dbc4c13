//! In-memory identity directory.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, EmailAddress, ErrorCode, UserId};
use crate::ports::{IdentityDirectory, IdentityUser};

/// Identity directory backed by a vector of users.
///
/// # Example
///
/// ```ignore
/// let directory = InMemoryIdentityDirectory::new();
/// directory.add_user("u1", "a@b.com");
/// assert_eq!(directory.lookup_count(), 0);
/// ```
pub struct InMemoryIdentityDirectory {
    users: RwLock<Vec<IdentityUser>>,
    lookups: AtomicUsize,
    unavailable: RwLock<bool>,
}

impl InMemoryIdentityDirectory {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            lookups: AtomicUsize::new(0),
            unavailable: RwLock::new(false),
        }
    }

    // === Test Helpers ===

    /// Registers a user account.
    ///
    /// # Panics
    ///
    /// Panics if `id` is blank or the internal lock is poisoned.
    pub fn add_user(&self, id: &str, email: &str) {
        let user = IdentityUser {
            id: UserId::new(id).expect("InMemoryIdentityDirectory: invalid user id"),
            email: email.to_string(),
        };
        self.users
            .write()
            .expect("InMemoryIdentityDirectory: users write lock poisoned")
            .push(user);
    }

    /// Makes every subsequent lookup fail as if the backend were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        *self
            .unavailable
            .write()
            .expect("InMemoryIdentityDirectory: flag write lock poisoned") = unavailable;
    }

    /// Number of lookups performed so far.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryIdentityDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityDirectory for InMemoryIdentityDirectory {
    async fn find_user_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<IdentityUser>, DomainError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);

        if *self
            .unavailable
            .read()
            .expect("InMemoryIdentityDirectory: flag lock poisoned")
        {
            return Err(DomainError::new(
                ErrorCode::BackendUnavailable,
                "identity directory unavailable",
            ));
        }

        let users = self
            .users
            .read()
            .expect("InMemoryIdentityDirectory: users lock poisoned");
        Ok(users
            .iter()
            .find(|user| email.matches(&user.email))
            .cloned())
    }
}
