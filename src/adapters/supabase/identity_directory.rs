//! Identity lookup through the Supabase auth admin API.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::Deserialize;

use super::client::SupabaseClient;
use crate::domain::foundation::{DomainError, EmailAddress, ErrorCode, UserId};
use crate::ports::{IdentityDirectory, IdentityUser};

const ADMIN_USERS_PATH: &str = "/auth/v1/admin/users";

#[derive(Debug, Deserialize)]
struct AdminUsersPage {
    #[serde(default)]
    users: Vec<AdminUser>,
}

#[derive(Debug, Deserialize)]
struct AdminUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

/// Resolves customer emails against Supabase auth users.
///
/// The admin API `filter` parameter is a substring search, so the exact
/// match is made here, ignoring case.
pub struct SupabaseIdentityDirectory {
    client: SupabaseClient,
}

impl SupabaseIdentityDirectory {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    fn lookup_request(&self, email: &EmailAddress) -> RequestBuilder {
        self.client
            .request(Method::GET, ADMIN_USERS_PATH)
            .query(&[("filter", email.as_str())])
    }
}

#[async_trait]
impl IdentityDirectory for SupabaseIdentityDirectory {
    async fn find_user_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<IdentityUser>, DomainError> {
        let response = self
            .client
            .send(self.lookup_request(email), "identity lookup")
            .await?;

        let page: AdminUsersPage = response.json().await.map_err(|e| {
            DomainError::new(
                ErrorCode::UnexpectedResponse,
                format!("Failed to parse identity lookup response: {}", e),
            )
        })?;

        find_exact(page, email)
    }
}

fn find_exact(
    page: AdminUsersPage,
    email: &EmailAddress,
) -> Result<Option<IdentityUser>, DomainError> {
    let Some(user) = page
        .users
        .into_iter()
        .find(|u| u.email.as_deref().map_or(false, |e| email.matches(e)))
    else {
        return Ok(None);
    };

    Ok(Some(IdentityUser {
        id: UserId::new(user.id)?,
        email: user.email.unwrap_or_default(),
    }))
}
