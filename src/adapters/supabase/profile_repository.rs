//! Subscription profile writes through PostgREST.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::Serialize;

use super::client::SupabaseClient;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::subscription::SubscriptionUpdate;
use crate::ports::ProfileRepository;

/// Row body for the upsert: the key plus the update's columns.
#[derive(Debug, Serialize)]
struct ProfileRow<'a> {
    user_id: &'a UserId,
    #[serde(flatten)]
    update: &'a SubscriptionUpdate,
}

/// Upserts subscription columns keyed by `user_id`.
pub struct SupabaseProfileRepository {
    client: SupabaseClient,
}

impl SupabaseProfileRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    fn upsert_request(&self, user_id: &UserId, update: &SubscriptionUpdate) -> RequestBuilder {
        let path = format!("/rest/v1/{}", self.client.config().profiles_table);
        self.client
            .request(Method::POST, &path)
            .query(&[("on_conflict", "user_id")])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&ProfileRow { user_id, update })
    }
}

#[async_trait]
impl ProfileRepository for SupabaseProfileRepository {
    async fn upsert_subscription(
        &self,
        user_id: &UserId,
        update: &SubscriptionUpdate,
    ) -> Result<(), DomainError> {
        self.client
            .send(self.upsert_request(user_id, update), "profile upsert")
            .await?;
        Ok(())
    }
}
