//! Subscription profile and the overwrite applied by reconciliation.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;

use super::payment_event::{EventKind, PaymentEvent};
use super::plan::SubscriptionPlan;
use super::status::SubscriptionStatus;

/// One row of the `profiles` table, restricted to the subscription columns.
///
/// Profiles are created by a database trigger when the user signs up; this
/// service only overwrites the subscription fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionProfile {
    pub user_id: UserId,
    pub subscription_plan: SubscriptionPlan,
    pub subscription_status: SubscriptionStatus,
    pub creem_customer_id: Option<String>,
}

impl SubscriptionProfile {
    /// Profile as provisioned at sign-up.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            subscription_plan: SubscriptionPlan::Free,
            subscription_status: SubscriptionStatus::Inactive,
            creem_customer_id: None,
        }
    }

    /// Overwrites the subscription fields with `update`.
    ///
    /// The customer id is only replaced when the update carries one.
    pub fn apply(&mut self, update: &SubscriptionUpdate) {
        self.subscription_plan = update.plan;
        self.subscription_status = update.status;
        if let Some(customer_id) = &update.creem_customer_id {
            self.creem_customer_id = Some(customer_id.clone());
        }
    }
}

/// Full-field overwrite written for one payment event.
///
/// Construct through [`SubscriptionUpdate::activate`] or
/// [`SubscriptionUpdate::deactivate`]; `pro_plus` is only ever paired with
/// `active`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptionUpdate {
    #[serde(rename = "subscription_plan")]
    plan: SubscriptionPlan,
    #[serde(rename = "subscription_status")]
    status: SubscriptionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    creem_customer_id: Option<String>,
}

impl SubscriptionUpdate {
    pub fn activate(creem_customer_id: Option<String>) -> Self {
        Self {
            plan: SubscriptionPlan::ProPlus,
            status: SubscriptionStatus::Active,
            creem_customer_id,
        }
    }

    pub fn deactivate(raw_status: Option<&str>) -> Self {
        Self {
            plan: SubscriptionPlan::Free,
            status: SubscriptionStatus::from_deactivation(raw_status),
            creem_customer_id: None,
        }
    }

    /// Update implied by a normalized event, or `None` for unhandled kinds.
    pub fn for_event(event: &PaymentEvent) -> Option<Self> {
        match event.kind {
            EventKind::Activated => Some(Self::activate(event.external_customer_id.clone())),
            EventKind::Deactivated => Some(Self::deactivate(event.raw_status.as_deref())),
            EventKind::Unhandled => None,
        }
    }

    pub fn plan(&self) -> SubscriptionPlan {
        self.plan
    }

    pub fn status(&self) -> SubscriptionStatus {
        self.status
    }

    pub fn creem_customer_id(&self) -> Option<&str> {
        self.creem_customer_id.as_deref()
    }
}
