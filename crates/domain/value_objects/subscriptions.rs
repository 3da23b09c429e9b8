use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::subscriptions::SubscriptionRecord,
    value_objects::{
        enums::subscription_plans::SubscriptionPlan,
        subscription_status::{SubscriptionStatus, resolve_subscription_status},
        timestamps::Timestamp,
    },
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CurrentSubscriptionDto {
    pub subscription: SubscriptionRecord,
    pub status: SubscriptionStatus,
}

impl CurrentSubscriptionDto {
    pub fn resolve(subscription: SubscriptionRecord, now: Timestamp) -> Self {
        Self {
            status: resolve_subscription_status(&subscription, now),
            subscription,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssignPlanRequest {
    pub plan: SubscriptionPlan,
}
