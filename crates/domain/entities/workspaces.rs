use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::entities::subscriptions::SubscriptionRecord;

/// A tenant of the business-management client.
///
/// Only the subscription is modeled. Portfolio, sales and marketing sections ride along in
/// `sections` untouched so that writing a workspace back never drops them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BusinessWorkspace {
    pub owner: String,
    pub business_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription: Option<SubscriptionRecord>,
    #[serde(flatten)]
    pub sections: Map<String, Value>,
}

impl BusinessWorkspace {
    pub fn new(owner: impl Into<String>, business_name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            business_name: business_name.into(),
            subscription: None,
            sections: Map::new(),
        }
    }

    pub fn with_subscription(mut self, subscription: SubscriptionRecord) -> Self {
        self.subscription = Some(subscription);
        self
    }
}
