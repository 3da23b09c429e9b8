use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum SubscriptionPlan {
    FreeTrial,
    Monthly,
    Yearly,
    Canceled,
    /// Plan value the store knows about but this build does not.
    #[serde(other)]
    Unrecognized,
}

impl SubscriptionPlan {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionPlan::FreeTrial => "freeTrial",
            SubscriptionPlan::Monthly => "monthly",
            SubscriptionPlan::Yearly => "yearly",
            SubscriptionPlan::Canceled => "canceled",
            SubscriptionPlan::Unrecognized => "unrecognized",
        }
    }

    pub fn from_str(value: &str) -> Self {
        match value {
            "freeTrial" => SubscriptionPlan::FreeTrial,
            "monthly" => SubscriptionPlan::Monthly,
            "yearly" => SubscriptionPlan::Yearly,
            "canceled" => SubscriptionPlan::Canceled,
            _ => SubscriptionPlan::Unrecognized,
        }
    }

    pub fn is_paid(&self) -> bool {
        matches!(self, SubscriptionPlan::Monthly | SubscriptionPlan::Yearly)
    }
}

impl Display for SubscriptionPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
