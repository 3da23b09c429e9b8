use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::value_objects::{
    enums::subscription_plans::SubscriptionPlan, timestamps::Timestamp,
};

/// Subscription state attached to a workspace, as stored by the workspace backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRecord {
    pub plan: SubscriptionPlan,
    pub start_date: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canceled_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SubscriptionRecordError {
    #[error("end date {end_date} precedes start date {start_date}")]
    EndBeforeStart {
        start_date: Timestamp,
        end_date: Timestamp,
    },
    #[error("canceledAt is set on a {0} subscription")]
    CanceledAtOnActivePlan(SubscriptionPlan),
}

impl SubscriptionRecord {
    pub fn validate(&self) -> Result<(), SubscriptionRecordError> {
        if let Some(end_date) = self.end_date {
            if end_date < self.start_date {
                return Err(SubscriptionRecordError::EndBeforeStart {
                    start_date: self.start_date,
                    end_date,
                });
            }
        }

        if self.canceled_at.is_some() && self.plan != SubscriptionPlan::Canceled {
            return Err(SubscriptionRecordError::CanceledAtOnActivePlan(self.plan));
        }

        Ok(())
    }
}
