use thiserror::Error;

use crate::domain::{
    entities::subscriptions::SubscriptionRecord,
    value_objects::{
        enums::subscription_plans::SubscriptionPlan,
        subscription_status::{SubscriptionLabel, resolve_subscription_status},
        timestamps::Timestamp,
    },
};

pub const FREE_TRIAL_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PlanAssignmentError {
    #[error("free trial has already been used")]
    TrialAlreadyUsed,
    #[error("workspace is already on the {0} plan")]
    AlreadyOnPlan(SubscriptionPlan),
    #[error("no subscription to cancel")]
    NoSubscription,
    #[error("{0} subscription cannot be canceled")]
    NotCancelable(SubscriptionLabel),
    #[error("{0} is not an assignable plan")]
    NotAssignable(SubscriptionPlan),
}

/// Computes the record a workspace moves to when `plan` is requested. `current` is never mutated.
pub fn assign_plan(
    current: Option<&SubscriptionRecord>,
    plan: SubscriptionPlan,
    now: Timestamp,
) -> Result<SubscriptionRecord, PlanAssignmentError> {
    match plan {
        SubscriptionPlan::FreeTrial => start_free_trial(current, now),
        SubscriptionPlan::Monthly | SubscriptionPlan::Yearly => {
            activate_paid_plan(current, plan, now)
        }
        SubscriptionPlan::Canceled => cancel_subscription(current, now),
        SubscriptionPlan::Unrecognized => Err(PlanAssignmentError::NotAssignable(plan)),
    }
}

/// A trial is offered once per workspace.
pub fn start_free_trial(
    current: Option<&SubscriptionRecord>,
    now: Timestamp,
) -> Result<SubscriptionRecord, PlanAssignmentError> {
    if current.is_some() {
        return Err(PlanAssignmentError::TrialAlreadyUsed);
    }

    Ok(SubscriptionRecord {
        plan: SubscriptionPlan::FreeTrial,
        start_date: now,
        end_date: Some(now.saturating_add_days(FREE_TRIAL_DAYS)),
        canceled_at: None,
    })
}

pub fn activate_paid_plan(
    current: Option<&SubscriptionRecord>,
    plan: SubscriptionPlan,
    now: Timestamp,
) -> Result<SubscriptionRecord, PlanAssignmentError> {
    if !plan.is_paid() {
        return Err(PlanAssignmentError::NotAssignable(plan));
    }
    if current.is_some_and(|record| record.plan == plan) {
        return Err(PlanAssignmentError::AlreadyOnPlan(plan));
    }

    Ok(SubscriptionRecord {
        plan,
        start_date: now,
        end_date: None,
        canceled_at: None,
    })
}

/// Keeps the original dates so the table still shows when the subscription began.
pub fn cancel_subscription(
    current: Option<&SubscriptionRecord>,
    now: Timestamp,
) -> Result<SubscriptionRecord, PlanAssignmentError> {
    let record = current.ok_or(PlanAssignmentError::NoSubscription)?;

    let status = resolve_subscription_status(record, now);
    if !status.can_cancel {
        return Err(PlanAssignmentError::NotCancelable(status.label));
    }

    Ok(SubscriptionRecord {
        plan: SubscriptionPlan::Canceled,
        start_date: record.start_date,
        end_date: record.end_date,
        canceled_at: Some(now),
    })
}
