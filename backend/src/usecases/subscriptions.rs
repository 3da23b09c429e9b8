use std::sync::Arc;

use subscriptions_core::domain::{
    repositories::workspaces::{SubscriptionTransition, WorkspaceRepository},
    value_objects::{
        enums::subscription_plans::SubscriptionPlan,
        plan_assignment::{PlanAssignmentError, assign_plan},
        subscriptions::CurrentSubscriptionDto,
        timestamps::Clock,
    },
};
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("workspace not found")]
    WorkspaceNotFound,
    #[error(transparent)]
    PlanAssignment(#[from] PlanAssignmentError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl SubscriptionError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            SubscriptionError::WorkspaceNotFound => StatusCode::NOT_FOUND,
            SubscriptionError::PlanAssignment(PlanAssignmentError::NoSubscription) => {
                StatusCode::NOT_FOUND
            }
            SubscriptionError::PlanAssignment(PlanAssignmentError::NotAssignable(_)) => {
                StatusCode::BAD_REQUEST
            }
            SubscriptionError::PlanAssignment(
                PlanAssignmentError::TrialAlreadyUsed
                | PlanAssignmentError::AlreadyOnPlan(_)
                | PlanAssignmentError::NotCancelable(_),
            ) => StatusCode::CONFLICT,
            SubscriptionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, SubscriptionError>;

pub struct SubscriptionUseCase<W, C>
where
    W: WorkspaceRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    workspace_repo: Arc<W>,
    clock: Arc<C>,
}

impl<W, C> SubscriptionUseCase<W, C>
where
    W: WorkspaceRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    pub fn new(workspace_repo: Arc<W>, clock: Arc<C>) -> Self {
        Self {
            workspace_repo,
            clock,
        }
    }

    /// `None` when the caller's workspace has never subscribed.
    pub async fn get_subscription_status(
        &self,
        owner: &str,
    ) -> UseCaseResult<Option<CurrentSubscriptionDto>> {
        info!(%owner, "subscriptions: loading current subscription");

        let workspace = self
            .workspace_repo
            .find_by_owner(owner.to_string())
            .await
            .map_err(|err| {
                error!(%owner, store_error = ?err, "subscriptions: failed to load workspace");
                SubscriptionError::Internal(err)
            })?
            .ok_or(SubscriptionError::WorkspaceNotFound)?;

        let Some(subscription) = workspace.subscription else {
            info!(%owner, "subscriptions: workspace has no subscription");
            return Ok(None);
        };

        let current = CurrentSubscriptionDto::resolve(subscription, self.clock.now());
        info!(
            %owner,
            plan = %subscription.plan,
            label = %current.status.label,
            is_expired = current.status.is_expired,
            "subscriptions: current subscription resolved"
        );

        Ok(Some(current))
    }

    /// Validates and stores the transition under the store's write lock, so concurrent
    /// requests for one owner always see each other's result.
    pub async fn assign_plan(
        &self,
        owner: &str,
        plan: SubscriptionPlan,
    ) -> UseCaseResult<CurrentSubscriptionDto> {
        info!(%owner, %plan, "subscriptions: plan assignment requested");

        let now = self.clock.now();
        let transition: SubscriptionTransition =
            Box::new(move |current| assign_plan(current, plan, now));

        let next = self
            .workspace_repo
            .update_subscription_with(owner.to_string(), transition)
            .await
            .map_err(|err| match err.downcast::<PlanAssignmentError>() {
                Ok(rejected) => {
                    warn!(%owner, %plan, reason = %rejected, "subscriptions: plan assignment rejected");
                    SubscriptionError::PlanAssignment(rejected)
                }
                Err(err) => {
                    error!(
                        %owner,
                        %plan,
                        store_error = ?err,
                        "subscriptions: failed to store assigned plan"
                    );
                    SubscriptionError::Internal(err)
                }
            })?
            .ok_or(SubscriptionError::WorkspaceNotFound)?;

        info!(%owner, %plan, "subscriptions: plan assigned");
        Ok(CurrentSubscriptionDto::resolve(next, now))
    }
}
