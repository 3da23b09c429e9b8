use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::{
    entities::{subscriptions::SubscriptionRecord, workspaces::BusinessWorkspace},
    value_objects::plan_assignment::PlanAssignmentError,
};

/// Computes the next record from the stored one. Runs while the store holds its write lock.
pub type SubscriptionTransition = Box<
    dyn FnOnce(Option<&SubscriptionRecord>) -> Result<SubscriptionRecord, PlanAssignmentError>
        + Send,
>;

/// Read/write boundary of the workspace backend.
#[async_trait]
#[automock]
pub trait WorkspaceRepository {
    async fn find_by_owner(&self, owner: String) -> Result<Option<BusinessWorkspace>>;

    async fn list_sorted_by_business_name(&self) -> Result<Vec<BusinessWorkspace>>;

    /// Applies `transition` to the owner's current record and stores the result atomically.
    ///
    /// `Ok(None)` when `owner` has no workspace. A rejected transition comes back as an error
    /// that downcasts to [`PlanAssignmentError`]; nothing is written in that case.
    async fn update_subscription_with(
        &self,
        owner: String,
        transition: SubscriptionTransition,
    ) -> Result<Option<SubscriptionRecord>>;
}
