use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::{domain, infra::store::json_store_connection::JsonStoreSquad};
use domain::{
    entities::{subscriptions::SubscriptionRecord, workspaces::BusinessWorkspace},
    repositories::workspaces::{SubscriptionTransition, WorkspaceRepository},
};

pub struct WorkspaceJsonStore {
    store: Arc<JsonStoreSquad>,
}

impl WorkspaceJsonStore {
    pub fn new(store: Arc<JsonStoreSquad>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl WorkspaceRepository for WorkspaceJsonStore {
    async fn find_by_owner(&self, owner: String) -> Result<Option<BusinessWorkspace>> {
        let workspaces = self.store.read().await;

        Ok(workspaces
            .iter()
            .find(|workspace| workspace.owner == owner)
            .cloned())
    }

    async fn list_sorted_by_business_name(&self) -> Result<Vec<BusinessWorkspace>> {
        let mut workspaces = self.store.read().await.clone();
        workspaces.sort_by(|a, b| {
            a.business_name
                .to_lowercase()
                .cmp(&b.business_name.to_lowercase())
                .then_with(|| a.owner.cmp(&b.owner))
        });

        Ok(workspaces)
    }

    async fn update_subscription_with(
        &self,
        owner: String,
        transition: SubscriptionTransition,
    ) -> Result<Option<SubscriptionRecord>> {
        self.store
            .write_with(|workspaces| {
                let Some(workspace) = workspaces
                    .iter_mut()
                    .find(|workspace| workspace.owner == owner)
                else {
                    return Ok(None);
                };

                let next = transition(workspace.subscription.as_ref())?;
                workspace.subscription = Some(next);
                Ok(Some(next))
            })
            .await
    }
}
