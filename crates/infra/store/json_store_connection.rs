use anyhow::{Context, Result, bail};
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};
use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::{debug, info};

use crate::domain::entities::workspaces::BusinessWorkspace;

/// Workspace list held in memory and mirrored to a JSON file after every write.
pub struct JsonStoreSquad {
    path: PathBuf,
    workspaces: RwLock<Vec<BusinessWorkspace>>,
}

impl JsonStoreSquad {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, Vec<BusinessWorkspace>> {
        self.workspaces.read().await
    }

    /// Applies `mutate` to a copy of the workspaces and swaps it in only once the file is written.
    pub async fn write_with<F, T>(&self, mutate: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<BusinessWorkspace>) -> Result<T>,
    {
        let mut guard = self.workspaces.write().await;
        let mut next = guard.clone();
        let output = mutate(&mut next)?;

        validate_workspaces(&next)?;
        persist(&self.path, &next).await?;

        *guard = next;
        Ok(output)
    }
}

pub fn establish_connection(path: impl AsRef<Path>) -> Result<JsonStoreSquad> {
    let path = path.as_ref().to_path_buf();

    let workspaces = if path.exists() {
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read workspace store {}", path.display()))?;
        let workspaces: Vec<BusinessWorkspace> = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse workspace store {}", path.display()))?;
        validate_workspaces(&workspaces)?;
        workspaces
    } else {
        info!(path = %path.display(), "json_store: file not found, starting with no workspaces");
        Vec::new()
    };

    debug!(
        path = %path.display(),
        workspace_count = workspaces.len(),
        "json_store: workspaces loaded"
    );

    Ok(JsonStoreSquad {
        path,
        workspaces: RwLock::new(workspaces),
    })
}

fn validate_workspaces(workspaces: &[BusinessWorkspace]) -> Result<()> {
    let mut owners = HashSet::with_capacity(workspaces.len());

    for workspace in workspaces {
        if !owners.insert(workspace.owner.as_str()) {
            bail!("duplicate workspace owner {}", workspace.owner);
        }
        if let Some(subscription) = &workspace.subscription {
            subscription
                .validate()
                .with_context(|| format!("invalid subscription for owner {}", workspace.owner))?;
        }
    }

    Ok(())
}

async fn persist(path: &Path, workspaces: &[BusinessWorkspace]) -> Result<()> {
    let body = serde_json::to_vec_pretty(workspaces)?;
    let staging = path.with_extension("json.tmp");

    tokio::fs::write(&staging, body)
        .await
        .with_context(|| format!("failed to write {}", staging.display()))?;
    tokio::fs::rename(&staging, path)
        .await
        .with_context(|| format!("failed to replace {}", path.display()))?;

    Ok(())
}
