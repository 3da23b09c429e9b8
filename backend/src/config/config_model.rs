use std::path::PathBuf;

use crate::config::stage::Stage;

#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub backend_server: BackendServer,
    pub workspace_store: WorkspaceStore,
    pub auth: AuthSecret,
    pub stage: Stage,
}

#[derive(Debug, Clone)]
pub struct BackendServer {
    pub port: u16,
    /// Request body limit in MiB.
    pub body_limit: u64,
    /// Request timeout in seconds.
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct WorkspaceStore {
    pub path: PathBuf,
}

#[derive(Clone)]
pub struct AuthSecret {
    pub jwt_secret: String,
}

impl std::fmt::Debug for AuthSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSecret")
            .field("jwt_secret", &"<redacted>")
            .finish()
    }
}
