use anyhow::Result;
use backend::axum_http::http_serve;
use backend::config::config_loader;
use std::sync::Arc;
use subscriptions_core::infra::store::json_store_connection;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        error!("Backend exited with error: {:#}", error);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    subscriptions_core::observability::init_observability("backend")?;

    let dotenvy_env = config_loader::load()?;
    info!("ENV has been loaded");

    let store = json_store_connection::establish_connection(&dotenvy_env.workspace_store.path)?;
    info!(
        path = %dotenvy_env.workspace_store.path.display(),
        "Workspace store has been opened"
    );

    http_serve::start(Arc::new(dotenvy_env), Arc::new(store)).await?;

    Ok(())
}
