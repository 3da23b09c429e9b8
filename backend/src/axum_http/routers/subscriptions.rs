use crate::axum_http::{auth::AuthUser, error_responses::AppError};
use crate::usecases::subscriptions::SubscriptionUseCase;
use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use std::sync::Arc;
use subscriptions_core::{
    domain::{
        repositories::workspaces::WorkspaceRepository,
        value_objects::{
            subscriptions::AssignPlanRequest,
            timestamps::{Clock, SystemClock},
        },
    },
    infra::store::{
        json_store_connection::JsonStoreSquad, repositories::workspaces::WorkspaceJsonStore,
    },
};
use tracing::{error, info};

pub fn routes(store: Arc<JsonStoreSquad>) -> Router {
    let workspace_repository = WorkspaceJsonStore::new(Arc::clone(&store));
    let subscriptions_usecase =
        SubscriptionUseCase::new(Arc::new(workspace_repository), Arc::new(SystemClock));

    Router::new()
        .route("/current", get(current_subscription))
        .route("/assign", post(assign_plan))
        .with_state(Arc::new(subscriptions_usecase))
}

pub async fn current_subscription<W, C>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<W, C>>>,
    AuthUser { owner, .. }: AuthUser,
) -> impl IntoResponse
where
    W: WorkspaceRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    info!(%owner, "subscriptions: current subscription request received");

    match subscriptions_usecase.get_subscription_status(&owner).await {
        Ok(current) => Json(current).into_response(),
        Err(err) => {
            error!(%owner, error = %err, "subscriptions: failed to load current subscription");
            AppError::from(err).into_response()
        }
    }
}

pub async fn assign_plan<W, C>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<W, C>>>,
    AuthUser { owner, .. }: AuthUser,
    Json(request): Json<AssignPlanRequest>,
) -> impl IntoResponse
where
    W: WorkspaceRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    info!(%owner, plan = %request.plan, "subscriptions: assign plan request received");

    match subscriptions_usecase.assign_plan(&owner, request.plan).await {
        Ok(current) => Json(current).into_response(),
        Err(err) => {
            error!(%owner, plan = %request.plan, error = %err, "subscriptions: failed to assign plan");
            AppError::from(err).into_response()
        }
    }
}
