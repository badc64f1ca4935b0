use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use domain::StatusCheck;

use crate::{
    applicant_routes, automation_routes, credential_routes, error::ApiError, state::AppState,
    websocket,
};

/// 列表接口共用的分页参数
#[derive(Debug, Deserialize)]
pub(crate) struct ListQuery {
    skip: Option<usize>,
    limit: Option<usize>,
}

impl ListQuery {
    pub(crate) fn skip(&self) -> usize {
        self.skip.unwrap_or(0)
    }

    pub(crate) fn limit(&self) -> usize {
        self.limit.unwrap_or(100).min(100)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct StatusCheckPayload {
    client_name: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ws", get(websocket::websocket_upgrade))
        // axum 0.8 no longer matches a nested router's `/` route at the
        // prefix's trailing-slash form (`/api/`), so map it explicitly to
        // the same root handler.
        .route("/api/", get(root))
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/status", post(create_status_check).get(list_status_checks))
        .merge(applicant_routes::routes())
        .merge(credential_routes::routes())
        .merge(automation_routes::routes())
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("BLS-SPANISH Automation System API"))
}

async fn create_status_check(
    State(state): State<AppState>,
    Json(payload): Json<StatusCheckPayload>,
) -> Result<Json<StatusCheck>, ApiError> {
    let check = state
        .status_check_service
        .record(payload.client_name)
        .await?;
    Ok(Json(check))
}

async fn list_status_checks(
    State(state): State<AppState>,
) -> Result<Json<Vec<StatusCheck>>, ApiError> {
    let checks = state.status_check_service.list().await?;
    Ok(Json(checks))
}
