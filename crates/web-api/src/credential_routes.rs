use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use domain::{Credential, CredentialProfile};

use crate::{
    error::ApiError,
    routes::{ListQuery, MessageResponse},
    state::AppState,
};

pub(crate) fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/credentials",
            get(list_credentials).post(create_credential),
        )
        .route("/credentials/primary/info", get(primary_credential))
        .route(
            "/credentials/{credential_id}",
            get(get_credential)
                .put(update_credential)
                .delete(delete_credential),
        )
        .route(
            "/credentials/{credential_id}/set-primary",
            post(set_primary_credential),
        )
        .route("/credentials/{credential_id}/test", post(test_credential))
}

async fn create_credential(
    State(state): State<AppState>,
    Json(payload): Json<CredentialProfile>,
) -> Result<(StatusCode, Json<Credential>), ApiError> {
    let credential = state.credential_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(credential)))
}

async fn list_credentials(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Credential>>, ApiError> {
    let credentials = state
        .credential_service
        .list(query.skip(), query.limit())
        .await?;
    Ok(Json(credentials))
}

async fn get_credential(
    State(state): State<AppState>,
    Path(credential_id): Path<Uuid>,
) -> Result<Json<Credential>, ApiError> {
    let credential = state.credential_service.get(credential_id).await?;
    Ok(Json(credential))
}

async fn update_credential(
    State(state): State<AppState>,
    Path(credential_id): Path<Uuid>,
    Json(payload): Json<CredentialProfile>,
) -> Result<Json<Credential>, ApiError> {
    let credential = state
        .credential_service
        .update(credential_id, payload)
        .await?;
    Ok(Json(credential))
}

async fn delete_credential(
    State(state): State<AppState>,
    Path(credential_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.credential_service.delete(credential_id).await?;
    Ok(Json(MessageResponse::new("Credential deleted successfully")))
}

async fn primary_credential(
    State(state): State<AppState>,
) -> Result<Json<Credential>, ApiError> {
    let credential = state
        .credential_service
        .primary()
        .await?
        .ok_or_else(|| ApiError::not_found("No primary credential found"))?;
    Ok(Json(credential))
}

async fn set_primary_credential(
    State(state): State<AppState>,
    Path(credential_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.credential_service.set_primary(credential_id).await?;
    Ok(Json(MessageResponse::new(
        "Credential set as primary successfully",
    )))
}

async fn test_credential(
    State(state): State<AppState>,
    Path(credential_id): Path<Uuid>,
) -> Result<Json<CredentialTestResponse>, ApiError> {
    let credential = state.credential_service.test_credential(credential_id).await?;
    Ok(Json(CredentialTestResponse {
        status: "success",
        message: "Credential test completed",
        tested_at: credential.last_used,
    }))
}

#[derive(Debug, serde::Serialize)]
struct CredentialTestResponse {
    status: &'static str,
    message: &'static str,
    tested_at: Option<chrono::DateTime<chrono::Utc>>,
}
