use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use domain::{Applicant, ApplicantProfile};

use crate::{
    error::ApiError,
    routes::{ListQuery, MessageResponse},
    state::AppState,
};

pub(crate) fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/applicants",
            get(list_applicants).post(create_applicant),
        )
        .route("/applicants/primary/info", get(primary_applicant))
        .route(
            "/applicants/{applicant_id}",
            get(get_applicant)
                .put(update_applicant)
                .delete(delete_applicant),
        )
}

async fn create_applicant(
    State(state): State<AppState>,
    Json(payload): Json<ApplicantProfile>,
) -> Result<(StatusCode, Json<Applicant>), ApiError> {
    let applicant = state.applicant_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(applicant)))
}

async fn list_applicants(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Applicant>>, ApiError> {
    let applicants = state
        .applicant_service
        .list(query.skip(), query.limit())
        .await?;
    Ok(Json(applicants))
}

async fn get_applicant(
    State(state): State<AppState>,
    Path(applicant_id): Path<Uuid>,
) -> Result<Json<Applicant>, ApiError> {
    let applicant = state.applicant_service.get(applicant_id).await?;
    Ok(Json(applicant))
}

async fn update_applicant(
    State(state): State<AppState>,
    Path(applicant_id): Path<Uuid>,
    Json(payload): Json<ApplicantProfile>,
) -> Result<Json<Applicant>, ApiError> {
    let applicant = state
        .applicant_service
        .update(applicant_id, payload)
        .await?;
    Ok(Json(applicant))
}

async fn delete_applicant(
    State(state): State<AppState>,
    Path(applicant_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.applicant_service.delete(applicant_id).await?;
    Ok(Json(MessageResponse::new("Applicant deleted successfully")))
}

async fn primary_applicant(
    State(state): State<AppState>,
) -> Result<Json<Applicant>, ApiError> {
    let applicant = state
        .applicant_service
        .primary()
        .await?
        .ok_or_else(|| ApiError::not_found("No primary applicant found"))?;
    Ok(Json(applicant))
}
