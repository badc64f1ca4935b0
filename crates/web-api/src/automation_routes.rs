use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domain::eligibility::{self, VisaInfo};
use domain::{Booking, BookingDetails, CaptchaSolution, SystemStatus, VisaBookingRequest};

use crate::{error::ApiError, routes::ListQuery, state::AppState};

pub(crate) fn routes() -> Router<AppState> {
    Router::new()
        .route("/bls/validate-category", post(validate_category))
        .route("/bls/visa-info", get(visa_info))
        .route("/bls/book-appointment", post(book_appointment))
        .route("/bls/solve-captcha", post(solve_captcha))
        .route("/bls/status", get(system_status))
        .route("/bls/start", post(start_system))
        .route("/bls/stop", post(stop_system))
        .route("/bls/bookings", get(list_bookings))
}

#[derive(Debug, Deserialize)]
struct ValidateCategoryPayload {
    location: String,
    category: String,
    schengen_visa_history: String,
}

#[derive(Debug, Serialize)]
struct CategoryValidationResponse {
    is_valid: bool,
    message: String,
    recommended_categories: Vec<String>,
}

/// 类别资格校验是纯领域逻辑，不经过编排服务
async fn validate_category(
    Json(payload): Json<ValidateCategoryPayload>,
) -> Json<CategoryValidationResponse> {
    let outcome = eligibility::validate_tag(
        &payload.location,
        &payload.category,
        &payload.schengen_visa_history,
    );

    Json(CategoryValidationResponse {
        is_valid: outcome.is_valid,
        message: outcome.message,
        recommended_categories: outcome.recommended,
    })
}

async fn visa_info() -> Json<VisaInfo> {
    Json(VisaInfo::catalog())
}

#[derive(Debug, Serialize)]
struct BookingResponse {
    status: &'static str,
    message: &'static str,
    booking_id: Uuid,
    booking_details: BookingDetails,
}

async fn book_appointment(
    State(state): State<AppState>,
    Json(payload): Json<VisaBookingRequest>,
) -> Result<Json<BookingResponse>, ApiError> {
    let booking = state.booking_service.book_appointment(payload).await?;

    Ok(Json(BookingResponse {
        status: "success",
        message: "Appointment booking completed successfully",
        booking_id: booking.id,
        booking_details: booking.booking_details,
    }))
}

#[derive(Debug, Deserialize)]
struct CaptchaPayload {
    target_number: String,
    captcha_images: Vec<String>,
}

async fn solve_captcha(
    State(state): State<AppState>,
    Json(payload): Json<CaptchaPayload>,
) -> Result<Json<CaptchaSolution>, ApiError> {
    let solution = state
        .booking_service
        .solve_captcha(payload.target_number, payload.captcha_images)
        .await?;
    Ok(Json(solution))
}

async fn system_status(State(state): State<AppState>) -> Json<SystemStatus> {
    Json(state.booking_service.status().await)
}

#[derive(Debug, Serialize)]
struct SystemControlResponse {
    message: &'static str,
    status: SystemStatus,
}

async fn start_system(State(state): State<AppState>) -> Json<SystemControlResponse> {
    let status = state.booking_service.start_system().await;
    Json(SystemControlResponse {
        message: "BLS automation system started",
        status,
    })
}

async fn stop_system(State(state): State<AppState>) -> Json<SystemControlResponse> {
    let status = state.booking_service.stop_system().await;
    Json(SystemControlResponse {
        message: "BLS automation system stopped",
        status,
    })
}

async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Booking>>, ApiError> {
    let bookings = state
        .booking_service
        .list_bookings(query.skip(), query.limit())
        .await?;
    Ok(Json(bookings))
}
