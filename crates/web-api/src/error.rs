use application::ApplicationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                code,
                message: message.into(),
            },
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }
}

impl From<ApplicationError> for ApiError {
    fn from(error: ApplicationError) -> Self {
        use application::ApplicationError as AppErr;
        use domain::{DomainError, RepositoryError};

        match error {
            AppErr::Domain(DomainError::InvalidArgument { field, reason }) => ApiError::new(
                StatusCode::BAD_REQUEST,
                "INVALID_ARGUMENT",
                format!("{}: {}", field, reason),
            ),
            AppErr::Domain(DomainError::NoPrimaryCredential) => ApiError::new(
                StatusCode::BAD_REQUEST,
                "NO_PRIMARY_CREDENTIAL",
                "No primary credential found for automation",
            ),
            AppErr::Domain(DomainError::CredentialInactive) => ApiError::new(
                StatusCode::BAD_REQUEST,
                "CREDENTIAL_INACTIVE",
                "Primary credential is not active",
            ),
            AppErr::Domain(DomainError::NoPrimaryApplicant) => ApiError::new(
                StatusCode::BAD_REQUEST,
                "NO_PRIMARY_APPLICANT",
                "No primary applicant found for booking",
            ),
            AppErr::Domain(DomainError::CategoryNotEligible {
                category,
                recommended,
            }) => ApiError::new(
                StatusCode::BAD_REQUEST,
                "CATEGORY_NOT_ELIGIBLE",
                format!(
                    "Category '{}' does not match your Schengen visa history. Use: {}",
                    category,
                    recommended.join(", ")
                ),
            ),
            AppErr::Domain(DomainError::FamilyGroupNotEligible { reason }) => ApiError::new(
                StatusCode::BAD_REQUEST,
                "FAMILY_GROUP_NOT_ELIGIBLE",
                format!("FAMILY GROUP is not available: {}", reason),
            ),
            AppErr::Domain(DomainError::AutomationBusy) => ApiError::new(
                StatusCode::CONFLICT,
                "AUTOMATION_BUSY",
                "An automation task is already running",
            ),
            AppErr::Repository(RepositoryError::NotFound) => {
                ApiError::not_found("requested resource not found")
            }
            AppErr::Repository(RepositoryError::Conflict) => ApiError::new(
                StatusCode::CONFLICT,
                "CONFLICT",
                "resource already exists",
            ),
            AppErr::Repository(RepositoryError::Storage { message }) => ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORAGE_ERROR",
                format!("storage error: {}", message),
            ),
            AppErr::Automation(err) => ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "AUTOMATION_ERROR",
                format!("automation error: {}", err),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
