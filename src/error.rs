use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::http::ApiResponse;
use crate::user_actor::UserError;

pub const RESOURCE_NOT_FOUND: &str = "Resource not found";
pub const BAD_REQUEST: &str = "Bad request";
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// Errors surfaced to HTTP callers. Each maps onto one status code.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("internal error: {0}")]
    Internal(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<UserError> for ApiError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::NotFound(_) => ApiError::NotFound("User not found".to_string()),
            UserError::AlreadyExists(_) => ApiError::BadRequest("Email already exists".to_string()),
            UserError::ValidationError(msg) => ApiError::BadRequest(msg),
            UserError::ActorCommunicationError(msg) => ApiError::Internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::NotFound(msg) | ApiError::BadRequest(msg) => msg,
            ApiError::Internal(detail) => {
                error!(error = %detail, "Request failed");
                INTERNAL_SERVER_ERROR.to_string()
            }
        };
        (status, Json(ApiResponse::failure(message))).into_response()
    }
}
