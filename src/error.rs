//! Error types for the registry API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::storage::StorageError;
use crate::users::password::CredentialError;

pub const MSG_BAD_REQUEST: &str = "Bad Request - Incorrect or Missing Data";
pub const MSG_GROUP_NOT_FOUND: &str = "Group Not Found";
pub const MSG_MEMBER_NOT_FOUND: &str = "Member Not Found";
pub const MSG_ORGANIZATION_NOT_FOUND: &str = "Organization Not Found";
pub const MSG_GROUP_AT_CAPACITY: &str = "Member not added - group at capacity";
pub const MSG_GROUP_SIZE_TOO_SMALL: &str =
    "New group size too small based on current number of members";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Rejected payload. The reason code is logged, never returned.
    #[error("validation failed: {reason} (code {code})")]
    Validation { code: u8, reason: &'static str },

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(&'static str),

    #[error("forbidden")]
    Forbidden,

    #[error("storage failure: {0}")]
    Storage(#[from] StorageError),

    #[error("credential failure: {0}")]
    Credentials(#[from] CredentialError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation { code, reason } => {
                tracing::warn!("Invalid data found! Reason: {} ({})", code, reason);
                (StatusCode::BAD_REQUEST, MSG_BAD_REQUEST).into_response()
            }
            ApiError::NotFound(message) => {
                tracing::info!("{}", message);
                (StatusCode::NOT_FOUND, message).into_response()
            }
            ApiError::Conflict(message) => {
                tracing::info!("{}", message);
                (StatusCode::CONFLICT, message).into_response()
            }
            ApiError::Forbidden => StatusCode::FORBIDDEN.into_response(),
            ApiError::Storage(e) => {
                tracing::error!("Request aborted on storage failure: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
            ApiError::Credentials(e) => {
                tracing::error!("Request aborted on credential failure: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
