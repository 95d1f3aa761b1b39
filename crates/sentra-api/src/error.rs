use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use sentra_store::StoreError;
use sentra_types::api::ErrorResponse;

/// Failure of one of the in-process services the handlers call into.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Returned by `Analyzer` implementations backed by a real scoring service.
    #[error("analysis unavailable: {0}")]
    Analysis(String),

    /// Returned by `ReportGenerator` implementations that render actual reports.
    #[error("report generation unavailable: {0}")]
    Report(String),
}

/// Errors returned by the JSON API. Page handlers render their errors inline instead.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Not found")]
    NotFound,

    #[error("Malformed upload")]
    MalformedUpload,

    #[error("Internal error")]
    Internal(#[from] ServiceError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Unauthorized | ApiError::InvalidToken => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MalformedUpload => StatusCode::BAD_REQUEST,
            ApiError::Internal(ref e) => {
                tracing::error!("API request failed: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (
            status,
            Json(ErrorResponse {
                success: false,
                message: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { .. } => ApiError::NotFound,
            other => ApiError::Internal(ServiceError::Store(other)),
        }
    }
}
