use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use murmur_db::DbError;

pub const MALFORMED: &str = "400: Malformed request data.";
pub const UNAUTHORISED: &str = "401: No authentication key.";
pub const NOT_FOUND: &str = "404: Not found.";

/// Every way a request can fail. The display text is the response body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad, missing or oversized input.
    #[error("{0}")]
    Malformed(&'static str),

    /// Missing or unknown credential, or not the admin.
    #[error("401: No authentication key.")]
    Unauthorized,

    #[error("404: Not found.")]
    NotFound,

    /// Reserved or taken names and attempts to act on oneself.
    #[error("{0}")]
    Forbidden(&'static str),

    #[error("internal error: {0}")]
    Internal(#[from] DbError),
}

impl ApiError {
    pub fn malformed() -> Self {
        Self::Malformed(MALFORMED)
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Malformed(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized | Self::Forbidden(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(_: JsonRejection) -> Self {
        Self::malformed()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let Self::Internal(e) = &self {
            error!("Request failed: {}", e);
            return (status, "500: Internal error.").into_response();
        }
        (status, self.to_string()).into_response()
    }
}
