//! Maps domain [`Error`]s to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code, e.g. `EXHAUSTED`.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// HTTP status for an error kind.
#[must_use]
pub const fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::InvalidArgument => StatusCode::BAD_REQUEST,
        ErrorKind::Inactive | ErrorKind::Exhausted => StatusCode::CONFLICT,
        ErrorKind::PersistenceFailure | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let status = status_for(kind);

        // Store and internal failures are logged in full but not echoed back
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "Internal server error");
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        let body = ApiErrorResponse {
            error: kind.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(ErrorKind::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorKind::InvalidArgument), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorKind::Inactive), StatusCode::CONFLICT);
        assert_eq!(status_for(ErrorKind::Exhausted), StatusCode::CONFLICT);
        assert_eq!(
            status_for(ErrorKind::PersistenceFailure),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_database_error_is_not_leaked() {
        let response =
            Error::Database(sea_orm::DbErr::Custom("secret path".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
