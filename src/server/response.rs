//! Maps gateway errors onto HTTP statuses with a `{"detail": ...}` body.

use crate::domain::model::ErrorBody;
use crate::utils::error::{ErrorCategory, GatewayError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        if let GatewayError::RequestBodyError { status, .. } = self {
            return StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_REQUEST);
        }
        match self.category() {
            ErrorCategory::Authentication => StatusCode::UNAUTHORIZED,
            ErrorCategory::Validation => StatusCode::BAD_REQUEST,
            ErrorCategory::Upstream | ErrorCategory::Configuration | ErrorCategory::System => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
