//! Error to response mapping.
//!
//! - RateLimited → 429 with the upstream message
//! - Validation / BadRequest → 400 with the message
//! - Upstream failures, bad upstream data, unconfirmed deletes → 500
//!
//! Absent records never reach this module; handlers turn `None` into 404.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::employees::EmployeeError;
use crate::upstream::UpstreamError;

pub const NOT_FOUND_MESSAGE: &str = "Employee not found";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

impl EmployeeError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            EmployeeError::Validation(_) | EmployeeError::BadRequest(_) => StatusCode::BAD_REQUEST,
            EmployeeError::Upstream(UpstreamError::RateLimited { .. }) => StatusCode::TOO_MANY_REQUESTS,
            EmployeeError::Upstream(UpstreamError::Failure { .. })
            | EmployeeError::DataIntegrity(_)
            | EmployeeError::DeleteRejected { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for EmployeeError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            EmployeeError::DataIntegrity(e) => {
                tracing::error!(error = %e, "Upstream data integrity error");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            EmployeeError::Upstream(UpstreamError::Failure { detail, .. }) => {
                tracing::error!(error = %self, detail = %detail, "Upstream failure");
                self.to_string()
            }
            _ if status.is_server_error() => {
                tracing::error!(error = %self, "Request failed");
                self.to_string()
            }
            _ => {
                tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
                self.to_string()
            }
        };
        (status, body).into_response()
    }
}

/// 404 response for an absent employee.
pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE).into_response()
}
