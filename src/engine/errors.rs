//! # Engine Faults

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Faults the engine raises on purpose
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InjectedFault {
    /// Probabilistic error escalated because `ERROR_TYPE=panic`
    #[error("Injected panic at request {request_count}: {message}")]
    Panic { request_count: u64, message: String },
}

impl InjectedFault {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            InjectedFault::Panic { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The catalog message carried by the fault
    pub fn message(&self) -> &str {
        match self {
            InjectedFault::Panic { message, .. } => message,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<InjectedFault> for ErrorResponse {
    fn from(fault: InjectedFault) -> Self {
        Self {
            code: fault.status_code().as_u16(),
            error: fault.to_string(),
        }
    }
}

impl IntoResponse for InjectedFault {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(ErrorResponse::from(self))).into_response()
    }
}
