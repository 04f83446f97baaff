//! # Route Errors

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::engine::{ErrorResponse, InjectedFault};

/// Errors surfaced by the fault routes
#[derive(Debug, Clone, Error)]
pub enum RouteError {
    /// Injected fault escaped the engine
    #[error(transparent)]
    Fault(#[from] InjectedFault),

    /// Crash limit reached; the process is going away
    #[error("Service terminating: crash limit reached after {0} requests")]
    Terminating(u64),

    /// An earlier invocation already reached the crash limit
    #[error("Service terminating")]
    Halted,
}

impl RouteError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RouteError::Fault(fault) => fault.status_code(),
            RouteError::Terminating(_) | RouteError::Halted => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });
        (status, body).into_response()
    }
}
