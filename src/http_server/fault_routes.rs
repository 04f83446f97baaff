//! Fault Routes
//!
//! The four endpoints observers poll. Only `/` drives the engine; the others
//! read state and answer according to the configured error type.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use crate::config::ErrorType;
use crate::engine::{EngineOutcome, FaultEngine};
use crate::terminate::Terminator;

use super::errors::RouteError;

/// Message returned by `/`
pub const SERVICE_MESSAGE: &str = "Rust service running";

// ==================
// State
// ==================

/// Shared state for the fault routes
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<FaultEngine>,
    pub terminator: Arc<dyn Terminator>,
}

impl AppState {
    pub fn new(engine: Arc<FaultEngine>, terminator: Arc<dyn Terminator>) -> Self {
        Self { engine, terminator }
    }
}

// ==================
// Responses
// ==================

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub message: String,
    pub requests: u64,
    pub error_type: ErrorType,
    pub error_rate: f64,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requests: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub requests_total: u64,
    pub error_type: ErrorType,
    pub timestamp: String,
}

// ==================
// Router
// ==================

/// Create the fault routes
pub fn fault_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Invoke the engine and report status
async fn index_handler(State(state): State<AppState>) -> Result<Json<IndexResponse>, RouteError> {
    let requests = match state.engine.invoke()? {
        EngineOutcome::Continue(report) => report.request_count,
        EngineOutcome::Terminate { request_count } => {
            state.terminator.terminate(request_count);
            return Err(RouteError::Terminating(request_count));
        }
        EngineOutcome::Halted => return Err(RouteError::Halted),
    };

    let config = state.engine.config();
    Ok(Json(IndexResponse {
        message: SERVICE_MESSAGE.to_string(),
        requests,
        error_type: config.error_type.clone(),
        error_rate: config.error_rate,
    }))
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    if state.engine.config().error_type == ErrorType::Unhealthy {
        let response = HealthResponse {
            status: "unhealthy".to_string(),
            requests: None,
            error: Some("Service degraded".to_string()),
        };
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(response));
    }

    let response = HealthResponse {
        status: "healthy".to_string(),
        requests: Some(state.engine.request_count()),
        error: None,
    };
    (StatusCode::OK, Json(response))
}

async fn ready_handler(State(state): State<AppState>) -> impl IntoResponse {
    if state.engine.config().error_type == ErrorType::NotReady {
        let response = ReadyResponse {
            ready: false,
            reason: Some("Dependencies unavailable".to_string()),
        };
        return (StatusCode::SERVICE_UNAVAILABLE, Json(response));
    }

    (
        StatusCode::OK,
        Json(ReadyResponse {
            ready: true,
            reason: None,
        }),
    )
}

/// Read-only counters; never drives the engine
async fn metrics_handler(State(state): State<AppState>) -> Json<MetricsResponse> {
    Json(MetricsResponse {
        requests_total: state.engine.request_count(),
        error_type: state.engine.config().error_type.clone(),
        timestamp: chrono::Local::now().to_rfc3339(),
    })
}
