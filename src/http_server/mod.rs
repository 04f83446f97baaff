//! # Fault Service HTTP Server
//!
//! Axum server exposing the fault engine.
//!
//! # Endpoints
//!
//! - `/` - Invoke the engine, report counters
//! - `/health` - Health check (500 when `ERROR_TYPE=unhealthy`)
//! - `/ready` - Readiness check (503 when `ERROR_TYPE=not-ready`)
//! - `/metrics` - Counters, never invokes the engine

pub mod config;
pub mod errors;
pub mod fault_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::RouteError;
pub use fault_routes::{fault_routes, AppState, SERVICE_MESSAGE};
pub use server::HttpServer;
