//! fault-service - a configurable fault-injection HTTP service
//!
//! Exercises health checks, alerting and log pipelines with synthetic
//! failures: logged errors, leaked memory, failing probes and crashes.

pub mod cli;
pub mod config;
pub mod engine;
pub mod http_server;
pub mod observability;
pub mod terminate;
pub mod ticker;
