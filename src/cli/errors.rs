//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit code.

use std::io;

use thiserror::Error;

use crate::config::ConfigError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Fault configuration could not be loaded
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// I/O error (stdout, socket)
    #[error("{0}")]
    Io(#[from] io::Error),

    /// JSON encoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Runtime or server startup failed
    #[error("{0}")]
    BootFailed(String),
}

impl CliError {
    /// Boot failed
    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::BootFailed(msg.into())
    }

    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "FAULT_CLI_CONFIG_ERROR",
            Self::Io(_) => "FAULT_CLI_IO_ERROR",
            Self::Json(_) => "FAULT_CLI_IO_ERROR",
            Self::BootFailed(_) => "FAULT_CLI_BOOT_FAILED",
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
