//! Fault configuration
//!
//! Loaded once at startup from the process environment and read-only
//! afterwards. Every field has a default so an empty environment yields a
//! service that injects nothing.

use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Environment variable names
pub mod vars {
    pub const ERROR_TYPE: &str = "ERROR_TYPE";
    pub const ERROR_RATE: &str = "ERROR_RATE";
    pub const CRASH_AFTER: &str = "CRASH_AFTER";
    pub const OOM_TRIGGER: &str = "OOM_TRIGGER";
    pub const FAULT_SEED: &str = "FAULT_SEED";
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("{var} must be within [0, 1], got {value}")]
    RateOutOfRange { var: &'static str, value: f64 },
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Failure mode selected by `ERROR_TYPE`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ErrorType {
    #[default]
    None,
    /// Probabilistic errors become request-fatal faults
    Panic,
    ImportError,
    DbError,
    ApiError,
    DiskFull,
    /// `/health` answers 500
    Unhealthy,
    /// `/ready` answers 503
    NotReady,
    /// Unrecognized tag, echoed back but otherwise inert
    Other(String),
}

impl ErrorType {
    /// Parse a tag. Unknown tags are kept verbatim.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "none" => ErrorType::None,
            "panic" => ErrorType::Panic,
            "import-error" => ErrorType::ImportError,
            "db-error" => ErrorType::DbError,
            "api-error" => ErrorType::ApiError,
            "disk-full" => ErrorType::DiskFull,
            "unhealthy" => ErrorType::Unhealthy,
            "not-ready" => ErrorType::NotReady,
            other => ErrorType::Other(other.to_string()),
        }
    }

    /// The tag as it appears in the environment and in responses
    pub fn as_str(&self) -> &str {
        match self {
            ErrorType::None => "none",
            ErrorType::Panic => "panic",
            ErrorType::ImportError => "import-error",
            ErrorType::DbError => "db-error",
            ErrorType::ApiError => "api-error",
            ErrorType::DiskFull => "disk-full",
            ErrorType::Unhealthy => "unhealthy",
            ErrorType::NotReady => "not-ready",
            ErrorType::Other(tag) => tag,
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Fault injection settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaultConfig {
    /// Failure mode (default: none)
    pub error_type: ErrorType,

    /// Probability of a random catalog error per invocation (default: 0)
    pub error_rate: f64,

    /// Terminate once this many invocations happened, 0 disables (default: 0)
    pub crash_after: u64,

    /// Leak one block per invocation (default: false)
    pub oom_trigger: bool,

    /// Fixed RNG seed for reproducible runs (default: OS entropy)
    pub seed: Option<u64>,
}

impl Default for FaultConfig {
    fn default() -> Self {
        Self {
            error_type: ErrorType::None,
            error_rate: 0.0,
            crash_after: 0,
            oom_trigger: false,
            seed: None,
        }
    }
}

impl FaultConfig {
    /// Load from the process environment
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let error_type = lookup(vars::ERROR_TYPE)
            .map(|tag| ErrorType::parse(&tag))
            .unwrap_or_default();

        let error_rate = match lookup(vars::ERROR_RATE) {
            Some(raw) => parse_rate(vars::ERROR_RATE, &raw)?,
            None => 0.0,
        };

        let crash_after = match lookup(vars::CRASH_AFTER) {
            Some(raw) => parse_u64(vars::CRASH_AFTER, &raw)?,
            None => 0,
        };

        let oom_trigger = lookup(vars::OOM_TRIGGER)
            .map(|raw| raw.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let seed = lookup(vars::FAULT_SEED)
            .map(|raw| parse_u64(vars::FAULT_SEED, &raw))
            .transpose()?;

        Ok(Self {
            error_type,
            error_rate,
            crash_after,
            oom_trigger,
            seed,
        })
    }

    /// Whether the crash-after policy is armed
    pub fn crash_enabled(&self) -> bool {
        self.crash_after > 0
    }
}

fn parse_rate(var: &'static str, raw: &str) -> ConfigResult<f64> {
    let value: f64 = raw.trim().parse().map_err(|e: std::num::ParseFloatError| {
        ConfigError::InvalidValue {
            var,
            value: raw.to_string(),
            reason: e.to_string(),
        }
    })?;

    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::RateOutOfRange { var, value });
    }
    Ok(value)
}

fn parse_u64(var: &'static str, raw: &str) -> ConfigResult<u64> {
    raw.trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
            var,
            value: raw.to_string(),
            reason: e.to_string(),
        })
}
