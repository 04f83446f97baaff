//! Logging setup
//!
//! Log lines are the service's main output: observers scrape stdout to see
//! the injected failures. All logging goes through `tracing`; this module
//! installs the global subscriber that renders it.

mod logger;

pub use logger::{LineFormat, Severity, CRITICAL_TARGET, TIMESTAMP_FORMAT};

use std::io;

use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::prelude::*;

use crate::config::FaultConfig;

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber writing [`LineFormat`] lines to stdout.
///
/// Respects `RUST_LOG`. Calling it twice keeps the first subscriber.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .event_format(LineFormat)
            .with_writer(io::stdout),
    );
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Log the startup banner with the active configuration
pub fn log_startup(config: &FaultConfig) {
    tracing::info!("🚀 Rust error generator started");
    tracing::info!("📊 Configuration:");
    tracing::info!("   ERROR_TYPE: {}", config.error_type);
    tracing::info!("   ERROR_RATE: {}", config.error_rate);
    tracing::info!("   CRASH_AFTER: {}", config.crash_after);
    tracing::info!("   OOM_TRIGGER: {}", config.oom_trigger);
    if let Some(seed) = config.seed {
        tracing::info!("   FAULT_SEED: {}", seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ErrorType;
    use tracing_test::traced_test;

    #[test]
    #[traced_test]
    fn test_startup_banner() {
        let config = FaultConfig {
            error_type: ErrorType::DiskFull,
            crash_after: 12,
            ..Default::default()
        };
        log_startup(&config);

        assert!(logs_contain("error generator started"));
        assert!(logs_contain("ERROR_TYPE: disk-full"));
        assert!(logs_contain("CRASH_AFTER: 12"));
        assert!(!logs_contain("FAULT_SEED"));
    }
}
