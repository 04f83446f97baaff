//! CLI command implementations
//!
//! `serve` boots in a fixed order: logging, configuration, banner, ticker,
//! HTTP server. Configuration errors abort before anything is bound.

use std::sync::Arc;
use std::time::Duration;

use crate::config::FaultConfig;
use crate::engine::FaultEngine;
use crate::http_server::{AppState, HttpServer};
use crate::observability::{init_logging, log_startup};
use crate::terminate::{ProcessExit, Terminator};
use crate::ticker::spawn_ticker;

use super::args::{Command, ServeArgs};
use super::errors::{CliError, CliResult};
use super::io::write_stdout;

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command())
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve(args) => serve(&args),
        Command::Config => show_config(),
    }
}

/// Serve the fault endpoints until the process exits
pub fn serve(args: &ServeArgs) -> CliResult<()> {
    init_logging();

    let config = FaultConfig::from_env()?;
    log_startup(&config);

    let engine = Arc::new(FaultEngine::new(config));
    let terminator: Arc<dyn Terminator> = Arc::new(ProcessExit);
    let state = AppState::new(engine.clone(), terminator.clone());
    let server = HttpServer::with_config(args.http_config(), state);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        // Dropping the handle detaches the ticker; it runs until exit.
        let _ticker = spawn_ticker(
            engine,
            terminator,
            Duration::from_millis(args.tick_interval_ms),
        );

        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Print the environment-derived fault configuration
pub fn show_config() -> CliResult<()> {
    let config = FaultConfig::from_env()?;
    write_stdout(&config)
}
