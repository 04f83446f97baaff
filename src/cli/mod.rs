//! CLI module for fault-service
//!
//! Provides command-line interface for:
//! - serve: Run the HTTP endpoints and the background ticker
//! - config: Print the resolved fault configuration

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, ServeArgs};
pub use commands::{run, run_command, serve, show_config};
pub use errors::{CliError, CliResult};
pub use io::{write_json, write_stdout};
