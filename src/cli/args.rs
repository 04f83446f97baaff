//! CLI argument definitions using clap
//!
//! Commands:
//! - fault-service serve [--host H] [--port P] [--tick-interval-ms MS]
//! - fault-service config
//!
//! Fault settings always come from the environment; flags only cover where
//! the service listens and how often the ticker fires.

use clap::{Args, Parser, Subcommand};

use crate::http_server::HttpServerConfig;

/// fault-service - synthetic failures on demand
#[derive(Parser, Debug)]
#[command(name = "fault-service")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Serve the fault endpoints and run the background ticker
    Serve(ServeArgs),

    /// Print the fault configuration resolved from the environment
    Config,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind
    #[arg(long, default_value_t = 3000)]
    pub port: u16,

    /// Milliseconds between background engine invocations
    #[arg(long, default_value_t = 5000)]
    pub tick_interval_ms: u64,
}

impl Default for ServeArgs {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            tick_interval_ms: 5000,
        }
    }
}

impl ServeArgs {
    pub fn http_config(&self) -> HttpServerConfig {
        HttpServerConfig {
            host: self.host.clone(),
            port: self.port,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// The command to run, `serve` with defaults when none was given
    pub fn command(self) -> Command {
        self.command
            .unwrap_or_else(|| Command::Serve(ServeArgs::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_serves_with_defaults() {
        let cli = Cli::try_parse_from(["fault-service"]).unwrap();
        assert_eq!(cli.command(), Command::Serve(ServeArgs::default()));
    }

    #[test]
    fn test_serve_flags() {
        let cli = Cli::try_parse_from([
            "fault-service",
            "serve",
            "--port",
            "0",
            "--host",
            "127.0.0.1",
            "--tick-interval-ms",
            "20",
        ])
        .unwrap();

        match cli.command() {
            Command::Serve(args) => {
                assert_eq!(args.http_config().socket_addr(), "127.0.0.1:0");
                assert_eq!(args.tick_interval_ms, 20);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_serve_defaults_match_default_impl() {
        let cli = Cli::try_parse_from(["fault-service", "serve"]).unwrap();
        assert_eq!(cli.command(), Command::Serve(ServeArgs::default()));
    }

    #[test]
    fn test_config_subcommand() {
        let cli = Cli::try_parse_from(["fault-service", "config"]).unwrap();
        assert_eq!(cli.command(), Command::Config);
    }
}
