//! fault-service entry point
//!
//! Parses arguments and dispatches through `cli::run`. Any error is printed
//! to stderr and the process exits non-zero.

use fault_service::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}: {}", e.code(), e);
        std::process::exit(1);
    }
}
