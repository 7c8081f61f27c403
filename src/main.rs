//! protoflavor CLI entry point
//!
//! This is a minimal entrypoint that:
//! 1. Parses CLI arguments (via cli::run)
//! 2. Dispatches to CLI commands (via cli::run)
//! 3. Logs the failure as a FATAL event on stderr
//! 4. Exits with status 1 on failure, including an unknown flavor
//!
//! All logic is delegated to the CLI module.

use protoflavor::cli;
use protoflavor::observability::{log_event_with_fields, Event};

fn main() {
    if let Err(e) = cli::run() {
        log_event_with_fields(
            Event::BootstrapFailed,
            &[("code", e.code_str()), ("message", e.message())],
        );
        std::process::exit(1);
    }
}
