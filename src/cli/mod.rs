//! CLI module
//!
//! Provides command-line interface for:
//! - show: select a flavor and print its protocol choices
//! - service-map: print the service map of the selected flavor
//! - list: print registered flavor names

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command, SelectionArgs};
pub use commands::{bootstrap, flavor_report, list, run, run_command, service_map, show, Bootstrap};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_lines, write_response};
