//! CLI argument definitions using clap
//!
//! Commands:
//! - protoflavor show [--flavor <name>] [--config <path>]
//! - protoflavor service-map [--flavor <name>] [--config <path>]
//! - protoflavor list [--config <path>]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Select the protocols flavor for a sharded database toolchain
#[derive(Parser, Debug)]
#[command(name = "protoflavor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Also write DEBUG log lines
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Select a flavor and print every protocol choice it makes
    Show {
        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Select a flavor and print its service map, one entry per line
    ServiceMap {
        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// List registered flavor names
    List {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Where the flavor name and extra flavors come from
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Protocols flavor to select; empty selects the default
    #[arg(long, env = "PROTOCOLS_FLAVOR")]
    pub flavor: Option<String>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
