//! CLI command implementations
//!
//! Every command runs the same bootstrap:
//! 1. Load the configuration file, if any
//! 2. Register built-in and configured flavors
//! 3. Select the flavor named by `--flavor`, `PROTOCOLS_FLAVOR`, or the file
//!
//! An unknown flavor stops here with an error; `main` turns it into exit 1.

use std::sync::Arc;

use serde_json::{json, Map, Value};

use crate::flavor::{Capability, FlavorRegistry, ProtocolsFlavor};
use crate::observability::{Logger, Severity};

use super::args::{Cli, Command, SelectionArgs};
use super::config::Config;
use super::errors::CliResult;
use super::io::{write_lines, write_response};

/// A registry with its selected flavor
pub struct Bootstrap {
    pub registry: FlavorRegistry,
    pub name: String,
    pub flavor: Arc<dyn ProtocolsFlavor>,
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    if cli.verbose {
        Logger::set_min_severity(Severity::Debug);
    }
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Show { selection } => show(&selection),
        Command::ServiceMap { selection } => service_map(&selection),
        Command::List { config } => list(config.as_deref()),
    }
}

/// Load configuration, register flavors and select one
pub fn bootstrap(selection: &SelectionArgs) -> CliResult<Bootstrap> {
    let config = Config::load_optional(selection.config.as_deref())?;
    let registry = config.build_registry()?;

    let requested = config.resolve_flavor(selection.flavor.as_deref());
    let flavor = registry.select(&requested)?;
    let name = registry.active_name().unwrap_or(requested);

    Ok(Bootstrap {
        registry,
        name,
        flavor,
    })
}

/// Every capability of a flavor as a JSON object
pub fn flavor_report(name: &str, flavor: &dyn ProtocolsFlavor) -> Value {
    let mut capabilities = Map::new();
    for capability in Capability::ALL {
        let value = serde_json::to_value(flavor.query(capability)).unwrap_or(Value::Null);
        capabilities.insert(capability.method_name().to_string(), value);
    }
    json!({
        "flavor": name,
        "capabilities": capabilities,
    })
}

/// Print the selected flavor's protocol choices
pub fn show(selection: &SelectionArgs) -> CliResult<()> {
    let boot = bootstrap(selection)?;
    write_response(flavor_report(&boot.name, boot.flavor.as_ref()))
}

/// Print the selected flavor's service map
pub fn service_map(selection: &SelectionArgs) -> CliResult<()> {
    let boot = bootstrap(selection)?;
    write_lines(&boot.flavor.service_map())
}

/// Print registered flavor names
pub fn list(config: Option<&std::path::Path>) -> CliResult<()> {
    let config = Config::load_optional(config)?;
    let registry = config.build_registry()?;
    write_response(json!({ "flavors": registry.names() }))
}
