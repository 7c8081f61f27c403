//! Configuration file
//!
//! ```json
//! {
//!   "protocols_flavor": "grpc",
//!   "flavors": [
//!     { "name": "thrift", "binlog_player_protocol": "thrift", ... }
//!   ]
//! }
//! ```
//!
//! Both keys are optional. Every entry of `flavors` must define all nine
//! capabilities; a partial entry rejects the whole file.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::flavor::{FlavorDefinition, FlavorRegistry};
use crate::observability::{log_event_with_fields, Event};

use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Flavor to select when neither the flag nor the environment names one
    #[serde(default)]
    pub protocols_flavor: Option<String>,

    /// Extra flavors, registered next to the built-in ones
    #[serde(default)]
    pub flavors: Vec<FlavorDefinition>,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        let path_str = path.display().to_string();
        log_event_with_fields(Event::ConfigLoaded, &[("path", path_str.as_str())]);

        Ok(config)
    }

    /// Load the file if one is given, otherwise use the empty configuration
    pub fn load_optional(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Validate configuration
    fn validate(&self) -> CliResult<()> {
        let mut seen = HashSet::new();
        for definition in &self.flavors {
            if !seen.insert(definition.name.as_str()) {
                return Err(CliError::config_error(format!(
                    "Duplicate flavor definition: '{}'",
                    definition.name
                )));
            }
            definition.build().map_err(|e| {
                CliError::config_error(format!("Flavor '{}': {}", definition.name, e))
            })?;
        }
        Ok(())
    }

    /// Built-in flavors plus the configured ones
    pub fn build_registry(&self) -> CliResult<FlavorRegistry> {
        let registry = FlavorRegistry::with_builtin()?;
        for definition in &self.flavors {
            registry.register_definition(definition).map_err(|e| {
                CliError::config_error(format!("Flavor '{}': {}", definition.name, e))
            })?;
        }
        Ok(registry)
    }

    /// Resolve the flavor name: explicit choice first, then the file.
    ///
    /// The result may be empty, which selects the default flavor.
    pub fn resolve_flavor(&self, explicit: Option<&str>) -> String {
        explicit
            .or(self.protocols_flavor.as_deref())
            .unwrap_or_default()
            .to_string()
    }
}
