//! # Flavor Registry
//!
//! Maps flavor names to constructors and holds the one active flavor.
//!
//! The registry is an ordinary value. Bootstrap builds it, registers
//! flavors, selects one, then passes it (or the selected `Arc`) to every
//! component that needs protocol choices.
//!
//! Rules:
//! - registering an empty or already registered name fails
//! - selecting the empty name selects [`DEFAULT_FLAVOR`]
//! - selecting an unknown name fails and leaves the active flavor alone
//! - selecting again replaces the active flavor and logs a warning

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use super::builtin::{self, GORPC};
use super::capability::ProtocolsFlavor;
use super::definition::FlavorDefinition;
use super::errors::{FlavorError, FlavorResult};
use crate::observability::{log_event_with_fields, Event};

/// Flavor used when selection is given an empty name
pub const DEFAULT_FLAVOR: &str = GORPC;

/// Zero-argument constructor producing a flavor instance
pub type FlavorConstructor = Box<dyn Fn() -> Box<dyn ProtocolsFlavor> + Send + Sync>;

struct ActiveFlavor {
    name: String,
    flavor: Arc<dyn ProtocolsFlavor>,
}

/// Registry of protocols flavors
#[derive(Default)]
pub struct FlavorRegistry {
    /// Constructors by flavor name
    constructors: RwLock<HashMap<String, FlavorConstructor>>,

    /// Currently selected flavor
    active: RwLock<Option<ActiveFlavor>>,
}

impl FlavorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in flavors
    pub fn with_builtin() -> FlavorResult<Self> {
        let registry = Self::new();
        builtin::register_builtin(&registry)?;
        Ok(registry)
    }

    /// Register a constructor under a name
    pub fn register<F>(&self, name: &str, constructor: F) -> FlavorResult<()>
    where
        F: Fn() -> Box<dyn ProtocolsFlavor> + Send + Sync + 'static,
    {
        if name.trim().is_empty() {
            return Err(FlavorError::InvalidName(name.to_string()));
        }

        let mut constructors = self.constructors.write().map_err(|_| FlavorError::poisoned())?;
        if constructors.contains_key(name) {
            return Err(FlavorError::AlreadyRegistered(name.to_string()));
        }
        constructors.insert(name.to_string(), Box::new(constructor));
        drop(constructors);

        log_event_with_fields(Event::FlavorRegistered, &[("flavor", name)]);
        Ok(())
    }

    /// Validate a declarative flavor and register it under its own name
    pub fn register_definition(&self, definition: &FlavorDefinition) -> FlavorResult<()> {
        let flavor = definition.build()?;
        let name = flavor.name().to_string();
        self.register(&name, move || Box::new(flavor.clone()))
    }

    /// Check whether a name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.constructors
            .read()
            .map(|m| m.contains_key(name))
            .unwrap_or(false)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .constructors
            .read()
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    /// Get registered flavor count
    pub fn len(&self) -> usize {
        self.constructors.read().map(|m| m.len()).unwrap_or(0)
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build a fresh instance of a registered flavor without selecting it
    pub fn construct(&self, name: &str) -> FlavorResult<Box<dyn ProtocolsFlavor>> {
        let constructors = self.constructors.read().map_err(|_| FlavorError::poisoned())?;
        constructors
            .get(name)
            .map(|constructor| constructor())
            .ok_or_else(|| FlavorError::UnknownFlavor(name.to_string()))
    }

    /// Select the active flavor.
    ///
    /// An empty name selects [`DEFAULT_FLAVOR`]. Constructs exactly one
    /// instance and returns it.
    pub fn select(&self, name: &str) -> FlavorResult<Arc<dyn ProtocolsFlavor>> {
        let name = if name.is_empty() { DEFAULT_FLAVOR } else { name };

        let flavor: Arc<dyn ProtocolsFlavor> = match self.construct(name) {
            Ok(flavor) => Arc::from(flavor),
            Err(FlavorError::UnknownFlavor(_)) => {
                let message = format!("Unknown protocols flavor {}", name);
                log_event_with_fields(
                    Event::FlavorUnknown,
                    &[("flavor", name), ("message", message.as_str())],
                );
                return Err(FlavorError::UnknownFlavor(name.to_string()));
            }
            Err(e) => return Err(e),
        };

        let mut active = self.active.write().map_err(|_| FlavorError::poisoned())?;
        if let Some(previous) = active.as_ref() {
            log_event_with_fields(
                Event::FlavorReselected,
                &[("flavor", name), ("previous", previous.name.as_str())],
            );
        }
        *active = Some(ActiveFlavor {
            name: name.to_string(),
            flavor: Arc::clone(&flavor),
        });
        drop(active);

        let message = format!("Using protocols flavor {}", name);
        log_event_with_fields(
            Event::FlavorSelected,
            &[("flavor", name), ("message", message.as_str())],
        );
        Ok(flavor)
    }

    /// The active flavor, or `NotSelected` before the first successful select
    pub fn active(&self) -> FlavorResult<Arc<dyn ProtocolsFlavor>> {
        let active = self.active.read().map_err(|_| FlavorError::poisoned())?;
        active
            .as_ref()
            .map(|a| Arc::clone(&a.flavor))
            .ok_or(FlavorError::NotSelected)
    }

    /// Name of the active flavor
    pub fn active_name(&self) -> Option<String> {
        self.active
            .read()
            .ok()
            .and_then(|a| a.as_ref().map(|a| a.name.clone()))
    }

    /// Whether a flavor has been selected
    pub fn is_selected(&self) -> bool {
        self.active_name().is_some()
    }
}

impl fmt::Debug for FlavorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlavorRegistry")
            .field("flavors", &self.names())
            .field("active", &self.active_name())
            .finish()
    }
}
