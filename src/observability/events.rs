//! Observable events
//!
//! Events are explicit and typed. Each maps to one stable uppercase name
//! and one severity.

use std::fmt;

use super::logger::Severity;

/// Observable events in flavor selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Registry
    /// A flavor constructor was registered
    FlavorRegistered,
    /// A flavor was selected as the active one
    FlavorSelected,
    /// An active flavor was replaced by a later selection
    FlavorReselected,
    /// Selection named a flavor nobody registered
    FlavorUnknown,

    // Bootstrap
    /// Configuration file loaded
    ConfigLoaded,
    /// Bootstrap gives up and exits
    BootstrapFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::FlavorRegistered => "PROTOCOLS_FLAVOR_REGISTERED",
            Event::FlavorSelected => "PROTOCOLS_FLAVOR_SELECTED",
            Event::FlavorReselected => "PROTOCOLS_FLAVOR_RESELECTED",
            Event::FlavorUnknown => "PROTOCOLS_FLAVOR_UNKNOWN",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::BootstrapFailed => "BOOTSTRAP_FAILED",
        }
    }

    /// Severity this event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::FlavorRegistered | Event::FlavorSelected => Severity::Debug,
            Event::ConfigLoaded => Severity::Info,
            Event::FlavorReselected => Severity::Warn,
            Event::FlavorUnknown => Severity::Error,
            Event::BootstrapFailed => Severity::Fatal,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
