//! Observability subsystem
//!
//! Structured JSON logging plus the typed events flavor selection emits.
//!
//! # Usage
//!
//! ```ignore
//! use protoflavor::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::FlavorSelected, &[("flavor", "grpc")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

#[cfg(test)]
pub(crate) use logger::capture_logs;

/// Log a lifecycle event with fields at its own severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
