//! # Flavor Errors

use thiserror::Error;

/// Result type for flavor operations
pub type FlavorResult<T> = Result<T, FlavorError>;

/// Flavor errors
///
/// Every variant is a configuration or programming mistake. None of them
/// is transient, so nothing in this crate retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlavorError {
    #[error("Unknown protocols flavor {0}")]
    UnknownFlavor(String),

    #[error("Not implemented: {method}")]
    NotImplemented { method: &'static str },

    #[error("Protocols flavor already registered: {0}")]
    AlreadyRegistered(String),

    #[error("Invalid protocols flavor name: '{0}'")]
    InvalidName(String),

    #[error("No protocols flavor has been selected")]
    NotSelected,

    #[error("Invalid service map entry: '{0}'")]
    InvalidServiceMapEntry(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl FlavorError {
    /// Stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            FlavorError::UnknownFlavor(_) => "PROTOFLAVOR_UNKNOWN_FLAVOR",
            FlavorError::NotImplemented { .. } => "PROTOFLAVOR_NOT_IMPLEMENTED",
            FlavorError::AlreadyRegistered(_) => "PROTOFLAVOR_ALREADY_REGISTERED",
            FlavorError::InvalidName(_) => "PROTOFLAVOR_INVALID_NAME",
            FlavorError::NotSelected => "PROTOFLAVOR_NOT_SELECTED",
            FlavorError::InvalidServiceMapEntry(_) => "PROTOFLAVOR_INVALID_SERVICE_MAP_ENTRY",
            FlavorError::Internal(_) => "PROTOFLAVOR_INTERNAL",
        }
    }

    /// Whether the process must stop when this error reaches bootstrap.
    ///
    /// An unknown flavor leaves every dependent service without a protocol,
    /// and a partial flavor would fail on first use.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            FlavorError::UnknownFlavor(_) | FlavorError::NotImplemented { .. }
        )
    }

    /// Shorthand used by the lock helpers
    pub(crate) fn poisoned() -> Self {
        FlavorError::Internal("Lock poisoned".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_flavor_message() {
        let err = FlavorError::UnknownFlavor("nonexistent-flavor".into());
        assert_eq!(err.to_string(), "Unknown protocols flavor nonexistent-flavor");
        assert_eq!(err.code(), "PROTOFLAVOR_UNKNOWN_FLAVOR");
        assert!(err.is_fatal());
    }

    #[test]
    fn test_not_implemented_names_method() {
        let err = FlavorError::NotImplemented {
            method: "tabletconn_protocol",
        };
        assert!(err.to_string().contains("tabletconn_protocol"));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_registration_errors_not_fatal() {
        assert!(!FlavorError::AlreadyRegistered("grpc".into()).is_fatal());
        assert!(!FlavorError::NotSelected.is_fatal());
        assert_eq!(FlavorError::poisoned().code(), "PROTOFLAVOR_INTERNAL");
    }
}
