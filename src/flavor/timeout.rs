//! RPC timeout classification
//!
//! Each transport reports a timed-out call with its own text. Callers that
//! need to tell timeouts apart from other RPC failures match the error
//! message against the active flavor's `rpc_timeout_message`.

use super::capability::ProtocolsFlavor;

/// True when `message` reports a timeout of the flavor's transport.
///
/// A flavor with an empty timeout message never classifies anything as a
/// timeout.
pub fn is_rpc_timeout(flavor: &dyn ProtocolsFlavor, message: &str) -> bool {
    let needle = flavor.rpc_timeout_message();
    !needle.is_empty() && message.contains(needle)
}

/// Classify an error by its `Display` text
pub fn is_rpc_timeout_error<E: std::fmt::Display + ?Sized>(
    flavor: &dyn ProtocolsFlavor,
    error: &E,
) -> bool {
    is_rpc_timeout(flavor, &error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flavor::builtin::{GoRpcFlavor, GrpcFlavor};
    use crate::flavor::definition::FlavorDefinition;

    #[test]
    fn test_grpc_deadline() {
        let msg = "rpc error: code = DeadlineExceeded desc = context deadline exceeded";
        assert!(is_rpc_timeout(&GrpcFlavor, msg));
        assert!(!is_rpc_timeout(&GoRpcFlavor, msg));
    }

    #[test]
    fn test_gorpc_timeout() {
        let msg = "vtctl: timeout waiting for tablet test_nj-0000062344";
        assert!(is_rpc_timeout(&GoRpcFlavor, msg));
        assert!(!is_rpc_timeout(&GrpcFlavor, msg));
    }

    #[test]
    fn test_empty_message_never_matches() {
        let flavor = FlavorDefinition::uniform("empty", "proto")
            .with_rpc_timeout_message("")
            .build()
            .unwrap();
        assert!(!is_rpc_timeout(&flavor, "anything at all"));
        assert!(!is_rpc_timeout(&flavor, ""));
    }

    #[test]
    fn test_classify_error_value() {
        let err = std::io::Error::new(std::io::ErrorKind::TimedOut, "context deadline exceeded");
        assert!(is_rpc_timeout_error(&GrpcFlavor, &err));
    }
}
