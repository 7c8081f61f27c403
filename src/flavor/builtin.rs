//! Built-in protocols flavors
//!
//! - `gorpc`: the baseline RPC transport, and the default flavor
//! - `grpc`: gRPC for every role
//!
//! Both are registered by [`register_builtin`].

use super::capability::ProtocolsFlavor;
use super::errors::FlavorResult;
use super::registry::FlavorRegistry;

/// Name of the baseline flavor
pub const GORPC: &str = "gorpc";

/// Name of the gRPC flavor
pub const GRPC: &str = "grpc";

const GORPC_SERVICE_MAP: [&str; 7] = [
    "bsonrpc-vt-queryservice",
    "bsonrpc-vt-tabletmanager",
    "bsonrpc-vt-toporeader",
    "bsonrpc-vt-updatestream",
    "bsonrpc-vt-vtctl",
    "bsonrpc-vt-vtgateservice",
    "bsonrpc-vt-vtworker",
];

const GRPC_SERVICE_MAP: [&str; 6] = [
    "grpc-queryservice",
    "grpc-tabletmanager",
    "grpc-updatestream",
    "grpc-vtctl",
    "grpc-vtgateservice",
    "grpc-vtworker",
];

/// Baseline RPC flavor. Tablet management still goes over BSON RPC.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoRpcFlavor;

impl ProtocolsFlavor for GoRpcFlavor {
    fn binlog_player_protocol(&self) -> &str {
        "gorpc"
    }

    fn vtctl_client_protocol(&self) -> &str {
        "gorpc"
    }

    fn vtctl_python_client_protocol(&self) -> &str {
        "gorpc"
    }

    fn vtworker_client_protocol(&self) -> &str {
        "gorpc"
    }

    fn tablet_manager_protocol(&self) -> &str {
        "bson"
    }

    fn tabletconn_protocol(&self) -> &str {
        "gorpc"
    }

    fn vtgate_protocol_flags(&self) -> &str {
        "-vtgate_protocol gorpc"
    }

    fn rpc_timeout_message(&self) -> &str {
        "timeout waiting for"
    }

    fn service_map(&self) -> Vec<String> {
        GORPC_SERVICE_MAP.iter().map(|s| s.to_string()).collect()
    }
}

/// gRPC for every role
#[derive(Debug, Clone, Copy, Default)]
pub struct GrpcFlavor;

impl ProtocolsFlavor for GrpcFlavor {
    fn binlog_player_protocol(&self) -> &str {
        "grpc"
    }

    fn vtctl_client_protocol(&self) -> &str {
        "grpc"
    }

    fn vtctl_python_client_protocol(&self) -> &str {
        "grpc"
    }

    fn vtworker_client_protocol(&self) -> &str {
        "grpc"
    }

    fn tablet_manager_protocol(&self) -> &str {
        "grpc"
    }

    fn tabletconn_protocol(&self) -> &str {
        "grpc"
    }

    fn vtgate_protocol_flags(&self) -> &str {
        "-vtgate_protocol grpc"
    }

    fn rpc_timeout_message(&self) -> &str {
        "context deadline exceeded"
    }

    fn service_map(&self) -> Vec<String> {
        GRPC_SERVICE_MAP.iter().map(|s| s.to_string()).collect()
    }
}

/// Register `gorpc` and `grpc`
pub fn register_builtin(registry: &FlavorRegistry) -> FlavorResult<()> {
    registry.register(GORPC, || Box::new(GoRpcFlavor))?;
    registry.register(GRPC, || Box::new(GrpcFlavor))?;
    Ok(())
}
