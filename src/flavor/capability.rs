//! Capability interface every protocols flavor satisfies
//!
//! A flavor answers nine questions, one per protocol surface. The answers
//! are plain selector strings (transport names or flags) plus the ordered
//! service map a server process enables.
//!
//! The trait has no default bodies. A Rust flavor that forgets a method does
//! not compile, so a partially implemented flavor never reaches runtime.
//! Declarative flavors get the same guarantee at construction time, see
//! [`super::definition`].

use std::fmt;

use serde::Serialize;

/// The protocol choices for every role of the toolchain.
pub trait ProtocolsFlavor: Send + Sync {
    /// Transport used for replication log streaming between nodes
    fn binlog_player_protocol(&self) -> &str;

    /// Transport used by the statically-typed cluster control client
    fn vtctl_client_protocol(&self) -> &str;

    /// Transport used by the dynamically-typed cluster control client
    fn vtctl_python_client_protocol(&self) -> &str;

    /// Transport used by the worker client
    fn vtworker_client_protocol(&self) -> &str;

    /// Transport for tablet lifecycle management calls
    fn tablet_manager_protocol(&self) -> &str;

    /// Transport used by control and gateway processes to reach a tablet server
    fn tabletconn_protocol(&self) -> &str;

    /// Extra flags configuring the query gateway protocol
    fn vtgate_protocol_flags(&self) -> &str;

    /// Substring the transport emits when a call times out.
    ///
    /// Error classifiers match on it, so it must be the exact text.
    fn rpc_timeout_message(&self) -> &str;

    /// Ordered `<protocol>-<service>` entries a server process should register
    fn service_map(&self) -> Vec<String>;

    /// Answer any capability through one entry point
    fn query(&self, capability: Capability) -> CapabilityValue {
        let selector = match capability {
            Capability::BinlogPlayerProtocol => self.binlog_player_protocol(),
            Capability::VtctlClientProtocol => self.vtctl_client_protocol(),
            Capability::VtctlPythonClientProtocol => self.vtctl_python_client_protocol(),
            Capability::VtworkerClientProtocol => self.vtworker_client_protocol(),
            Capability::TabletManagerProtocol => self.tablet_manager_protocol(),
            Capability::TabletconnProtocol => self.tabletconn_protocol(),
            Capability::VtgateProtocolFlags => self.vtgate_protocol_flags(),
            Capability::RpcTimeoutMessage => self.rpc_timeout_message(),
            Capability::ServiceMap => return CapabilityValue::ServiceMap(self.service_map()),
        };
        CapabilityValue::Selector(selector.to_string())
    }
}

impl fmt::Debug for dyn ProtocolsFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProtocolsFlavor")
            .field("tabletconn_protocol", &self.tabletconn_protocol())
            .field("tablet_manager_protocol", &self.tablet_manager_protocol())
            .finish_non_exhaustive()
    }
}

/// One query of the capability interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    BinlogPlayerProtocol,
    VtctlClientProtocol,
    VtctlPythonClientProtocol,
    VtworkerClientProtocol,
    TabletManagerProtocol,
    TabletconnProtocol,
    VtgateProtocolFlags,
    RpcTimeoutMessage,
    ServiceMap,
}

impl Capability {
    /// All capabilities, in interface order
    pub const ALL: [Capability; 9] = [
        Capability::BinlogPlayerProtocol,
        Capability::VtctlClientProtocol,
        Capability::VtctlPythonClientProtocol,
        Capability::VtworkerClientProtocol,
        Capability::TabletManagerProtocol,
        Capability::TabletconnProtocol,
        Capability::VtgateProtocolFlags,
        Capability::RpcTimeoutMessage,
        Capability::ServiceMap,
    ];

    /// Name of the interface method answering this capability
    pub fn method_name(&self) -> &'static str {
        match self {
            Capability::BinlogPlayerProtocol => "binlog_player_protocol",
            Capability::VtctlClientProtocol => "vtctl_client_protocol",
            Capability::VtctlPythonClientProtocol => "vtctl_python_client_protocol",
            Capability::VtworkerClientProtocol => "vtworker_client_protocol",
            Capability::TabletManagerProtocol => "tablet_manager_protocol",
            Capability::TabletconnProtocol => "tabletconn_protocol",
            Capability::VtgateProtocolFlags => "vtgate_protocol_flags",
            Capability::RpcTimeoutMessage => "rpc_timeout_message",
            Capability::ServiceMap => "service_map",
        }
    }

    /// Look a capability up by its method name
    pub fn from_method_name(name: &str) -> Option<Capability> {
        Capability::ALL
            .iter()
            .copied()
            .find(|c| c.method_name() == name)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.method_name())
    }
}

/// Answer to a [`Capability`] query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CapabilityValue {
    Selector(String),
    ServiceMap(Vec<String>),
}

impl CapabilityValue {
    /// Selector text, if this is a selector
    pub fn as_selector(&self) -> Option<&str> {
        match self {
            CapabilityValue::Selector(s) => Some(s),
            CapabilityValue::ServiceMap(_) => None,
        }
    }

    /// Service map entries, if this is a service map
    pub fn as_service_map(&self) -> Option<&[String]> {
        match self {
            CapabilityValue::Selector(_) => None,
            CapabilityValue::ServiceMap(entries) => Some(entries),
        }
    }
}
