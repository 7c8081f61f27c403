//! Declarative flavors
//!
//! A [`FlavorDefinition`] describes a flavor as data, typically loaded from
//! the configuration file. Any capability may be missing from a definition;
//! asking for a missing one yields `NotImplemented` naming the method.
//!
//! Only complete definitions become a [`DefinedFlavor`], the type that
//! implements [`ProtocolsFlavor`]. A partial flavor is therefore rejected
//! when it is registered, never when a service first queries it.

use serde::{Deserialize, Serialize};

use super::capability::{Capability, CapabilityValue, ProtocolsFlavor};
use super::errors::{FlavorError, FlavorResult};
use super::service_map::ServiceMapEntry;

/// A possibly partial flavor description
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlavorDefinition {
    /// Name the flavor is registered under
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binlog_player_protocol: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vtctl_client_protocol: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vtctl_python_client_protocol: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vtworker_client_protocol: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tablet_manager_protocol: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tabletconn_protocol: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vtgate_protocol_flags: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_timeout_message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_map: Option<Vec<String>>,
}

impl FlavorDefinition {
    /// A definition with no capabilities
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// A definition using one transport for every role.
    ///
    /// Leaves `rpc_timeout_message` unset; that text is transport specific.
    pub fn uniform(name: impl Into<String>, protocol: &str) -> Self {
        let services = [
            "queryservice",
            "tabletmanager",
            "updatestream",
            "vtctl",
            "vtgateservice",
            "vtworker",
        ];
        Self {
            name: name.into(),
            binlog_player_protocol: Some(protocol.to_string()),
            vtctl_client_protocol: Some(protocol.to_string()),
            vtctl_python_client_protocol: Some(protocol.to_string()),
            vtworker_client_protocol: Some(protocol.to_string()),
            tablet_manager_protocol: Some(protocol.to_string()),
            tabletconn_protocol: Some(protocol.to_string()),
            vtgate_protocol_flags: Some(format!("-vtgate_protocol {}", protocol)),
            rpc_timeout_message: None,
            service_map: Some(
                services
                    .iter()
                    .map(|s| format!("{}-{}", protocol, s))
                    .collect(),
            ),
        }
    }

    /// Set the timeout message
    pub fn with_rpc_timeout_message(mut self, message: impl Into<String>) -> Self {
        self.rpc_timeout_message = Some(message.into());
        self
    }

    /// Set the service map
    pub fn with_service_map(mut self, entries: Vec<String>) -> Self {
        self.service_map = Some(entries);
        self
    }

    /// Set one selector capability. `ServiceMap` is not a selector and is ignored.
    pub fn with_selector(mut self, capability: Capability, value: impl Into<String>) -> Self {
        if let Some(slot) = self.selector_slot(capability) {
            *slot = Some(value.into());
        }
        self
    }

    fn selector_slot(&mut self, capability: Capability) -> Option<&mut Option<String>> {
        match capability {
            Capability::BinlogPlayerProtocol => Some(&mut self.binlog_player_protocol),
            Capability::VtctlClientProtocol => Some(&mut self.vtctl_client_protocol),
            Capability::VtctlPythonClientProtocol => Some(&mut self.vtctl_python_client_protocol),
            Capability::VtworkerClientProtocol => Some(&mut self.vtworker_client_protocol),
            Capability::TabletManagerProtocol => Some(&mut self.tablet_manager_protocol),
            Capability::TabletconnProtocol => Some(&mut self.tabletconn_protocol),
            Capability::VtgateProtocolFlags => Some(&mut self.vtgate_protocol_flags),
            Capability::RpcTimeoutMessage => Some(&mut self.rpc_timeout_message),
            Capability::ServiceMap => None,
        }
    }

    fn selector(&self, capability: Capability) -> Option<&String> {
        match capability {
            Capability::BinlogPlayerProtocol => self.binlog_player_protocol.as_ref(),
            Capability::VtctlClientProtocol => self.vtctl_client_protocol.as_ref(),
            Capability::VtctlPythonClientProtocol => self.vtctl_python_client_protocol.as_ref(),
            Capability::VtworkerClientProtocol => self.vtworker_client_protocol.as_ref(),
            Capability::TabletManagerProtocol => self.tablet_manager_protocol.as_ref(),
            Capability::TabletconnProtocol => self.tabletconn_protocol.as_ref(),
            Capability::VtgateProtocolFlags => self.vtgate_protocol_flags.as_ref(),
            Capability::RpcTimeoutMessage => self.rpc_timeout_message.as_ref(),
            Capability::ServiceMap => None,
        }
    }

    /// Answer a capability, or `NotImplemented` if the definition omits it
    pub fn query(&self, capability: Capability) -> FlavorResult<CapabilityValue> {
        let not_implemented = || FlavorError::NotImplemented {
            method: capability.method_name(),
        };
        match capability {
            Capability::ServiceMap => self
                .service_map
                .clone()
                .map(CapabilityValue::ServiceMap)
                .ok_or_else(not_implemented),
            _ => self
                .selector(capability)
                .map(|s| CapabilityValue::Selector(s.clone()))
                .ok_or_else(not_implemented),
        }
    }

    /// Capabilities this definition leaves out, in interface order
    pub fn missing(&self) -> Vec<Capability> {
        Capability::ALL
            .iter()
            .copied()
            .filter(|c| self.query(*c).is_err())
            .collect()
    }

    /// Validate and turn into a usable flavor.
    ///
    /// Fails on an empty name, on the first missing capability, and on a
    /// malformed service map entry.
    pub fn build(&self) -> FlavorResult<DefinedFlavor> {
        if self.name.trim().is_empty() {
            return Err(FlavorError::InvalidName(self.name.clone()));
        }

        let require = |capability: Capability| -> FlavorResult<String> {
            self.selector(capability)
                .cloned()
                .ok_or(FlavorError::NotImplemented {
                    method: capability.method_name(),
                })
        };

        let binlog_player_protocol = require(Capability::BinlogPlayerProtocol)?;
        let vtctl_client_protocol = require(Capability::VtctlClientProtocol)?;
        let vtctl_python_client_protocol = require(Capability::VtctlPythonClientProtocol)?;
        let vtworker_client_protocol = require(Capability::VtworkerClientProtocol)?;
        let tablet_manager_protocol = require(Capability::TabletManagerProtocol)?;
        let tabletconn_protocol = require(Capability::TabletconnProtocol)?;
        let vtgate_protocol_flags = require(Capability::VtgateProtocolFlags)?;
        let rpc_timeout_message = require(Capability::RpcTimeoutMessage)?;

        let service_map = self
            .service_map
            .clone()
            .ok_or(FlavorError::NotImplemented {
                method: Capability::ServiceMap.method_name(),
            })?;
        for entry in &service_map {
            ServiceMapEntry::parse(entry)?;
        }

        Ok(DefinedFlavor {
            name: self.name.clone(),
            binlog_player_protocol,
            vtctl_client_protocol,
            vtctl_python_client_protocol,
            vtworker_client_protocol,
            tablet_manager_protocol,
            tabletconn_protocol,
            vtgate_protocol_flags,
            rpc_timeout_message,
            service_map,
        })
    }
}

/// A complete, validated declarative flavor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinedFlavor {
    name: String,
    binlog_player_protocol: String,
    vtctl_client_protocol: String,
    vtctl_python_client_protocol: String,
    vtworker_client_protocol: String,
    tablet_manager_protocol: String,
    tabletconn_protocol: String,
    vtgate_protocol_flags: String,
    rpc_timeout_message: String,
    service_map: Vec<String>,
}

impl DefinedFlavor {
    /// Name from the definition
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ProtocolsFlavor for DefinedFlavor {
    fn binlog_player_protocol(&self) -> &str {
        &self.binlog_player_protocol
    }

    fn vtctl_client_protocol(&self) -> &str {
        &self.vtctl_client_protocol
    }

    fn vtctl_python_client_protocol(&self) -> &str {
        &self.vtctl_python_client_protocol
    }

    fn vtworker_client_protocol(&self) -> &str {
        &self.vtworker_client_protocol
    }

    fn tablet_manager_protocol(&self) -> &str {
        &self.tablet_manager_protocol
    }

    fn tabletconn_protocol(&self) -> &str {
        &self.tabletconn_protocol
    }

    fn vtgate_protocol_flags(&self) -> &str {
        &self.vtgate_protocol_flags
    }

    fn rpc_timeout_message(&self) -> &str {
        &self.rpc_timeout_message
    }

    fn service_map(&self) -> Vec<String> {
        self.service_map.clone()
    }
}
