//! Service map entries
//!
//! A server process decides which protocol endpoints to open from a list of
//! service to protocol bindings. Two spellings are accepted:
//!
//! - `<service>:<protocol>`, e.g. `vtctl:grpc`
//! - `<protocol>-<service>`, e.g. `grpc-tabletmanager`, as the servers name
//!   their registered services. The protocol is everything before the first
//!   `-`; the service may itself be namespaced (`bsonrpc-vt-vtctl` has
//!   service `vt-vtctl`).
//!
//! The last `-` segment of the service is the endpoint. An entry prints back
//! in the spelling it was written in.

use std::fmt;

use super::capability::ProtocolsFlavor;
use super::errors::{FlavorError, FlavorResult};

/// Spelling of a service map entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryForm {
    /// `<service>:<protocol>`
    Colon,
    /// `<protocol>-<service>`
    Dashed,
}

/// One service to protocol binding
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceMapEntry {
    protocol: String,
    service: String,
    form: EntryForm,
}

impl ServiceMapEntry {
    /// Create a `<protocol>-<service>` entry from its parts
    pub fn new(protocol: impl Into<String>, service: impl Into<String>) -> FlavorResult<Self> {
        Self::from_parts(protocol.into(), service.into(), EntryForm::Dashed)
    }

    /// Parse either spelling
    pub fn parse(entry: &str) -> FlavorResult<Self> {
        let invalid = || FlavorError::InvalidServiceMapEntry(entry.to_string());
        let (protocol, service, form) = match entry.split_once(':') {
            Some((service, protocol)) => (protocol, service, EntryForm::Colon),
            None => {
                let (protocol, service) = entry.split_once('-').ok_or_else(invalid)?;
                (protocol, service, EntryForm::Dashed)
            }
        };
        Self::from_parts(protocol.to_string(), service.to_string(), form).map_err(|_| invalid())
    }

    fn from_parts(protocol: String, service: String, form: EntryForm) -> FlavorResult<Self> {
        let entry = Self {
            protocol,
            service,
            form,
        };
        if !Self::valid_parts(&entry.protocol, &entry.service) {
            return Err(FlavorError::InvalidServiceMapEntry(entry.to_string()));
        }
        Ok(entry)
    }

    /// Protocol has no separators; service is non-empty `-`-joined segments.
    fn valid_parts(protocol: &str, service: &str) -> bool {
        !protocol.is_empty()
            && !protocol.contains(['-', ':'])
            && !service.contains(':')
            && service.split('-').all(|segment| !segment.is_empty())
    }

    /// Protocol part
    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    /// Service part, including any namespace
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Spelling the entry was written in
    pub fn form(&self) -> EntryForm {
        self.form
    }

    /// Last segment of the service
    pub fn endpoint(&self) -> &str {
        self.service.rsplit('-').next().unwrap_or(&self.service)
    }
}

impl fmt::Display for ServiceMapEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.form {
            EntryForm::Colon => write!(f, "{}:{}", self.service, self.protocol),
            EntryForm::Dashed => write!(f, "{}-{}", self.protocol, self.service),
        }
    }
}

/// Parse every entry of a flavor's service map, in order
pub fn service_entries(flavor: &dyn ProtocolsFlavor) -> FlavorResult<Vec<ServiceMapEntry>> {
    flavor
        .service_map()
        .iter()
        .map(|entry| ServiceMapEntry::parse(entry))
        .collect()
}

/// Whether the flavor enables an endpoint (`vtctl`, `tabletmanager`, ...)
pub fn enables(flavor: &dyn ProtocolsFlavor, endpoint: &str) -> bool {
    flavor
        .service_map()
        .iter()
        .filter_map(|entry| ServiceMapEntry::parse(entry).ok())
        .any(|entry| entry.endpoint() == endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flavor::builtin::{GoRpcFlavor, GrpcFlavor};

    #[test]
    fn test_parse_simple() {
        let entry = ServiceMapEntry::parse("grpc-tabletmanager").unwrap();
        assert_eq!(entry.protocol(), "grpc");
        assert_eq!(entry.service(), "tabletmanager");
        assert_eq!(entry.endpoint(), "tabletmanager");
        assert_eq!(entry.to_string(), "grpc-tabletmanager");
    }

    #[test]
    fn test_parse_namespaced() {
        let entry = ServiceMapEntry::parse("bsonrpc-vt-vtctl").unwrap();
        assert_eq!(entry.protocol(), "bsonrpc");
        assert_eq!(entry.service(), "vt-vtctl");
        assert_eq!(entry.endpoint(), "vtctl");
        assert_eq!(entry.to_string(), "bsonrpc-vt-vtctl");
    }

    #[test]
    fn test_parse_colon_form() {
        let entry = ServiceMapEntry::parse("vtctl:grpc").unwrap();
        assert_eq!(entry.protocol(), "grpc");
        assert_eq!(entry.service(), "vtctl");
        assert_eq!(entry.endpoint(), "vtctl");
        assert_eq!(entry.form(), EntryForm::Colon);
        assert_eq!(entry.to_string(), "vtctl:grpc");

        let namespaced = ServiceMapEntry::parse("vt-tabletmanager:bsonrpc").unwrap();
        assert_eq!(namespaced.protocol(), "bsonrpc");
        assert_eq!(namespaced.endpoint(), "tabletmanager");
        assert_eq!(namespaced.to_string(), "vt-tabletmanager:bsonrpc");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in [
            "grpc", "-vtctl", "grpc-", "grpc-vt-", "grpc--vtctl", "", ":grpc", "vtctl:",
            "vtctl:g-rpc", "vtctl:grpc:x", "vt-:grpc",
        ] {
            assert_eq!(
                ServiceMapEntry::parse(bad),
                Err(FlavorError::InvalidServiceMapEntry(bad.to_string())),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_new_rejects_dash_in_protocol() {
        assert!(ServiceMapEntry::new("grpc", "vtctl").is_ok());
        assert!(ServiceMapEntry::new("g-rpc", "vtctl").is_err());
        assert!(ServiceMapEntry::new("", "vtctl").is_err());
        assert!(ServiceMapEntry::new("grpc", "").is_err());
        assert!(ServiceMapEntry::new("grpc", "vt-").is_err());
        assert!(ServiceMapEntry::new("grpc", "-vtctl").is_err());
        assert!(ServiceMapEntry::new("grpc", "vt:ctl").is_err());
    }

    #[test]
    fn test_new_output_parses_back() {
        for (protocol, service) in [("grpc", "vtctl"), ("bsonrpc", "vt-tabletmanager")] {
            let entry = ServiceMapEntry::new(protocol, service).unwrap();
            assert_eq!(ServiceMapEntry::parse(&entry.to_string()).unwrap(), entry);
        }
    }

    #[test]
    fn test_enables_colon_entries() {
        let flavor = crate::flavor::FlavorDefinition::uniform("custom", "grpc")
            .with_rpc_timeout_message("t")
            .with_service_map(vec!["vtctl:grpc".into(), "grpc-vtworker".into()])
            .build()
            .unwrap();
        assert!(enables(&flavor, "vtctl"));
        assert!(enables(&flavor, "vtworker"));
        assert!(!enables(&flavor, "tabletmanager"));
        assert_eq!(service_entries(&flavor).unwrap()[0].form(), EntryForm::Colon);
    }

    #[test]
    fn test_service_entries_preserve_order() {
        let entries = service_entries(&GrpcFlavor).unwrap();
        let rendered: Vec<String> = entries.iter().map(|e| e.to_string()).collect();
        assert_eq!(rendered, GrpcFlavor.service_map());
    }

    #[test]
    fn test_enables() {
        assert!(enables(&GrpcFlavor, "vtctl"));
        assert!(enables(&GoRpcFlavor, "vtctl"));
        assert!(enables(&GoRpcFlavor, "toporeader"));
        assert!(!enables(&GrpcFlavor, "toporeader"));
    }
}
