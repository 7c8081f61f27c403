//! # Protocols Flavors
//!
//! A flavor is a named bundle of protocol choices for every role of the
//! toolchain: cluster control, worker, tablet manager, query gateway,
//! tablet connections and binlog streaming.
//!
//! - [`ProtocolsFlavor`]: the nine queries every flavor answers
//! - [`FlavorRegistry`]: name to constructor table plus the active flavor
//! - [`FlavorDefinition`]: flavors described as data
//!
//! ```ignore
//! use protoflavor::flavor::FlavorRegistry;
//!
//! let registry = FlavorRegistry::with_builtin()?;
//! let flavor = registry.select("grpc")?;
//! assert_eq!(flavor.tabletconn_protocol(), "grpc");
//! ```

pub mod builtin;
pub mod capability;
pub mod definition;
pub mod errors;
pub mod registry;
pub mod service_map;
pub mod timeout;

pub use builtin::{register_builtin, GoRpcFlavor, GrpcFlavor, GORPC, GRPC};
pub use capability::{Capability, CapabilityValue, ProtocolsFlavor};
pub use definition::{DefinedFlavor, FlavorDefinition};
pub use errors::{FlavorError, FlavorResult};
pub use registry::{FlavorConstructor, FlavorRegistry, DEFAULT_FLAVOR};
pub use service_map::{enables, service_entries, EntryForm, ServiceMapEntry};
pub use timeout::{is_rpc_timeout, is_rpc_timeout_error};
