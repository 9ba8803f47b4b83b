//! Namespace model layer
//!
//! Structure:
//! - `snapshot.rs` - The `NamespaceSnapshot` aggregate and its YAML form
//! - `port.rs` - Named/numeric port references
//! - `rules.rs` - Opaque ingress rule trees

pub mod port;
pub mod rules;
pub mod snapshot;

pub use port::PortRef;
pub use rules::{RuleEntry, RuleList};
pub use snapshot::{
    ContainerPorts, HostRules, IngressHosts, NamespaceSnapshot, SNAPSHOT_VERSION, ServiceInfo,
};
