//! Namespace snapshot
//!
//! The single aggregate produced by the collectors (or loaded from YAML) and
//! consumed, read-only, by the topology builder.

use super::port::PortRef;
use super::rules::RuleList;
use crate::error::SurveyResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;

/// Version tag written into persisted snapshots
pub const SNAPSHOT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Protocol key → ordered rule entries
pub type HostRules = BTreeMap<String, RuleList>;

/// Hostname → protocol groupings
pub type IngressHosts = BTreeMap<String, HostRules>;

/// Container name → declared ports
pub type ContainerPorts = BTreeMap<String, Vec<PortRef>>;

/// A service that can be correlated with pods
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// Target ports in declaration order; the first one drives correlation
    #[serde(default)]
    pub ports: Vec<PortRef>,
    #[serde(default)]
    pub selector: BTreeMap<String, String>,
}

impl ServiceInfo {
    /// First declared target port, if any
    pub fn first_port(&self) -> Option<&PortRef> {
        self.ports.first()
    }
}

/// Point-in-time view of one namespace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamespaceSnapshot {
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub version: String,
    #[serde(rename = "ingress", default)]
    pub ingresses: BTreeMap<String, IngressHosts>,
    #[serde(rename = "service", default)]
    pub services: BTreeMap<String, ServiceInfo>,
    #[serde(rename = "pod", default)]
    pub pods: BTreeMap<String, ContainerPorts>,
}

impl NamespaceSnapshot {
    /// Create an empty snapshot for `namespace`
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            version: SNAPSHOT_VERSION.to_string(),
            ingresses: BTreeMap::new(),
            services: BTreeMap::new(),
            pods: BTreeMap::new(),
        }
    }

    /// Serialise the snapshot to YAML
    pub fn to_yaml(&self) -> SurveyResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Parse a snapshot from YAML text
    pub fn from_yaml(contents: &str) -> SurveyResult<Self> {
        let snapshot: NamespaceSnapshot = serde_yaml::from_str(contents)?;
        if snapshot.version != SNAPSHOT_VERSION {
            tracing::warn!(
                "Snapshot was written by version '{}', running {}",
                snapshot.version,
                SNAPSHOT_VERSION
            );
        }
        Ok(snapshot)
    }

    /// Read a snapshot from any reader (stdin for `--load`)
    pub fn from_reader<R: Read>(mut reader: R) -> SurveyResult<Self> {
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;
        Self::from_yaml(&contents)
    }

    /// Total number of containers across all pod identities
    pub fn container_count(&self) -> usize {
        self.pods.values().map(|containers| containers.len()).sum()
    }
}

impl Default for NamespaceSnapshot {
    fn default() -> Self {
        Self::new("default")
    }
}
