//! Kubesurveyor library
//!
//! Surveys a single Kubernetes namespace and renders the traffic flow from
//! ingress hosts through services to containers as a Graphviz graph.
//! It can be used both as a binary and as a library for testing.
//!
//! Pipeline: [`collector::survey`] → [`models::NamespaceSnapshot`] →
//! [`topology::build_topology`] → [`render::render`].

pub mod cli;
pub mod collector;
pub mod config;
pub mod error;
pub mod kube;
pub mod models;
pub mod render;
pub mod topology;

// Re-export commonly used types for convenience
pub use collector::{NamespaceSource, survey};
pub use error::{SurveyError, SurveyResult};
pub use models::{NamespaceSnapshot, PortRef, RuleEntry, ServiceInfo};
pub use topology::{TopologyGraph, build_topology};
