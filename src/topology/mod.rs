//! Namespace topology
//!
//! Turns a [`NamespaceSnapshot`](crate::models::NamespaceSnapshot) into a
//! directed graph of traffic flow: ingress hosts → services → containers.

pub mod graph;
pub mod graph_builder;

pub use graph::{GraphEdge, GraphNode, NodeType, PodCluster, RelationshipType, TopologyGraph};
pub use graph_builder::{build_topology, container_node_id, forwards_to, selects};
