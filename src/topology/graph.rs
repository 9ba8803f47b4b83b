//! Graph data structures for namespace traffic flow
//!
//! Nodes are ingress hosts, services and containers; containers are grouped
//! into one cluster per pod identity. The graph is strict: adding a node or
//! edge that already exists is a no-op, so builders never need to
//! deduplicate.

use std::collections::HashMap;

/// A node in the topology graph
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    /// Unique identifier for the node
    pub id: String,
    /// Text shown for the node
    pub label: String,
    pub node_type: NodeType,
}

/// Type of node in the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// An external hostname served by an ingress
    Ingress,
    /// A service with a pod selector
    Service,
    /// A container inside a pod identity cluster
    Container,
}

/// An edge representing traffic flow between nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    /// Source node ID
    pub from: String,
    /// Target node ID
    pub to: String,
    pub relationship: RelationshipType,
    /// Edge label (the ingress protocol key)
    pub label: Option<String>,
}

/// Type of relationship between nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipType {
    /// Host routes to a service through an ingress rule
    RoutesTo,
    /// Service forwards to a container port
    ForwardsTo,
}

/// Containers of one pod identity
#[derive(Debug, Clone, PartialEq)]
pub struct PodCluster {
    /// Cluster identifier, unique per identity
    pub id: String,
    /// Pod identity shown as the cluster label
    pub identity: String,
    /// IDs of container nodes in this cluster
    pub containers: Vec<String>,
}

/// A graph representing namespace traffic flow
#[derive(Debug, Clone, Default)]
pub struct TopologyGraph {
    /// Namespace the graph was built from
    pub namespace: String,
    /// All nodes in the graph
    pub nodes: Vec<GraphNode>,
    /// All edges in the graph
    pub edges: Vec<GraphEdge>,
    /// Pod identity clusters, one per identity
    pub clusters: Vec<PodCluster>,
    /// Map from node ID to index in nodes vector
    pub node_index: HashMap<String, usize>,
}

impl TopologyGraph {
    /// Create a new empty graph
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    /// Add a node to the graph, ignoring IDs already present
    pub fn add_node(&mut self, node: GraphNode) {
        if self.node_index.contains_key(&node.id) {
            return;
        }
        let index = self.nodes.len();
        self.node_index.insert(node.id.clone(), index);
        self.nodes.push(node);
    }

    /// Add an edge to the graph, ignoring exact repeats
    pub fn add_edge(&mut self, edge: GraphEdge) {
        if !self.edges.contains(&edge) {
            self.edges.push(edge);
        }
    }

    /// Add an empty cluster for a pod identity and return its index
    pub fn add_cluster(&mut self, identity: &str) -> usize {
        if let Some(index) = self.clusters.iter().position(|c| c.identity == identity) {
            return index;
        }
        let index = self.clusters.len();
        self.clusters.push(PodCluster {
            id: format!("cluster_{}_{}", identity, index + 1),
            identity: identity.to_string(),
            containers: Vec::new(),
        });
        index
    }

    /// Add a container node to the cluster at `cluster`
    pub fn add_container(&mut self, cluster: usize, node: GraphNode) {
        let id = node.id.clone();
        self.add_node(node);
        if let Some(cluster) = self.clusters.get_mut(cluster) {
            if !cluster.containers.contains(&id) {
                cluster.containers.push(id);
            }
        }
    }

    /// Look up a node by ID
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.node_index.get(id).and_then(|&index| self.nodes.get(index))
    }

    /// Nodes of one type, in insertion order
    pub fn nodes_of(&self, node_type: NodeType) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(move |n| n.node_type == node_type)
    }

    /// Whether an edge `from -> to` exists
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        self.edges.iter().any(|e| e.from == from && e.to == to)
    }
}
