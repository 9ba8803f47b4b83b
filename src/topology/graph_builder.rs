//! Graph builder for namespace traffic flow
//!
//! Correlates the three collected resource kinds. Nothing in Kubernetes links
//! them directly, so two heuristics do the stitching:
//! - ingress rules name their backend service, giving host → service edges;
//! - services are matched to pod identities by selector values and to
//!   containers by their first target port, giving service → container edges.
//!
//! Both heuristics are approximations and deliberately stay that way.

use crate::models::{ContainerPorts, NamespaceSnapshot, PortRef, ServiceInfo};
use crate::topology::graph::{GraphEdge, GraphNode, NodeType, RelationshipType, TopologyGraph};
use std::collections::BTreeSet;

/// Node ID of a container within a pod identity
pub fn container_node_id(container: &str, identity: &str) -> String {
    format!("{}@{}", container, identity)
}

/// Build the complete topology graph for a snapshot
pub fn build_topology(snapshot: &NamespaceSnapshot) -> TopologyGraph {
    let mut graph = TopologyGraph::new(snapshot.namespace.clone());

    add_ingress_edges(&mut graph, snapshot);

    for name in snapshot.services.keys() {
        graph.add_node(service_node(name));
    }

    for (identity, containers) in &snapshot.pods {
        add_pod_edges(&mut graph, snapshot, identity, containers);
    }

    tracing::debug!(
        "Built topology for {}: {} nodes, {} edges, {} pod clusters",
        graph.namespace,
        graph.nodes.len(),
        graph.edges.len(),
        graph.clusters.len()
    );

    graph
}

fn service_node(name: &str) -> GraphNode {
    GraphNode {
        id: name.to_string(),
        label: name.to_string(),
        node_type: NodeType::Service,
    }
}

/// Host → service edges, labelled with the protocol key
fn add_ingress_edges(graph: &mut TopologyGraph, snapshot: &NamespaceSnapshot) {
    for (ingress, hosts) in &snapshot.ingresses {
        for (host, protocols) in hosts {
            graph.add_node(GraphNode {
                id: host.clone(),
                label: host.clone(),
                node_type: NodeType::Ingress,
            });

            for (protocol, rules) in protocols {
                for rule in rules.iter() {
                    let Some(service) = rule.backend_service_name() else {
                        tracing::debug!(
                            "Ingress {} host {} has a {} rule without a backend service",
                            ingress,
                            host,
                            protocol
                        );
                        continue;
                    };

                    graph.add_node(service_node(service));
                    graph.add_edge(GraphEdge {
                        from: host.clone(),
                        to: service.to_string(),
                        relationship: RelationshipType::RoutesTo,
                        label: Some(protocol.clone()),
                    });
                }
            }
        }
    }
}

/// Whether `service` selects the pod identity
///
/// Matches when the identity itself is one of the selector values, or when
/// any selector value equals one of the identity's container names. Keys are
/// ignored.
pub fn selects(service: &ServiceInfo, identity: &str, container_names: &BTreeSet<&str>) -> bool {
    service.selector.values().any(|value| value == identity)
        || service
            .selector
            .values()
            .any(|value| container_names.contains(value.as_str()))
}

/// Whether `service` forwards into a container declaring `ports`
///
/// Only the service's first target port is checked. A service without
/// ports never forwards anywhere.
pub fn forwards_to(service: &ServiceInfo, ports: &[PortRef]) -> bool {
    service
        .first_port()
        .is_some_and(|first| first.is_in(ports))
}

/// Cluster, container nodes and service → container edges for one identity
fn add_pod_edges(
    graph: &mut TopologyGraph,
    snapshot: &NamespaceSnapshot,
    identity: &str,
    containers: &ContainerPorts,
) {
    let cluster = graph.add_cluster(identity);
    let container_names: BTreeSet<&str> = containers.keys().map(String::as_str).collect();

    for (container, ports) in containers {
        for (service_name, service) in &snapshot.services {
            if !selects(service, identity, &container_names) {
                continue;
            }

            let node_id = container_node_id(container, identity);
            graph.add_container(
                cluster,
                GraphNode {
                    id: node_id.clone(),
                    label: container.clone(),
                    node_type: NodeType::Container,
                },
            );

            if forwards_to(service, ports) {
                graph.add_edge(GraphEdge {
                    from: service_name.clone(),
                    to: node_id,
                    relationship: RelationshipType::ForwardsTo,
                    label: None,
                });
            } else {
                tracing::debug!(
                    "Service {} selects {} but its first port {:?} is not on container {}",
                    service_name,
                    identity,
                    service.first_port(),
                    container
                );
            }
        }
    }
}
