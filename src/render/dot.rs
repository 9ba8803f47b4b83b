//! DOT text output
//!
//! Writes a `strict digraph` with three groups: ingress hosts, a `Services`
//! cluster, and a `Pods` cluster holding one sub-cluster per pod identity.
//! Edges follow the groups.

use crate::config::GraphStyle;
use crate::topology::{GraphEdge, NodeType, TopologyGraph};
use std::fmt::Write;

/// Name of the root graph
pub const GRAPH_NAME: &str = "Kubernetes Namespace visualisation";

const INDENT: &str = "    ";

/// Quote a DOT identifier
pub fn quote(id: &str) -> String {
    let mut quoted = String::with_capacity(id.len() + 2);
    quoted.push('"');
    for c in id.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

fn attributes(pairs: &[(&str, &str)]) -> String {
    let body: Vec<String> = pairs
        .iter()
        .map(|(key, value)| format!("{}={}", key, quote(value)))
        .collect();
    format!("[{}]", body.join(" "))
}

fn write_edge(out: &mut String, edge: &GraphEdge) -> std::fmt::Result {
    write!(out, "{}{} -> {}", INDENT, quote(&edge.from), quote(&edge.to))?;
    if let Some(label) = &edge.label {
        write!(out, " {}", attributes(&[("label", label.as_str())]))?;
    }
    writeln!(out)
}

/// Render `graph` as DOT text using `style` for presentation attributes
pub fn to_dot(graph: &TopologyGraph, style: &GraphStyle) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_dot(&mut out, graph, style);
    out
}

fn write_dot(out: &mut String, graph: &TopologyGraph, style: &GraphStyle) -> std::fmt::Result {
    let label = format!("{} namespace", graph.namespace);
    let fontsize = style.fontsize.to_string();
    let concentrate = style.concentrate.to_string();

    writeln!(out, "strict digraph {} {{", quote(GRAPH_NAME))?;
    writeln!(out, "{}// namespace view", INDENT)?;
    writeln!(
        out,
        "{}graph {}",
        INDENT,
        attributes(&[
            ("label", label.as_str()),
            ("rankdir", style.rankdir.as_str()),
            ("ranksep", style.ranksep.as_str()),
            ("nodesep", style.nodesep.as_str()),
            ("fontname", style.fontname.as_str()),
            ("fontsize", fontsize.as_str()),
            ("concentrate", concentrate.as_str()),
            ("bgcolor", style.background.as_str()),
            ("fontcolor", style.foreground.as_str()),
            ("color", style.foreground.as_str()),
        ])
    )?;
    writeln!(
        out,
        "{}node {}",
        INDENT,
        attributes(&[
            ("shape", "box"),
            ("fontcolor", style.foreground.as_str()),
            ("color", style.foreground.as_str()),
        ])
    )?;
    writeln!(
        out,
        "{}edge {}",
        INDENT,
        attributes(&[
            ("fontcolor", style.foreground.as_str()),
            ("color", style.foreground.as_str()),
            ("headport", "w"),
            ("tailport", "e"),
        ])
    )?;

    writeln!(out, "{}subgraph ingress {{", INDENT)?;
    for node in graph.nodes_of(NodeType::Ingress) {
        writeln!(out, "{0}{0}{1}", INDENT, quote(&node.id))?;
    }
    writeln!(out, "{}}}", INDENT)?;

    writeln!(out, "{}subgraph cluster_services {{", INDENT)?;
    writeln!(out, "{0}{0}label={1}", INDENT, quote("Services"))?;
    for node in graph.nodes_of(NodeType::Service) {
        writeln!(out, "{0}{0}{1}", INDENT, quote(&node.id))?;
    }
    writeln!(out, "{}}}", INDENT)?;

    writeln!(out, "{}subgraph cluster_pods {{", INDENT)?;
    writeln!(out, "{0}{0}label={1}", INDENT, quote("Pods"))?;
    for cluster in &graph.clusters {
        writeln!(out, "{0}{0}subgraph {1} {{", INDENT, quote(&cluster.id))?;
        writeln!(out, "{0}{0}{0}label={1}", INDENT, quote(&cluster.identity))?;
        for id in &cluster.containers {
            let label = graph.node(id).map(|n| n.label.as_str()).unwrap_or(id);
            writeln!(
                out,
                "{0}{0}{0}{1} {2}",
                INDENT,
                quote(id),
                attributes(&[("label", label)])
            )?;
        }
        writeln!(out, "{0}{0}}}", INDENT)?;
    }
    writeln!(out, "{}}}", INDENT)?;

    for edge in &graph.edges {
        write_edge(out, edge)?;
    }

    writeln!(out, "}}")
}
