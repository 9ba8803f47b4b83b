//! Ingress collection
//!
//! Ingress rules are re-keyed by host and otherwise carried as opaque trees.
//! The backend is written with `service_name` / `service_port` keys so that
//! saved snapshots keep one stable shape.

use crate::models::{HostRules, IngressHosts, RuleEntry, RuleList};
use k8s_openapi::api::networking::v1::{HTTPIngressPath, Ingress, IngressBackend, IngressRule};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

/// Host key used for rules that match every host
pub const ANY_HOST: &str = "*";

/// Protocol key for HTTP path rules
pub const HTTP_PROTOCOL: &str = "http";

fn backend_tree(backend: &IngressBackend) -> Mapping {
    let mut tree = Mapping::new();
    if let Some(service) = &backend.service {
        tree.insert("service_name".into(), service.name.clone().into());
        if let Some(port) = &service.port {
            let port = match (&port.name, port.number) {
                (_, Some(number)) => Value::from(number),
                (Some(name), None) => Value::from(name.clone()),
                (None, None) => Value::Null,
            };
            tree.insert("service_port".into(), port);
        }
    }
    if let Some(resource) = &backend.resource {
        let mut reference = Mapping::new();
        if let Some(group) = &resource.api_group {
            reference.insert("api_group".into(), group.clone().into());
        }
        reference.insert("kind".into(), resource.kind.clone().into());
        reference.insert("name".into(), resource.name.clone().into());
        tree.insert("resource".into(), Value::Mapping(reference));
    }
    tree
}

/// Convert one HTTP path into a rule entry
pub fn path_entry(path: &HTTPIngressPath) -> RuleEntry {
    let mut tree = Mapping::new();
    tree.insert("backend".into(), Value::Mapping(backend_tree(&path.backend)));
    if let Some(p) = &path.path {
        tree.insert("path".into(), p.clone().into());
    }
    tree.insert("path_type".into(), path.path_type.clone().into());
    RuleEntry(tree)
}

/// Protocol groupings of a single rule, everything except `host`
pub fn rule_groups(rule: &IngressRule) -> HostRules {
    let mut groups = HostRules::new();
    if let Some(http) = &rule.http {
        let entries = http.paths.iter().map(path_entry).collect();
        groups.insert(HTTP_PROTOCOL.to_string(), RuleList::new(entries));
    }
    groups
}

/// Add every ingress to `ingresses`, indexing its rules by host
pub fn collect_ingresses(ingresses: &[Ingress], into: &mut BTreeMap<String, IngressHosts>) {
    for ingress in ingresses {
        let Some(name) = ingress.metadata.name.clone() else {
            continue;
        };

        let mut hosts = IngressHosts::new();
        let rules = ingress
            .spec
            .as_ref()
            .and_then(|spec| spec.rules.as_deref())
            .unwrap_or_default();
        for rule in rules {
            let host = rule.host.clone().unwrap_or_else(|| ANY_HOST.to_string());
            hosts.insert(host, rule_groups(rule));
        }

        tracing::debug!("Ingress {} serves hosts {:?}", name, hosts.keys());
        into.insert(name, hosts);
    }
}
