//! Pod collection
//!
//! Groups pods under a derived identity instead of their object name, so
//! replicas of one workload collapse into a single entry.

use crate::models::{ContainerPorts, PortRef};
use k8s_openapi::api::core::v1::{Container, Pod};
use std::collections::BTreeMap;

/// Label carried by pods spawned from (cron) jobs
pub const JOB_NAME_LABEL: &str = "job-name";

/// Labels that name a pod identity, highest priority first
pub const IDENTITY_LABELS: &[&str] = &[
    "app",
    "statefulset.kubernetes.io/pod-name",
    "app.kubernetes.io/name",
];

/// Derive the identity a pod is grouped under
///
/// Returns `None` for pods that cannot be correlated: job pods, pods with
/// none of the identity labels, and pods without labels at all.
pub fn pod_identity(labels: Option<&BTreeMap<String, String>>) -> Option<String> {
    let labels = labels?;
    if labels.contains_key(JOB_NAME_LABEL) {
        return None;
    }
    IDENTITY_LABELS
        .iter()
        .find_map(|label| labels.get(*label))
        .cloned()
}

/// Ports a container declares, name before number for each entry
pub fn container_ports(container: &Container) -> Vec<PortRef> {
    let mut ports = Vec::new();
    for port in container.ports.iter().flatten() {
        if let Some(name) = &port.name {
            ports.push(PortRef::Named(name.clone()));
        }
        ports.push(PortRef::Numeric(port.container_port));
    }
    ports
}

/// Merge pods into `pods`, keyed by identity
///
/// Containers accumulate under an identity; a container name seen again
/// replaces the earlier entry.
pub fn collect_pods(pods: &[Pod], into: &mut BTreeMap<String, ContainerPorts>) {
    for pod in pods {
        let pod_name = pod.metadata.name.as_deref().unwrap_or("<unnamed>");

        let Some(identity) = pod_identity(pod.metadata.labels.as_ref()) else {
            tracing::debug!("Skipping pod {}: no usable identity label", pod_name);
            continue;
        };

        let containers = pod
            .spec
            .as_ref()
            .map(|spec| spec.containers.as_slice())
            .unwrap_or_default();

        tracing::debug!(
            "Pod {} grouped as '{}' with {} containers",
            pod_name,
            identity,
            containers.len()
        );

        let entry = into.entry(identity).or_default();
        for container in containers {
            entry.insert(container.name.clone(), container_ports(container));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_identity_priority() {
        let all = labels(&[
            ("app", "web"),
            ("statefulset.kubernetes.io/pod-name", "web-0"),
            ("app.kubernetes.io/name", "frontend"),
        ]);
        assert_eq!(pod_identity(Some(&all)), Some("web".to_string()));

        let sts = labels(&[
            ("statefulset.kubernetes.io/pod-name", "db-0"),
            ("app.kubernetes.io/name", "postgres"),
        ]);
        assert_eq!(pod_identity(Some(&sts)), Some("db-0".to_string()));

        let recommended = labels(&[("app.kubernetes.io/name", "cache")]);
        assert_eq!(pod_identity(Some(&recommended)), Some("cache".to_string()));
    }

    #[test]
    fn test_identity_exclusions() {
        assert_eq!(pod_identity(None), None);
        assert_eq!(pod_identity(Some(&labels(&[("tier", "web")]))), None);
        assert_eq!(
            pod_identity(Some(&labels(&[("app", "backup"), ("job-name", "backup-123")]))),
            None
        );
    }

    #[test]
    fn test_container_ports_name_then_number() {
        let container: Container = serde_json::from_value(serde_json::json!({
            "name": "web",
            "ports": [
                {"name": "http", "containerPort": 8080},
                {"containerPort": 9090}
            ]
        }))
        .unwrap();

        assert_eq!(
            container_ports(&container),
            vec![
                PortRef::from("http"),
                PortRef::from(8080),
                PortRef::from(9090)
            ]
        );
    }

    #[test]
    fn test_container_without_ports() {
        let container: Container =
            serde_json::from_value(serde_json::json!({"name": "sidecar"})).unwrap();
        assert!(container_ports(&container).is_empty());
    }
}
