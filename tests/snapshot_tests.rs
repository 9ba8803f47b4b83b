//! Snapshot persistence tests
//!
//! A namespace saved with `--save` and loaded back with `--load` must draw
//! the same graph as the live survey it came from.

use kubesurveyor::models::{NamespaceSnapshot, PortRef, RuleList, SNAPSHOT_VERSION, ServiceInfo};
use kubesurveyor::topology::build_topology;
use std::collections::BTreeMap;

const SAVED_NAMESPACE: &str = r#"
namespace: shop
version: 1.0.0
ingress:
  ing1:
    shop.example.com:
      http:
        paths:
        - backend:
            service_name: web
            service_port: 80
          path: /
        - backend:
            service_name: api
            service_port: 8000
          path: /api
service:
  web:
    ports:
    - 8080
    selector:
      app: web
  api:
    ports:
    - http
    selector:
      app: api
pod:
  web:
    nginx:
    - http
    - 8080
  api:
    gunicorn:
    - http
    - 8000
"#;

fn sample_snapshot() -> NamespaceSnapshot {
    let mut snapshot = NamespaceSnapshot::new("shop");
    let rules: RuleList =
        serde_yaml::from_str("- backend: {service_name: web, service_port: 80}\n  path: /\n")
            .unwrap();
    snapshot.ingresses.insert(
        "ing1".to_string(),
        BTreeMap::from([(
            "shop.example.com".to_string(),
            BTreeMap::from([("http".to_string(), rules)]),
        )]),
    );
    snapshot.services.insert(
        "web".to_string(),
        ServiceInfo {
            ports: vec![PortRef::from(8080), PortRef::from("admin"), PortRef::from(9090)],
            selector: BTreeMap::from([("app".to_string(), "web".to_string())]),
        },
    );
    snapshot.pods.insert(
        "web".to_string(),
        BTreeMap::from([
            (
                "nginx".to_string(),
                vec![PortRef::from("http"), PortRef::from(8080)],
            ),
            ("sidecar".to_string(), vec![]),
        ]),
    );
    snapshot
}

#[test]
fn test_saved_snapshot_draws_same_graph() {
    let snapshot = sample_snapshot();
    let yaml = snapshot.to_yaml().unwrap();
    let loaded = NamespaceSnapshot::from_yaml(&yaml).unwrap();

    assert_eq!(loaded, snapshot);
    assert_eq!(
        loaded.services["web"].ports,
        vec![PortRef::from(8080), PortRef::from("admin"), PortRef::from(9090)]
    );

    let live = build_topology(&snapshot);
    let replayed = build_topology(&loaded);
    assert_eq!(live.nodes, replayed.nodes);
    assert_eq!(live.edges, replayed.edges);
    assert_eq!(live.clusters, replayed.clusters);
}

#[test]
fn test_saved_snapshot_is_tagged_with_version() {
    let yaml = sample_snapshot().to_yaml().unwrap();
    assert!(yaml.contains(&format!("version: {}", SNAPSHOT_VERSION)));
    assert!(yaml.contains("namespace: shop"));
    assert!(yaml.contains("service:"));
    assert!(yaml.contains("pod:"));
}

#[test]
fn test_load_nested_paths_layout() {
    let snapshot = NamespaceSnapshot::from_reader(SAVED_NAMESPACE.as_bytes()).unwrap();

    assert_eq!(snapshot.namespace, "shop");
    assert_eq!(snapshot.version, "1.0.0");

    let rules = &snapshot.ingresses["ing1"]["shop.example.com"]["http"];
    let backends: Vec<Option<&str>> = rules.iter().map(|r| r.backend_service_name()).collect();
    assert_eq!(backends, vec![Some("web"), Some("api")]);

    let graph = build_topology(&snapshot);
    assert!(graph.has_edge("shop.example.com", "web"));
    assert!(graph.has_edge("shop.example.com", "api"));
    assert!(graph.has_edge("web", "nginx@web"));
    assert!(graph.has_edge("api", "gunicorn@api"));
}

#[test]
fn test_load_tolerates_missing_sections() {
    let snapshot = NamespaceSnapshot::from_yaml("namespace: quiet\n").unwrap();
    assert_eq!(snapshot.namespace, "quiet");
    assert!(snapshot.ingresses.is_empty());
    assert!(snapshot.services.is_empty());
    assert!(snapshot.pods.is_empty());

    let graph = build_topology(&snapshot);
    assert!(graph.nodes.is_empty());
}

#[test]
fn test_load_rejects_malformed_yaml() {
    assert!(NamespaceSnapshot::from_yaml("service: [unterminated").is_err());
}
