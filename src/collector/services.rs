//! Service collection

use crate::models::{PortRef, ServiceInfo};
use k8s_openapi::api::core::v1::{Service, ServicePort};
use std::collections::BTreeMap;

/// Target port of a service port entry
///
/// The API server fills in `targetPort` from `port` when it is omitted, so
/// objects built elsewhere get the same treatment.
fn target_port(port: &ServicePort) -> PortRef {
    port.target_port
        .as_ref()
        .map(PortRef::from)
        .unwrap_or(PortRef::Numeric(port.port))
}

/// Add every selector-backed service to `services`
///
/// Services without a selector (external names, manually managed
/// endpoints) have no pods to point at and are left out.
pub fn collect_services(services: &[Service], into: &mut BTreeMap<String, ServiceInfo>) {
    for service in services {
        let Some(name) = service.metadata.name.clone() else {
            continue;
        };
        let Some(spec) = service.spec.as_ref() else {
            tracing::debug!("Skipping service {}: no spec", name);
            continue;
        };

        let selector = spec.selector.clone().unwrap_or_default();
        if selector.is_empty() {
            tracing::debug!("Skipping service {}: no selector", name);
            continue;
        }

        let ports: Vec<PortRef> = spec.ports.iter().flatten().map(target_port).collect();
        tracing::debug!(
            "Service {} targets {:?} selecting {:?}",
            name,
            ports,
            selector
        );

        into.insert(name, ServiceInfo { ports, selector });
    }
}
