//! Resource collectors
//!
//! Fetches pods, services and ingresses for one namespace and normalises
//! them into a [`NamespaceSnapshot`]. Fetching goes through the
//! [`NamespaceSource`] trait so the pipeline can run against a live cluster
//! or against fixed object lists.

pub mod ingresses;
pub mod pods;
pub mod services;

pub use ingresses::collect_ingresses;
pub use pods::{collect_pods, pod_identity};
pub use services::collect_services;

use crate::error::SurveyResult;
use crate::models::NamespaceSnapshot;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Pod, Service};
use k8s_openapi::api::networking::v1::Ingress;
#[cfg(test)]
use mockall::automock;

/// Source of raw namespace objects
///
/// Any error returned here aborts the survey.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait NamespaceSource: Send + Sync {
    async fn list_pods(&self, namespace: &str) -> SurveyResult<Vec<Pod>>;
    async fn list_services(&self, namespace: &str) -> SurveyResult<Vec<Service>>;
    async fn list_ingresses(&self, namespace: &str) -> SurveyResult<Vec<Ingress>>;
}

/// Build a snapshot of `namespace` from `source`
///
/// Collectors run one after another: services, pods, ingresses. Either the
/// whole snapshot is returned or the first fetch error is.
pub async fn survey<S: NamespaceSource + ?Sized>(
    source: &S,
    namespace: &str,
) -> SurveyResult<NamespaceSnapshot> {
    let mut snapshot = NamespaceSnapshot::new(namespace);

    let services = source.list_services(namespace).await?;
    collect_services(&services, &mut snapshot.services);

    let pods = source.list_pods(namespace).await?;
    collect_pods(&pods, &mut snapshot.pods);

    let ingresses = source.list_ingresses(namespace).await?;
    collect_ingresses(&ingresses, &mut snapshot.ingresses);

    tracing::info!(
        "Surveyed namespace {}: {} ingresses, {} services, {} pod identities ({} containers)",
        namespace,
        snapshot.ingresses.len(),
        snapshot.services.len(),
        snapshot.pods.len(),
        snapshot.container_count()
    );

    Ok(snapshot)
}
