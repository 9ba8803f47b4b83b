//! Kubernetes client module
//!
//! Handles connection to the Kubernetes API server and implements
//! [`NamespaceSource`] on top of it.
//!
//! Uses the default kubeconfig loading strategy unless a context is named:
//! 1. In-cluster config (if running in a pod)
//! 2. KUBECONFIG environment variable
//! 3. ~/.kube/config

use crate::collector::NamespaceSource;
use crate::error::{SurveyError, SurveyResult};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Pod, Service};
use k8s_openapi::api::networking::v1::Ingress;
use kube::api::ListParams;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client, Config};

/// Connection options taken from the command line
#[derive(Debug, Clone, Default)]
pub struct ConnectOptions {
    /// Kubeconfig context to use instead of the current one
    pub context: Option<String>,
    /// Skip TLS certificate verification
    pub insecure: bool,
}

/// Load client configuration for an explicitly named context
///
/// The context is looked up first so that a typo is reported as such rather
/// than as a generic kubeconfig failure.
async fn config_for_context(context: &str) -> SurveyResult<Config> {
    let kubeconfig = Kubeconfig::read().map_err(|e| SurveyError::Config(e.to_string()))?;
    if !kubeconfig.contexts.iter().any(|c| c.name == context) {
        return Err(SurveyError::ContextNotFound(context.to_string()));
    }

    let options = KubeConfigOptions {
        context: Some(context.to_string()),
        ..Default::default()
    };
    Config::from_custom_kubeconfig(kubeconfig, &options)
        .await
        .map_err(|e| SurveyError::Config(e.to_string()))
}

/// Initialize and return a Kubernetes client
pub async fn create_client(options: &ConnectOptions) -> SurveyResult<Client> {
    let mut config = match options.context.as_deref() {
        Some(context) => config_for_context(context).await?,
        None => Config::infer()
            .await
            .map_err(|e| SurveyError::Config(e.to_string()))?,
    };

    if options.insecure {
        tracing::warn!("TLS certificate verification disabled for {}", config.cluster_url);
        config.accept_invalid_certs = true;
    }

    tracing::debug!("Connecting to {}", config.cluster_url);
    Client::try_from(config).map_err(|e| SurveyError::Config(e.to_string()))
}

/// Live cluster implementation of [`NamespaceSource`]
#[derive(Clone)]
pub struct ClusterSource {
    client: Client,
}

impl ClusterSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Connect with `options` and wrap the resulting client
    pub async fn connect(options: &ConnectOptions) -> SurveyResult<Self> {
        Ok(Self::new(create_client(options).await?))
    }
}

/// List every object of one kind in a namespace
macro_rules! list_namespaced {
    ($client:expr, $kind:ty, $label:literal, $namespace:expr) => {{
        let api: Api<$kind> = Api::namespaced($client.clone(), $namespace);
        tracing::debug!("Listing {} in namespace {}", $label, $namespace);
        api.list(&ListParams::default())
            .await
            .map(|list| list.items)
            .map_err(|source| SurveyError::Fetch {
                kind: $label,
                namespace: $namespace.to_string(),
                source,
            })
    }};
}

#[async_trait]
impl NamespaceSource for ClusterSource {
    async fn list_pods(&self, namespace: &str) -> SurveyResult<Vec<Pod>> {
        list_namespaced!(self.client, Pod, "pods", namespace)
    }

    async fn list_services(&self, namespace: &str) -> SurveyResult<Vec<Service>> {
        list_namespaced!(self.client, Service, "services", namespace)
    }

    async fn list_ingresses(&self, namespace: &str) -> SurveyResult<Vec<Ingress>> {
        list_namespaced!(self.client, Ingress, "ingresses", namespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_options_default() {
        let options = ConnectOptions::default();
        assert!(options.context.is_none());
        assert!(!options.insecure);
    }
}
