use std::path::Path;

use error_stack::Report;
use error_stack::ResultExt;
use k8s_openapi::api::core::v1::Pod;
use kube::api::ListParams;
use kube::config::KubeConfigOptions;
use kube::config::Kubeconfig;
use kube::Api;
use kube::Client;
use kube::Config;
use thiserror::Error;
use tracing::info;

use crate::config::ClusterArgs;

/// Errors that can occur while talking to the API server.
#[derive(Debug, Error)]
pub enum KubernetesError {
    #[error("Failed to connect to Kubernetes API: {message}")]
    ConnectionFailed { message: String },
    #[error("Failed to list pods: {message}")]
    ListFailed { message: String },
}

/// Build a client from an explicit kubeconfig, or fall back to the in-cluster
/// service account and then `~/.kube/config`.
async fn connect(kubeconfig: Option<&Path>) -> Result<Client, Report<KubernetesError>> {
    let Some(path) = kubeconfig else {
        return Client::try_default()
            .await
            .change_context(KubernetesError::ConnectionFailed {
                message: "no in-cluster config or default kubeconfig found".to_string(),
            });
    };

    let unusable = || KubernetesError::ConnectionFailed {
        message: format!("kubeconfig {} is not usable", path.display()),
    };
    let kubeconfig = Kubeconfig::read_from(path).change_context_lazy(unusable)?;
    let config = Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
        .await
        .change_context_lazy(unusable)?;
    Client::try_from(config).change_context_lazy(unusable)
}

/// List the pods matching the selector, in one namespace or cluster wide.
pub async fn list_pods(args: &ClusterArgs) -> Result<Vec<Pod>, Report<KubernetesError>> {
    let client = connect(args.kubeconfig.as_deref()).await?;
    let api: Api<Pod> = match &args.namespace {
        Some(namespace) => Api::namespaced(client, namespace),
        None => Api::all(client),
    };

    let params = ListParams::default().labels(&args.selector);
    let pods = api
        .list(&params)
        .await
        .change_context(KubernetesError::ListFailed {
            message: format!("selector {}", args.selector),
        })?;

    info!(
        namespace = ?args.namespace,
        selector = %args.selector,
        count = pods.items.len(),
        "listed pods"
    );
    Ok(pods.items)
}
