use thiserror::Error;

/// Errors raised while preparing a pod for its group.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LeaderAddressError {
    #[error("failed to construct leader address env var: no {label} label found for pod {pod_name}")]
    MissingLabel {
        pod_name: String,
        /// Human readable name of the missing label
        label: &'static str,
    },
}
