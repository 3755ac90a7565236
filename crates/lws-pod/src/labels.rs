//! Label keys and env var names shared with the LeaderWorkerSet controller.

use derive_more::Display;
use k8s_openapi::api::core::v1::Pod;
use serde::Deserialize;
use serde::Serialize;

/// Builds a key under the leaderworkerset label domain.
macro_rules! lws_label {
    ($name:literal) => {
        concat!("leaderworkerset.sigs.k8s.io/", $name)
    };
}

/// Prefix shared by every leaderworkerset label key.
const LWS_LABEL_PREFIX: &str = lws_label!("");

/// Name of the LeaderWorkerSet a pod belongs to.
pub const SET_NAME_LABEL_KEY: &str = lws_label!("name");

/// Index of the group within the set.
pub const GROUP_INDEX_LABEL_KEY: &str = lws_label!("group-index");

/// Index of the pod within its group. The leader is always `0`.
pub const WORKER_INDEX_LABEL_KEY: &str = lws_label!("worker-index");

/// Env var injected into every container with the leader's address.
pub const LEADER_ADDRESS_ENV: &str = "LWS_LEADER_ADDRESS";

/// Worker index carried by the leader pod.
const LEADER_WORKER_INDEX: &str = "0";

/// Role of a pod inside its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum PodRole {
    Leader,
    Worker,
}

impl PodRole {
    /// Derive the role from the worker-index label.
    ///
    /// Only the exact value `"0"` makes a leader. A missing label, an empty
    /// value or any other index is a worker.
    pub fn from_pod(pod: &Pod) -> Self {
        match label(pod, WORKER_INDEX_LABEL_KEY) {
            Some(LEADER_WORKER_INDEX) => Self::Leader,
            _ => Self::Worker,
        }
    }

    pub const fn is_leader(self) -> bool {
        matches!(self, Self::Leader)
    }
}

/// Look up a label value on the pod.
pub fn label<'a>(pod: &'a Pod, key: &str) -> Option<&'a str> {
    pod.metadata
        .labels
        .as_ref()
        .and_then(|labels| labels.get(key))
        .map(String::as_str)
}

/// Whether the key lives under the leaderworkerset label domain.
pub fn is_lws_label(key: &str) -> bool {
    key.strip_prefix(LWS_LABEL_PREFIX)
        .is_some_and(|name| !name.is_empty() && !name.contains('/'))
}
