//! Predicates over a pod snapshot.
//!
//! Every function here is total: missing status, conditions or labels are
//! read as "not applicable" so the reconciler can poll on every pass without
//! handling errors.

use std::collections::BTreeMap;

use derive_more::Display;
use k8s_openapi::api::core::v1::ContainerStatus;
use k8s_openapi::api::core::v1::Pod;
use k8s_openapi::api::core::v1::PodCondition;
use serde::Deserialize;
use serde::Serialize;

use crate::labels;
use crate::labels::PodRole;

/// Condition type reporting that the pod can serve traffic.
const READY_CONDITION: &str = "Ready";

/// Condition status meaning the condition holds.
const CONDITION_TRUE: &str = "True";

/// Lifecycle phase of a pod.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum PodPhase {
    Pending,
    Running,
    Succeeded,
    Failed,
    Unknown,
    /// Missing status or a phase this crate does not know about.
    Other,
}

impl PodPhase {
    pub fn from_pod(pod: &Pod) -> Self {
        pod.status
            .as_ref()
            .and_then(|status| status.phase.as_deref())
            .map_or(Self::Other, Self::from)
    }

    /// Phases in which containers are still expected to be alive.
    const fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Running)
    }
}

impl From<&str> for PodPhase {
    fn from(phase: &str) -> Self {
        match phase {
            "Pending" => Self::Pending,
            "Running" => Self::Running,
            "Succeeded" => Self::Succeeded,
            "Failed" => Self::Failed,
            "Unknown" => Self::Unknown,
            _ => Self::Other,
        }
    }
}

/// Returns true when any init container or container of an active pod has
/// restarted at least once.
///
/// Pods outside the Pending and Running phases never report a restart, even
/// if their statuses carry historical restart counts.
pub fn has_restarted(pod: &Pod) -> bool {
    if !PodPhase::from_pod(pod).is_active() {
        return false;
    }
    let Some(status) = pod.status.as_ref() else {
        return false;
    };

    let restarted = |statuses: &Option<Vec<ContainerStatus>>| {
        statuses
            .iter()
            .flatten()
            .any(|container| container.restart_count > 0)
    };

    restarted(&status.init_container_statuses) || restarted(&status.container_statuses)
}

/// Returns true once the API server has set a deletion timestamp.
pub fn is_marked_for_deletion(pod: &Pod) -> bool {
    pod.metadata.deletion_timestamp.is_some()
}

/// Returns true when the pod is the leader of its group.
pub fn is_leader(pod: &Pod) -> bool {
    PodRole::from_pod(pod).is_leader()
}

/// Returns true when the pod is running and its Ready condition is True.
pub fn is_running_and_ready(pod: &Pod) -> bool {
    PodPhase::from_pod(pod) == PodPhase::Running
        && ready_condition(pod).is_some_and(|condition| condition.status == CONDITION_TRUE)
}

/// Find the Ready condition of the pod.
///
/// Conditions are unordered and few, so this is a plain scan. Should the list
/// hold more than one Ready entry, the first one wins.
pub fn ready_condition(pod: &Pod) -> Option<&PodCondition> {
    pod.status
        .as_ref()?
        .conditions
        .as_ref()?
        .iter()
        .find(|condition| condition.type_ == READY_CONDITION)
}

/// Snapshot of everything the reconciler asks about a pod.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodState {
    /// Pod name
    pub pod_name: String,
    /// Pod namespace
    pub namespace: String,
    pub phase: PodPhase,
    pub role: PodRole,
    pub restarted: bool,
    pub marked_for_deletion: bool,
    pub running_and_ready: bool,
    /// Labels under the leaderworkerset domain
    pub lws_labels: BTreeMap<String, String>,
}

impl PodState {
    pub fn evaluate(pod: &Pod) -> Self {
        let lws_labels = pod
            .metadata
            .labels
            .iter()
            .flatten()
            .filter(|(key, _)| labels::is_lws_label(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Self {
            pod_name: pod.metadata.name.clone().unwrap_or_default(),
            namespace: pod.metadata.namespace.clone().unwrap_or_default(),
            phase: PodPhase::from_pod(pod),
            role: PodRole::from_pod(pod),
            restarted: has_restarted(pod),
            marked_for_deletion: is_marked_for_deletion(pod),
            running_and_ready: is_running_and_ready(pod),
            lws_labels,
        }
    }
}
