//! Leader address injection.
//!
//! Every pod of a group gets `LWS_LEADER_ADDRESS` pointing at the leader's
//! stable DNS name. The name is resolved by a headless service named after
//! the LeaderWorkerSet, which is created by the controller and is not checked
//! here.

use error_stack::Report;
use k8s_openapi::api::core::v1::Container;
use k8s_openapi::api::core::v1::EnvVar;
use k8s_openapi::api::core::v1::Pod;
use tracing::debug;
use tracing::warn;

use crate::env::insert_env_if_absent;
use crate::error::LeaderAddressError;
use crate::labels;
use crate::labels::GROUP_INDEX_LABEL_KEY;
use crate::labels::LEADER_ADDRESS_ENV;
use crate::labels::SET_NAME_LABEL_KEY;

/// Compute the leader address of the pod's group.
///
/// The address has the form `<name>-<group index>.<name>.<namespace>`.
///
/// # Errors
///
/// - [`LeaderAddressError::MissingLabel`] if the set name or group index label is absent
pub fn leader_address(pod: &Pod) -> Result<String, Report<LeaderAddressError>> {
    let set_name = required_label(pod, SET_NAME_LABEL_KEY, "group name")?;
    let group_index = required_label(pod, GROUP_INDEX_LABEL_KEY, "group index")?;
    let namespace = pod_namespace(pod);

    Ok(format!("{set_name}-{group_index}.{set_name}.{namespace}"))
}

/// Add the leader address env var to every container and init container.
///
/// Containers that already define the variable keep their own value, so
/// calling this more than once is a no-op. Labels are validated before any
/// container is touched.
///
/// # Errors
///
/// - [`LeaderAddressError::MissingLabel`] if the set name or group index label is absent
#[tracing::instrument(skip_all, fields(pod = %pod_name(pod), namespace = %pod_namespace(pod)))]
pub fn add_leader_address(pod: &mut Pod) -> Result<(), Report<LeaderAddressError>> {
    let var = EnvVar {
        name: LEADER_ADDRESS_ENV.to_string(),
        value: Some(leader_address(pod)?),
        ..Default::default()
    };

    let Some(spec) = pod.spec.as_mut() else {
        debug!("pod has no spec, nothing to inject");
        return Ok(());
    };

    let inserted = inject(&mut spec.containers, &var)
        + inject(spec.init_containers.iter_mut().flatten(), &var);
    debug!(address = ?var.value, inserted, "leader address injected");

    Ok(())
}

fn inject<'a>(containers: impl IntoIterator<Item = &'a mut Container>, var: &EnvVar) -> usize {
    let mut inserted = 0;
    for container in containers {
        if insert_env_if_absent(container, var.clone()) {
            inserted += 1;
        } else {
            debug!(container = %container.name, "{LEADER_ADDRESS_ENV} already set, keeping it");
        }
    }
    inserted
}

fn pod_name(pod: &Pod) -> &str {
    pod.metadata.name.as_deref().unwrap_or_default()
}

fn pod_namespace(pod: &Pod) -> &str {
    pod.metadata.namespace.as_deref().unwrap_or_default()
}

fn required_label<'a>(
    pod: &'a Pod,
    key: &str,
    label: &'static str,
) -> Result<&'a str, Report<LeaderAddressError>> {
    labels::label(pod, key).ok_or_else(|| {
        warn!(pod = %pod_name(pod), key, "missing required label");
        Report::new(LeaderAddressError::MissingLabel {
            pod_name: pod_name(pod).to_string(),
            label,
        })
    })
}
