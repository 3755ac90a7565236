use std::io::Write;

use anyhow::Result;
use k8s_openapi::api::core::v1::Pod;
use lws_pod::PodState;

use crate::config::OutputFormat;
use crate::config::StatusArgs;
use crate::kube_client;
use crate::manifest;

pub async fn run_status(args: StatusArgs) -> Result<()> {
    let pods = if args.from_cluster {
        kube_client::list_pods(&args.cluster)
            .await
            .map_err(|e| anyhow::anyhow!("{e:?}"))?
    } else {
        let mut pods = Vec::new();
        for path in &args.manifests {
            pods.extend(manifest::load_pods(path)?);
        }
        pods
    };

    render_states(&pods, args.output, std::io::stdout().lock())
}

fn render_states(pods: &[Pod], output: OutputFormat, mut writer: impl Write) -> Result<()> {
    for pod in pods {
        let state = PodState::evaluate(pod);
        tracing::debug!(
            pod = %state.pod_name,
            namespace = %state.namespace,
            role = %state.role,
            phase = %state.phase,
            "evaluated pod"
        );

        match output {
            OutputFormat::Json => {
                serde_json::to_writer(&mut writer, &state)?;
                writeln!(writer)?;
            }
            OutputFormat::Yaml => {
                writer.write_all(b"---\n")?;
                serde_yaml::to_writer(&mut writer, &state)?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use k8s_openapi::api::core::v1::PodCondition;
    use k8s_openapi::api::core::v1::PodStatus;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
    use lws_pod::labels::WORKER_INDEX_LABEL_KEY;
    use lws_pod::PodPhase;
    use lws_pod::PodRole;
    use similar_asserts::assert_eq;

    use super::*;

    fn create_test_pod(name: &str, worker_index: &str) -> Pod {
        Pod {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                namespace: Some("default".to_string()),
                labels: Some(
                    [(WORKER_INDEX_LABEL_KEY.to_string(), worker_index.to_string())].into(),
                ),
                ..Default::default()
            },
            spec: None,
            status: Some(PodStatus {
                phase: Some("Running".to_string()),
                conditions: Some(vec![PodCondition {
                    type_: "Ready".to_string(),
                    status: "True".to_string(),
                    ..Default::default()
                }]),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn json_lines_per_pod() {
        let pods = [create_test_pod("infer-0", "0"), create_test_pod("infer-0-1", "1")];

        let mut out = Vec::new();
        render_states(&pods, OutputFormat::Json, &mut out).unwrap();

        let states: Vec<PodState> = std::str::from_utf8(&out)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(states.len(), 2);
        assert_eq!(states[0].role, PodRole::Leader);
        assert_eq!(states[1].role, PodRole::Worker);
        assert!(states.iter().all(|state| state.running_and_ready));
        assert!(states.iter().all(|state| state.phase == PodPhase::Running));
    }

    #[test]
    fn yaml_documents_per_pod() {
        let pods = [create_test_pod("infer-0", "0")];

        let mut out = Vec::new();
        render_states(&pods, OutputFormat::Yaml, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("---\n"), "{text}");
        assert!(text.contains("role: Leader"), "{text}");
        assert!(text.contains("pod_name: infer-0"), "{text}");
    }
}
