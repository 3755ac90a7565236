//! Reading and writing pod manifests.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use anyhow::Result;
use k8s_openapi::api::core::v1::Pod;
use serde::Deserialize;
use tracing::warn;

/// Load every pod from a manifest file.
///
/// `.json` files hold a single pod. Anything else is read as YAML and may
/// contain several documents; documents of another kind are skipped.
pub fn load_pods(path: &Path) -> Result<Vec<Pod>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read manifest {}", path.display()))?;

    let pods = if path.extension().is_some_and(|ext| ext == "json") {
        vec![serde_json::from_str(&content)
            .with_context(|| format!("parse pod from {}", path.display()))?]
    } else {
        parse_yaml_pods(&content).with_context(|| format!("parse pods from {}", path.display()))?
    };
    Ok(pods)
}

fn parse_yaml_pods(content: &str) -> Result<Vec<Pod>> {
    let mut pods = Vec::new();
    for (index, document) in serde_yaml::Deserializer::from_str(content).enumerate() {
        let value = serde_yaml::Value::deserialize(document)
            .with_context(|| format!("document {index}"))?;
        if value.is_null() {
            continue;
        }

        let kind = value.get("kind").and_then(serde_yaml::Value::as_str);
        if kind != Some("Pod") {
            warn!(document = index, ?kind, "skipping non-pod document");
            continue;
        }
        pods.push(serde_yaml::from_value(value).with_context(|| format!("document {index}"))?);
    }
    Ok(pods)
}

/// Write pods as a multi-document YAML stream.
pub fn write_pods(pods: &[Pod], mut writer: impl Write) -> Result<()> {
    for pod in pods {
        writer.write_all(b"---\n")?;
        serde_yaml::to_writer(&mut writer, pod).context("serialize pod")?;
    }
    writer.flush()?;
    Ok(())
}
