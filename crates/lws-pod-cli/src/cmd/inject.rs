use std::fs::File;
use std::io::BufWriter;

use anyhow::Context;
use anyhow::Result;
use k8s_openapi::api::core::v1::Pod;
use lws_pod::add_leader_address;

use crate::config::InjectArgs;
use crate::manifest;

pub fn run_inject(args: InjectArgs) -> Result<()> {
    let mut pods = manifest::load_pods(&args.manifest)?;
    inject_all(&mut pods)?;

    match &args.out {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("create {}", path.display()))?;
            manifest::write_pods(&pods, BufWriter::new(file))?;
            tracing::info!(count = pods.len(), out = %path.display(), "wrote pods");
        }
        None => manifest::write_pods(&pods, std::io::stdout().lock())?,
    }
    Ok(())
}

/// Inject every pod, stopping at the first one missing its group labels.
fn inject_all(pods: &mut [Pod]) -> Result<()> {
    for pod in pods.iter_mut() {
        add_leader_address(pod).map_err(|e| anyhow::anyhow!("{e:?}"))?;
    }
    Ok(())
}
