use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use utils::logging::LOG_ENV;
use utils::version;

#[derive(Parser)]
#[command(about, long_about, version = &**version::VERSION)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        help = "Log filter directives, e.g. `debug` or `lws_pod=trace`",
        env = LOG_ENV
    )]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report restart, deletion, role and readiness of pods
    Status(StatusArgs),
    /// Add the leader address env var to every container of the pods in a manifest
    Inject(InjectArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Args)]
pub struct StatusArgs {
    #[arg(
        help = "Pod manifests (YAML or JSON)",
        value_hint = clap::ValueHint::FilePath,
        required_unless_present = "from_cluster"
    )]
    pub manifests: Vec<PathBuf>,

    #[arg(
        long,
        help = "Read pods from the API server instead of manifests",
        conflicts_with = "manifests"
    )]
    pub from_cluster: bool,

    #[command(flatten)]
    pub cluster: ClusterArgs,

    #[arg(long, value_enum, help = "Output format", default_value = "json")]
    pub output: OutputFormat,
}

#[derive(Args)]
pub struct ClusterArgs {
    #[arg(
        long,
        help = "Path to the kubeconfig file (defaults to in-cluster or ~/.kube/config)",
        env = "KUBECONFIG",
        value_hint = clap::ValueHint::FilePath
    )]
    pub kubeconfig: Option<PathBuf>,

    #[arg(
        short,
        long,
        help = "Namespace to list pods from (all namespaces if unset)"
    )]
    pub namespace: Option<String>,

    #[arg(
        short = 'l',
        long,
        help = "Label selector for pods",
        default_value = lws_pod::labels::SET_NAME_LABEL_KEY
    )]
    pub selector: String,
}

#[derive(Args)]
pub struct InjectArgs {
    #[arg(help = "Pod manifest (YAML or JSON)", value_hint = clap::ValueHint::FilePath)]
    pub manifest: PathBuf,

    #[arg(
        long,
        help = "Write the result to this file instead of stdout",
        value_hint = clap::ValueHint::FilePath
    )]
    pub out: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use similar_asserts::assert_eq;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn status_from_manifests() {
        let cli = Cli::try_parse_from(["lws-pod", "status", "a.yaml", "b.json"]).unwrap();
        let Commands::Status(args) = cli.command else {
            panic!("expected status command");
        };
        assert_eq!(
            args.manifests,
            vec![PathBuf::from("a.yaml"), PathBuf::from("b.json")]
        );
        assert!(!args.from_cluster);
        assert_eq!(args.output, OutputFormat::Json);
        assert_eq!(args.cluster.selector, lws_pod::labels::SET_NAME_LABEL_KEY);
    }

    #[test]
    fn status_needs_a_source() {
        assert!(Cli::try_parse_from(["lws-pod", "status"]).is_err());
        assert!(
            Cli::try_parse_from(["lws-pod", "status", "--from-cluster", "a.yaml"]).is_err()
        );
    }

    #[test]
    fn status_from_cluster() {
        let cli = Cli::try_parse_from([
            "lws-pod",
            "status",
            "--from-cluster",
            "-n",
            "serving",
            "-l",
            "leaderworkerset.sigs.k8s.io/name=infer",
            "--output",
            "yaml",
        ])
        .unwrap();
        let Commands::Status(args) = cli.command else {
            panic!("expected status command");
        };
        assert!(args.from_cluster);
        assert_eq!(args.cluster.namespace.as_deref(), Some("serving"));
        assert_eq!(
            args.cluster.selector,
            "leaderworkerset.sigs.k8s.io/name=infer"
        );
        assert_eq!(args.output, OutputFormat::Yaml);
    }

    #[test]
    fn inject_args() {
        let cli =
            Cli::try_parse_from(["lws-pod", "inject", "pod.yaml", "--out", "out.yaml"]).unwrap();
        let Commands::Inject(args) = cli.command else {
            panic!("expected inject command");
        };
        assert_eq!(args.manifest, PathBuf::from("pod.yaml"));
        assert_eq!(args.out, Some(PathBuf::from("out.yaml")));
    }
}
