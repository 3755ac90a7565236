mod cmd;
mod config;
mod kube_client;
mod manifest;

use anyhow::Result;
use clap::Parser;
use utils::logging;
use utils::version;

use crate::config::Cli;
use crate::config::Commands;

/// Sets up global panic hooks.
fn setup_global_hooks() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        default_hook(panic_info);
        tracing::error!("Thread panicked: {}", panic_info);
    }));
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_global_hooks();

    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref());

    tracing::debug!("lws-pod {}", &**version::VERSION);

    match cli.command {
        Commands::Status(args) => cmd::run_status(args).await,
        Commands::Inject(args) => cmd::run_inject(args),
    }
}
