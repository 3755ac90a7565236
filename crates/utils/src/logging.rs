//! provides logging helpers

use tracing_subscriber::filter::{self};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry;

/// Environment variable read for filter directives.
pub const LOG_ENV: &str = "LWS_POD_LOG";

/// initiate the global tracing subscriber
///
/// `directives` takes precedence over [`LOG_ENV`]; without either the level
/// defaults to INFO.
pub fn init(directives: Option<&str>) {
    let builder = filter::EnvFilter::builder()
        .with_default_directive(filter::LevelFilter::INFO.into())
        .with_env_var(LOG_ENV);
    let env_filter = match directives {
        Some(directives) => builder.parse_lossy(directives),
        None => builder.from_env_lossy(),
    };

    let fmt_layer = layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(env_filter);

    registry().with(fmt_layer).init();
}
