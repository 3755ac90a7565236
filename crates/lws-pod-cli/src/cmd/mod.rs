//! Command layer - Entry points for the lws-pod subcommands

pub mod inject;
pub mod status;

pub use inject::run_inject;
pub use status::run_status;
