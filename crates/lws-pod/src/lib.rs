//! Pod helpers for LeaderWorkerSet groups
//!
//! This crate answers the questions a reconciler asks about every pod of a
//! leader/worker group, and prepares pods so they can reach their leader:
//! - [`state`]: restart, deletion, leadership and readiness predicates
//! - [`leader_address`]: builds and injects `LWS_LEADER_ADDRESS`
//! - [`labels`]: the label contract shared with the controller

mod env;
mod error;
pub mod labels;
pub mod leader_address;
pub mod state;

pub use error::LeaderAddressError;
pub use labels::PodRole;
pub use leader_address::add_leader_address;
pub use leader_address::leader_address;
pub use state::has_restarted;
pub use state::is_leader;
pub use state::is_marked_for_deletion;
pub use state::is_running_and_ready;
pub use state::PodPhase;
pub use state::PodState;
