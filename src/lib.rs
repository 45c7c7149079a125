//! Add a standby controller to an existing APIC cluster
//!
//! The run has three stages: open a session, have the controller verify the
//! standby node's CIMC credentials (which yields its serial number), then
//! submit the join request. See [`workflow::run`].

pub mod apic;
pub mod config;
pub mod error;
pub mod utils;
pub mod workflow;

pub use error::{ConfigError, Error, Result};
pub use workflow::{JoinOutcome, RunConfig, RunFailure, Stage, load_run_config, run};
