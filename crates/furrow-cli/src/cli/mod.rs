//! CLI command implementations.
//!
//! This module contains the implementations for the CLI subcommands:
//! - `init` - Write a starter mission file
//! - `plan` - Plan every agent in a mission
//! - `sweep` - Plan a single area given on the command line

pub mod common;
pub mod init;
pub mod logging;
pub mod mission;
pub mod plan;
pub mod sweep;

pub use init::{InitArgs, cmd_init};
pub use logging::init_logging;
pub use plan::{PlanArgs, cmd_plan};
pub use sweep::{SweepArgs, cmd_sweep};
