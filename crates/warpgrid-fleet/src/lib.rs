//! warpgrid-fleet — machine snapshots and fleet files.
//!
//! Read-only view of the machines backing a machine set, as observed by the
//! caller right before a scale-down decision. Nothing in this crate mutates
//! or persists machines; `warpgrid-deletion` consumes these snapshots.

pub mod config;
pub mod types;

pub use config::{FleetConfig, HealthCheckConfig, MachineSetConfig};
pub use types::*;
