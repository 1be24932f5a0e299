//! warpgrid-deletion — choose which machines go on scale-down.
//!
//! Given a snapshot of a machine set's machines and the number to remove,
//! scores every machine and returns the highest-priority ones. Pure and
//! synchronous: nothing is watched, patched, or persisted here.
//!
//! # Selection
//!
//! ```text
//! policy name --resolve--> DeletePriorityFn (fixed `now`)
//! for each machine:
//!     deleting?            100
//!     delete annotation?    75
//!     unhealthy?            50
//!     else                  policy scorer (Oldest / Newest / Random)
//! sort by priority desc, name asc
//! take diff
//! ```
//!
//! # Components
//!
//! - **`health`** — healthy / unhealthy classification
//! - **`priority`** — priority tiers and per-policy healthy scorers
//! - **`policy`** — delete policy parsing and resolution
//! - **`select`** — ranked top-N selection
//! - **`plan`** — selection with per-machine score and reason
//! - **`remediation`** — `maxUnhealthy` / `unhealthyRange` budget

pub mod error;
pub mod health;
pub mod plan;
pub mod policy;
pub mod priority;
pub mod remediation;
pub mod select;

pub use error::{DeletionError, DeletionResult};
pub use health::is_machine_healthy;
pub use plan::{DeletionPlan, RankedMachine, plan_scale_down};
pub use policy::{DeletePolicy, delete_priority_func};
pub use priority::{
    DeletePriority, DeletePriorityFn, DeleteReason, HealthyScorer, SECONDS_PER_TEN_DAYS,
    epoch_secs, flat_priority, newest_priority, oldest_priority,
};
pub use remediation::{
    HealthCheckSummary, MaxUnhealthy, RemediationBudget, UnhealthyRange, summarize_health,
};
pub use select::machines_to_delete;
