//! Scale-down plans.
//!
//! A plan is the deletion selection plus the score and reason for each
//! chosen machine, so callers can log or display why a machine goes.

use serde::Serialize;
use tracing::{debug, info};

use warpgrid_fleet::Machine;

use crate::error::DeletionResult;
use crate::policy::DeletePolicy;
use crate::priority::{DeletePriority, DeleteReason};
use crate::select::machines_to_delete;

/// One machine chosen for deletion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedMachine {
    pub name: String,
    pub priority: DeletePriority,
    pub reason: DeleteReason,
}

/// Result of planning a scale-down.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeletionPlan {
    pub policy: DeletePolicy,
    /// Requested removal count, as passed in.
    pub removal_count: i64,
    /// Unix time ages were measured against.
    pub evaluated_at: u64,
    /// Selected machines in selection order.
    pub machines: Vec<RankedMachine>,
}

impl DeletionPlan {
    pub fn names(&self) -> Vec<&str> {
        self.machines.iter().map(|m| m.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }
}

/// Resolve `policy` and select `diff` machines to delete, scoring at `now`.
///
/// Fails only on an unsupported policy name, before anything is selected.
pub fn plan_scale_down(
    policy: &str,
    machines: &[Machine],
    diff: i64,
    now: u64,
) -> DeletionResult<DeletionPlan> {
    let policy: DeletePolicy = policy.parse()?;
    let priority_fn = policy.priority_fn(now);

    let selected = machines_to_delete(machines, diff, |m| priority_fn.priority(m));

    let ranked: Vec<RankedMachine> = selected
        .into_iter()
        .map(|m| {
            let (priority, reason) = priority_fn.explain(m);
            debug!(
                machine = %m.name,
                priority = priority.value(),
                reason = reason.label(),
                "selected for deletion"
            );
            RankedMachine {
                name: m.name.clone(),
                priority,
                reason,
            }
        })
        .collect();

    info!(
        %policy,
        candidates = machines.len(),
        requested = diff,
        selected = ranked.len(),
        "scale-down plan computed"
    );

    Ok(DeletionPlan {
        policy,
        removal_count: diff,
        evaluated_at: now,
        machines: ranked,
    })
}
