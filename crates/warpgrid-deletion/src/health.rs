//! Machine health classification for deletion ordering.

use warpgrid_fleet::{
    ConditionGetter, HEALTH_CHECK_SUCCEEDED_CONDITION, Machine, NODE_HEALTHY_CONDITION,
};

/// Whether a machine counts as healthy when ranking it for deletion.
///
/// Unhealthy means any of: no node yet, a reported failure, or one of the
/// `NodeHealthy` / `HealthCheckSucceeded` conditions explicitly `False`.
/// An `Unknown` or missing condition is not treated as unhealthy.
pub fn is_machine_healthy(machine: &Machine) -> bool {
    if machine.node_ref.is_none() {
        return false;
    }
    if machine.has_failure() {
        return false;
    }
    !condition_is_false(machine, NODE_HEALTHY_CONDITION)
        && !condition_is_false(machine, HEALTH_CHECK_SUCCEEDED_CONDITION)
}

fn condition_is_false(source: &impl ConditionGetter, condition_type: &str) -> bool {
    source
        .get_condition(condition_type)
        .is_some_and(|c| c.is_false())
}
