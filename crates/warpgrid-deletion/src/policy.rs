//! Delete policy resolution.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DeletionError, DeletionResult};
use crate::priority::{
    DeletePriorityFn, HealthyScorer, flat_priority, newest_priority, oldest_priority,
};

/// How healthy machines are ordered on scale-down.
///
/// `Random` is not randomized: every healthy machine gets the same score
/// and the name tie-break decides, so the choice is stable across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeletePolicy {
    #[default]
    Random,
    Newest,
    Oldest,
}

impl DeletePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeletePolicy::Random => "Random",
            DeletePolicy::Newest => "Newest",
            DeletePolicy::Oldest => "Oldest",
        }
    }

    /// Scorer applied to machines that passed the shared tiers.
    pub fn healthy_scorer(&self) -> HealthyScorer {
        match self {
            DeletePolicy::Random => flat_priority,
            DeletePolicy::Newest => newest_priority,
            DeletePolicy::Oldest => oldest_priority,
        }
    }

    /// Priority function for this policy with ages measured at `now`.
    pub fn priority_fn(&self, now: u64) -> DeletePriorityFn {
        DeletePriorityFn::new(self.healthy_scorer(), now)
    }
}

impl FromStr for DeletePolicy {
    type Err = DeletionError;

    /// Exact, case-sensitive match. An empty string selects the default.
    fn from_str(s: &str) -> DeletionResult<Self> {
        match s {
            "" | "Random" => Ok(DeletePolicy::Random),
            "Newest" => Ok(DeletePolicy::Newest),
            "Oldest" => Ok(DeletePolicy::Oldest),
            other => Err(DeletionError::UnsupportedPolicy(other.to_string())),
        }
    }
}

impl std::fmt::Display for DeletePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve a configured policy name to a priority function at `now`.
pub fn delete_priority_func(policy: &str, now: u64) -> DeletionResult<DeletePriorityFn> {
    Ok(policy.parse::<DeletePolicy>()?.priority_fn(now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use warpgrid_fleet::Machine;

    const NOW: u64 = 1_700_000_000;

    #[test]
    fn empty_policy_defaults_to_random() {
        assert_eq!("".parse::<DeletePolicy>().unwrap(), DeletePolicy::Random);
        assert_eq!(DeletePolicy::default(), DeletePolicy::Random);
    }

    #[test]
    fn parses_known_policies() {
        for policy in [DeletePolicy::Random, DeletePolicy::Newest, DeletePolicy::Oldest] {
            assert_eq!(policy.as_str().parse::<DeletePolicy>().unwrap(), policy);
        }
    }

    #[test]
    fn unknown_policy_is_rejected_with_name() {
        let err = "Unknown".parse::<DeletePolicy>().unwrap_err();
        assert_eq!(err, DeletionError::UnsupportedPolicy("Unknown".to_string()));

        let msg = err.to_string();
        assert!(msg.contains("Unknown"));
        assert!(msg.contains("'Random', 'Newest', or 'Oldest'"));
    }

    #[test]
    fn policy_names_are_case_sensitive() {
        assert!("oldest".parse::<DeletePolicy>().is_err());
        assert!(delete_priority_func("RANDOM", NOW).is_err());
    }

    #[test]
    fn empty_and_random_resolve_to_equivalent_functions() {
        let a = delete_priority_func("", NOW).unwrap();
        let b = delete_priority_func("Random", NOW).unwrap();
        let machines = [
            Machine::new("unbound"),
            Machine::new("healthy").with_node_ref("n1").with_created_at(NOW - 100),
            Machine::new("gone").with_deletion_timestamp(NOW),
        ];
        for m in &machines {
            assert_eq!(a.explain(m), b.explain(m));
        }
    }

    #[test]
    fn resolved_function_keeps_now() {
        let f = delete_priority_func("Oldest", NOW).unwrap();
        assert_eq!(f.now(), NOW);
    }

    #[test]
    fn serde_uses_policy_names() {
        let json = serde_json::to_string(&DeletePolicy::Newest).unwrap();
        assert_eq!(json, "\"Newest\"");
        assert_eq!(DeletePolicy::Oldest.to_string(), "Oldest");
    }
}
