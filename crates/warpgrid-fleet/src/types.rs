//! Machine snapshot types shared by the fleet and deletion crates.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique machine name within a machine set.
pub type MachineName = String;

/// Annotation requesting that a machine be removed first on scale-down.
pub const DELETE_MACHINE_ANNOTATION: &str = "cluster.x-k8s.io/delete-machine";

/// Condition reported by the node health watcher.
pub const NODE_HEALTHY_CONDITION: &str = "NodeHealthy";

/// Condition reported by the machine health check.
pub const HEALTH_CHECK_SUCCEEDED_CONDITION: &str = "HealthCheckSucceeded";

// ── Conditions ────────────────────────────────────────────────────

/// Status of a reported condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
}

/// A named status signal attached to a machine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Condition {
    #[serde(rename = "type")]
    pub condition_type: String,
    pub status: ConditionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Unix timestamp (seconds) of the last status flip, `0` if unknown.
    #[serde(default)]
    pub last_transition_time: u64,
}

impl Condition {
    pub fn new(condition_type: &str, status: ConditionStatus) -> Self {
        Self {
            condition_type: condition_type.to_string(),
            status,
            reason: None,
            message: None,
            last_transition_time: 0,
        }
    }

    pub fn is_false(&self) -> bool {
        self.status == ConditionStatus::False
    }
}

/// Condition lookup by type.
///
/// Health classification only needs this capability, not the concrete
/// status layout of the object carrying the conditions.
pub trait ConditionGetter {
    fn get_condition(&self, condition_type: &str) -> Option<&Condition>;
}

// ── Machine ───────────────────────────────────────────────────────

/// Point-in-time snapshot of a single machine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Machine {
    pub name: MachineName,
    /// Unix timestamp (seconds) when the machine was created. `0` = unset.
    #[serde(default)]
    pub created_at: u64,
    /// Set once removal of this machine has been initiated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletion_timestamp: Option<u64>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub annotations: HashMap<String, String>,
    /// Name of the node this machine is bound to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_message: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl Machine {
    /// A bare machine with only a name. Unbound, so not yet healthy.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_created_at(mut self, created_at: u64) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn with_node_ref(mut self, node: &str) -> Self {
        self.node_ref = Some(node.to_string());
        self
    }

    pub fn with_deletion_timestamp(mut self, ts: u64) -> Self {
        self.deletion_timestamp = Some(ts);
        self
    }

    pub fn with_annotation(mut self, key: &str, value: &str) -> Self {
        self.annotations.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.retain(|c| c.condition_type != condition.condition_type);
        self.conditions.push(condition);
        self
    }

    /// Whether removal of this machine is already in progress.
    pub fn is_deleting(&self) -> bool {
        self.deletion_timestamp.is_some()
    }

    /// Whether the machine carries the forced-deletion annotation.
    /// Only the key matters, the value is ignored.
    pub fn is_marked_for_deletion(&self) -> bool {
        self.annotations.contains_key(DELETE_MACHINE_ANNOTATION)
    }

    /// Whether the provider reported a terminal failure for this machine.
    pub fn has_failure(&self) -> bool {
        self.failure_reason.is_some() || self.failure_message.is_some()
    }

    /// Age in seconds relative to `now`, or `None` if the creation time is
    /// unset or either timestamp does not fit an `i64`. Negative when the
    /// creation time lies in the future.
    pub fn age_secs(&self, now: u64) -> Option<i64> {
        if self.created_at == 0 {
            return None;
        }
        let now = i64::try_from(now).ok()?;
        let created_at = i64::try_from(self.created_at).ok()?;
        now.checked_sub(created_at)
    }
}

impl ConditionGetter for Machine {
    fn get_condition(&self, condition_type: &str) -> Option<&Condition> {
        self.conditions
            .iter()
            .find(|c| c.condition_type == condition_type)
    }
}
