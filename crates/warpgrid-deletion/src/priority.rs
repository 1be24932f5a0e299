//! Deletion priorities.
//!
//! Every machine maps onto a score in `0.0..=100.0`; higher goes first.
//! The top three tiers are fixed and shared by all policies:
//!
//! ```text
//! deletion already requested     -> 100  (must delete)
//! delete-machine annotation      ->  75  (should delete)
//! unhealthy                      ->  50  (better delete)
//! healthy                        -> policy scorer, always < 75
//! ```
//!
//! Only the healthy tail differs between policies, so a single
//! `DeletePriorityFn` carries the tail as an injected `HealthyScorer`.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use warpgrid_fleet::Machine;

use crate::health::is_machine_healthy;

/// Age at which the oldest-first score reaches ~63% of `BETTER_DELETE`.
pub const SECONDS_PER_TEN_DAYS: f64 = 864_000.0;

/// Bounded deletion score. Higher = delete sooner.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct DeletePriority(f64);

impl DeletePriority {
    pub const MUST_DELETE: Self = Self(100.0);
    pub const SHOULD_DELETE: Self = Self(75.0);
    pub const BETTER_DELETE: Self = Self(50.0);
    pub const COULD_DELETE: Self = Self(20.0);
    pub const MUST_NOT_DELETE: Self = Self(0.0);

    pub fn value(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for DeletePriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Which rule produced a machine's priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteReason {
    /// Deletion was already requested.
    Deleting,
    /// Carries the delete-machine annotation.
    Annotated,
    /// Failed the health classification.
    Unhealthy,
    /// Healthy; scored by the delete policy.
    Policy,
}

impl DeleteReason {
    pub fn label(&self) -> &'static str {
        match self {
            DeleteReason::Deleting => "deleting",
            DeleteReason::Annotated => "annotated",
            DeleteReason::Unhealthy => "unhealthy",
            DeleteReason::Policy => "policy",
        }
    }
}

/// Scores a healthy machine at the given Unix time.
pub type HealthyScorer = fn(&Machine, u64) -> DeletePriority;

/// Age-weighted score that saturates toward `BETTER_DELETE`.
///
/// Machines with an unset creation time, or one in the future, get
/// `MUST_NOT_DELETE`: an untrusted age never makes a machine look old.
/// The score stays strictly below `BETTER_DELETE` at any age, so a healthy
/// machine never ties with an unhealthy one.
pub fn oldest_priority(machine: &Machine, now: u64) -> DeletePriority {
    let age = match machine.age_secs(now) {
        Some(age) if age >= 0 => age as f64,
        _ => return DeletePriority::MUST_NOT_DELETE,
    };
    let saturation = 1.0 - (-age / SECONDS_PER_TEN_DAYS).exp();
    let ceiling = f64::from_bits(DeletePriority::BETTER_DELETE.0.to_bits() - 1);
    DeletePriority((DeletePriority::BETTER_DELETE.0 * saturation).min(ceiling))
}

/// Complement of `oldest_priority`: the youngest machines score highest.
pub fn newest_priority(machine: &Machine, now: u64) -> DeletePriority {
    DeletePriority(DeletePriority::BETTER_DELETE.0 - oldest_priority(machine, now).0)
}

/// Same score for every healthy machine; the name tie-break decides.
pub fn flat_priority(_machine: &Machine, _now: u64) -> DeletePriority {
    DeletePriority::COULD_DELETE
}

/// A deletion priority function bound to a fixed `now`.
#[derive(Debug, Clone, Copy)]
pub struct DeletePriorityFn {
    healthy_scorer: HealthyScorer,
    now: u64,
}

impl DeletePriorityFn {
    pub fn new(healthy_scorer: HealthyScorer, now: u64) -> Self {
        Self { healthy_scorer, now }
    }

    /// Unix time (seconds) ages are measured against.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Score a machine and report which rule decided the score.
    pub fn explain(&self, machine: &Machine) -> (DeletePriority, DeleteReason) {
        if machine.is_deleting() {
            return (DeletePriority::MUST_DELETE, DeleteReason::Deleting);
        }
        if machine.is_marked_for_deletion() {
            return (DeletePriority::SHOULD_DELETE, DeleteReason::Annotated);
        }
        if !is_machine_healthy(machine) {
            return (DeletePriority::BETTER_DELETE, DeleteReason::Unhealthy);
        }
        ((self.healthy_scorer)(machine, self.now), DeleteReason::Policy)
    }

    pub fn priority(&self, machine: &Machine) -> DeletePriority {
        self.explain(machine).0
    }
}

/// Current Unix time in seconds.
pub fn epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
