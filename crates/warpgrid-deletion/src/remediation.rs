//! Remediation budget for machine health checks.
//!
//! Replacing unhealthy machines is only safe while few of them are
//! unhealthy. The budget is either `maxUnhealthy` (a count or a percentage
//! of the checked machines, default `100%`) or `unhealthyRange` (`[min-max]`),
//! the range winning when both are set. Once the unhealthy count falls
//! outside the budget, remediation short-circuits to zero.

use std::str::FromStr;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};

use warpgrid_fleet::{HealthCheckConfig, Machine};

use crate::error::{DeletionError, DeletionResult};
use crate::health::is_machine_healthy;

/// Tolerated number of unhealthy machines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxUnhealthy {
    Count(u32),
    /// Percentage of the checked machines, scaled rounding down.
    Percent(u32),
}

impl MaxUnhealthy {
    pub fn scaled(&self, total: u32) -> u32 {
        match *self {
            MaxUnhealthy::Count(n) => n,
            MaxUnhealthy::Percent(p) => (u64::from(p) * u64::from(total) / 100) as u32,
        }
    }
}

impl Default for MaxUnhealthy {
    fn default() -> Self {
        MaxUnhealthy::Percent(100)
    }
}

impl FromStr for MaxUnhealthy {
    type Err = DeletionError;

    fn from_str(s: &str) -> DeletionResult<Self> {
        let invalid = || DeletionError::InvalidMaxUnhealthy(s.to_string());
        let trimmed = s.trim();
        match trimmed.strip_suffix('%') {
            Some(pct) => pct.parse().map(MaxUnhealthy::Percent).map_err(|_| invalid()),
            None => trimmed.parse().map(MaxUnhealthy::Count).map_err(|_| invalid()),
        }
    }
}

/// Inclusive bounds on the unhealthy count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnhealthyRange {
    pub min: u32,
    pub max: u32,
}

impl UnhealthyRange {
    pub fn contains(&self, unhealthy: u32) -> bool {
        (self.min..=self.max).contains(&unhealthy)
    }
}

impl FromStr for UnhealthyRange {
    type Err = DeletionError;

    fn from_str(s: &str) -> DeletionResult<Self> {
        let invalid = || DeletionError::InvalidUnhealthyRange(s.to_string());
        let range_re = Regex::new(r"^\[([0-9]+)-([0-9]+)\]$").map_err(|_| invalid())?;

        let caps = range_re.captures(s.trim()).ok_or_else(invalid)?;
        let min: u32 = caps[1].parse().map_err(|_| invalid())?;
        let max: u32 = caps[2].parse().map_err(|_| invalid())?;
        if min > max {
            return Err(invalid());
        }
        Ok(UnhealthyRange { min, max })
    }
}

/// Which limit gates remediation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemediationBudget {
    Range(UnhealthyRange),
    Max(MaxUnhealthy),
}

impl RemediationBudget {
    pub fn from_config(config: &HealthCheckConfig) -> DeletionResult<Self> {
        if let Some(range) = &config.unhealthy_range {
            return Ok(RemediationBudget::Range(range.parse()?));
        }
        let max = match &config.max_unhealthy {
            Some(raw) => raw.parse()?,
            None => MaxUnhealthy::default(),
        };
        Ok(RemediationBudget::Max(max))
    }

    /// Further remediations allowed, or `None` when remediation is
    /// short-circuited for this unhealthy count.
    pub fn remediations_allowed(&self, total: u32, unhealthy: u32) -> Option<u32> {
        match self {
            RemediationBudget::Range(range) => {
                range.contains(unhealthy).then(|| range.max - unhealthy)
            }
            RemediationBudget::Max(max) => {
                let limit = max.scaled(total);
                (unhealthy <= limit).then(|| limit - unhealthy)
            }
        }
    }
}

/// Observed state of a health check over a set of machines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthCheckSummary {
    pub expected_machines: u32,
    pub current_healthy: u32,
    pub remediations_allowed: u32,
    /// False when too many (or, with a range, too few) machines are unhealthy.
    pub remediation_allowed: bool,
    /// Names of the checked machines.
    pub targets: Vec<String>,
    /// Names of machines that failed the health classification.
    pub unhealthy: Vec<String>,
}

/// Classify `machines` and compute the remediation budget for them.
pub fn summarize_health(
    config: &HealthCheckConfig,
    machines: &[Machine],
) -> DeletionResult<HealthCheckSummary> {
    let budget = RemediationBudget::from_config(config)?;

    let unhealthy: Vec<String> = machines
        .iter()
        .filter(|m| !is_machine_healthy(m))
        .map(|m| m.name.clone())
        .collect();

    let expected = machines.len() as u32;
    let unhealthy_count = unhealthy.len() as u32;
    let allowed = budget.remediations_allowed(expected, unhealthy_count);

    match allowed {
        Some(remaining) => debug!(
            expected,
            unhealthy = unhealthy_count,
            remaining,
            "remediation allowed"
        ),
        None => warn!(
            expected,
            unhealthy = unhealthy_count,
            ?budget,
            "remediation short-circuited"
        ),
    }

    Ok(HealthCheckSummary {
        expected_machines: expected,
        current_healthy: expected - unhealthy_count,
        remediations_allowed: allowed.unwrap_or(0),
        remediation_allowed: allowed.is_some(),
        targets: machines.iter().map(|m| m.name.clone()).collect(),
        unhealthy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(max: Option<&str>, range: Option<&str>) -> HealthCheckConfig {
        HealthCheckConfig {
            max_unhealthy: max.map(str::to_string),
            unhealthy_range: range.map(str::to_string),
        }
    }

    fn fleet(healthy: usize, unhealthy: usize) -> Vec<Machine> {
        let mut machines: Vec<Machine> = (0..healthy)
            .map(|i| Machine::new(&format!("ok-{i}")).with_node_ref("node"))
            .collect();
        machines.extend((0..unhealthy).map(|i| Machine::new(&format!("bad-{i}"))));
        machines
    }

    #[test]
    fn parses_max_unhealthy() {
        assert_eq!("3".parse::<MaxUnhealthy>().unwrap(), MaxUnhealthy::Count(3));
        assert_eq!("40%".parse::<MaxUnhealthy>().unwrap(), MaxUnhealthy::Percent(40));
        assert!("-1".parse::<MaxUnhealthy>().is_err());
        assert!("forty%".parse::<MaxUnhealthy>().is_err());
    }

    #[test]
    fn percentage_scales_rounding_down() {
        assert_eq!(MaxUnhealthy::Percent(40).scaled(5), 2);
        assert_eq!(MaxUnhealthy::Percent(40).scaled(4), 1);
        assert_eq!(MaxUnhealthy::default().scaled(7), 7);
        assert_eq!(MaxUnhealthy::Count(2).scaled(100), 2);
    }

    #[test]
    fn parses_unhealthy_range() {
        let r: UnhealthyRange = "[3-5]".parse().unwrap();
        assert_eq!(r, UnhealthyRange { min: 3, max: 5 });
        assert!(r.contains(3) && r.contains(5));
        assert!(!r.contains(2) && !r.contains(6));
    }

    #[test]
    fn rejects_malformed_ranges() {
        for raw in ["3-5", "[5-3]", "[a-b]", "[3-]", ""] {
            let err = raw.parse::<UnhealthyRange>().unwrap_err();
            assert_eq!(err, DeletionError::InvalidUnhealthyRange(raw.to_string()));
        }
    }

    #[test]
    fn range_takes_precedence_over_max() {
        let budget = RemediationBudget::from_config(&config(Some("1"), Some("[0-4]"))).unwrap();
        assert_eq!(budget.remediations_allowed(10, 3), Some(1));
    }

    #[test]
    fn default_budget_allows_everything() {
        let summary = summarize_health(&config(None, None), &fleet(2, 3)).unwrap();
        assert!(summary.remediation_allowed);
        assert_eq!(summary.remediations_allowed, 2);
        assert_eq!(summary.current_healthy, 2);
        assert_eq!(summary.expected_machines, 5);
    }

    #[test]
    fn too_many_unhealthy_short_circuits() {
        let summary = summarize_health(&config(Some("40%"), None), &fleet(2, 3)).unwrap();
        assert!(!summary.remediation_allowed);
        assert_eq!(summary.remediations_allowed, 0);
        assert_eq!(summary.unhealthy, vec!["bad-0", "bad-1", "bad-2"]);
        assert_eq!(summary.targets.len(), 5);
    }

    #[test]
    fn too_few_unhealthy_for_range_short_circuits() {
        let summary = summarize_health(&config(None, Some("[2-4]")), &fleet(4, 1)).unwrap();
        assert!(!summary.remediation_allowed);

        let summary = summarize_health(&config(None, Some("[2-4]")), &fleet(3, 2)).unwrap();
        assert!(summary.remediation_allowed);
        assert_eq!(summary.remediations_allowed, 2);
    }

    #[test]
    fn invalid_config_is_reported() {
        let err = summarize_health(&config(Some("lots"), None), &fleet(1, 0)).unwrap_err();
        assert_eq!(err, DeletionError::InvalidMaxUnhealthy("lots".to_string()));
    }
}
