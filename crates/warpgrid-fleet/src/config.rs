//! Fleet file parser.
//!
//! A fleet file describes one machine set: its desired replica count, the
//! configured delete policy, an optional health check budget, and the
//! observed machines. TOML by default, JSON when the path ends in `.json`.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::types::Machine;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetConfig {
    pub machine_set: MachineSetConfig,
    pub health_check: Option<HealthCheckConfig>,
    #[serde(default)]
    pub machines: Vec<Machine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineSetConfig {
    pub name: String,
    pub replicas: u32,
    /// "Random", "Newest", "Oldest", or empty for the default.
    #[serde(default)]
    pub delete_policy: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthCheckConfig {
    /// Absolute count ("3") or percentage ("40%") of tolerated unhealthy machines.
    pub max_unhealthy: Option<String>,
    /// Inclusive range like "[1-3]". Takes precedence over `max_unhealthy`.
    pub unhealthy_range: Option<String>,
}

impl FleetConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// How many machines must go to reach the desired replica count.
    /// Zero or negative when the set is at or below its target.
    pub fn removal_count(&self) -> i64 {
        self.machines.len() as i64 - i64::from(self.machine_set.replicas)
    }
}
