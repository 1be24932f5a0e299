use std::path::Path;

use tracing::{debug, info};
use warpgrid_deletion::{HealthCheckSummary, summarize_health};
use warpgrid_fleet::FleetConfig;

pub fn health(file: &str, format: &str) -> anyhow::Result<()> {
    let config = FleetConfig::from_file(Path::new(file))?;
    info!(
        file,
        machine_set = %config.machine_set.name,
        machines = config.machines.len(),
        "loaded fleet file"
    );

    let health_check = config.health_check.clone().unwrap_or_default();
    debug!(
        max_unhealthy = ?health_check.max_unhealthy,
        unhealthy_range = ?health_check.unhealthy_range,
        "remediation budget"
    );

    let summary = summarize_health(&health_check, &config.machines)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        _ => {
            print!("{}", format_summary(&summary));
        }
    }

    Ok(())
}

pub fn format_summary(summary: &HealthCheckSummary) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Healthy: {}/{}\n",
        summary.current_healthy, summary.expected_machines
    ));
    if summary.remediation_allowed {
        out.push_str(&format!(
            "Remediation allowed ({} more)\n",
            summary.remediations_allowed
        ));
    } else {
        out.push_str("Remediation short-circuited: unhealthy count outside budget\n");
    }

    if !summary.unhealthy.is_empty() {
        out.push_str("\nUnhealthy machines:\n");
        for name in &summary.unhealthy {
            out.push_str(&format!("  • {name}\n"));
        }
    }

    out
}
