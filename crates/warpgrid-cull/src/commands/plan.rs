use std::path::Path;

use tracing::{debug, info};
use warpgrid_deletion::{DeletionPlan, epoch_secs, plan_scale_down};
use warpgrid_fleet::FleetConfig;

pub fn plan(
    file: &str,
    policy: Option<&str>,
    now: Option<u64>,
    format: &str,
) -> anyhow::Result<()> {
    let config = FleetConfig::from_file(Path::new(file))?;
    info!(
        file,
        machine_set = %config.machine_set.name,
        machines = config.machines.len(),
        removal_count = config.removal_count(),
        "loaded fleet file"
    );

    let policy = policy.unwrap_or(&config.machine_set.delete_policy);
    let now = now.unwrap_or_else(epoch_secs);
    debug!(policy, now, "planning scale-down");

    let plan = plan_scale_down(policy, &config.machines, config.removal_count(), now)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        _ => {
            print!("{}", format_plan(&config, &plan));
        }
    }

    Ok(())
}

pub fn format_plan(config: &FleetConfig, plan: &DeletionPlan) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Machine set {} ({} machines, {} replicas desired)\n",
        config.machine_set.name,
        config.machines.len(),
        config.machine_set.replicas
    ));
    out.push_str(&format!("Delete policy: {}\n\n", plan.policy));

    if plan.is_empty() {
        out.push_str("Nothing to delete.\n");
        return out;
    }

    out.push_str(&format!("Delete {} machine(s):\n", plan.machines.len()));
    for (i, m) in plan.machines.iter().enumerate() {
        out.push_str(&format!(
            "  {}. {:<24} {:>6.2}  {}\n",
            i + 1,
            m.name,
            m.priority.value(),
            m.reason.label()
        ));
    }

    out
}
