//! End-to-end tests for the warp-cull binary.

use std::path::PathBuf;
use std::process::Command;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn warp_cull(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_warp-cull"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}

#[test]
fn plan_json_selects_annotated_then_unhealthy() {
    let file = fixture("fleet.toml");
    let out = warp_cull(&[
        "plan",
        "--file",
        file.to_str().unwrap(),
        "--now",
        "1700000000",
        "--format",
        "json",
    ]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let plan: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(plan["policy"], "Oldest");
    assert_eq!(plan["removal_count"], 2);
    let names: Vec<&str> = plan["machines"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["worker-c", "worker-b"]);
}

#[test]
fn plan_policy_override() {
    let file = fixture("fleet.toml");
    let out = warp_cull(&[
        "plan",
        "-f",
        file.to_str().unwrap(),
        "--policy",
        "Newest",
        "--now",
        "1700000000",
    ]);
    assert!(out.status.success());

    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.contains("Delete policy: Newest"));
    assert!(text.contains("1. worker-c"));
    assert!(text.contains("2. worker-b"));
}

#[test]
fn plan_rejects_unknown_policy() {
    let file = fixture("fleet.toml");
    let out = warp_cull(&["plan", "-f", file.to_str().unwrap(), "--policy", "Cheapest"]);

    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Cheapest"));
}

#[test]
fn health_reports_budget() {
    let file = fixture("fleet.toml");
    let out = warp_cull(&["health", "-f", file.to_str().unwrap(), "--format", "json"]);
    assert!(out.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(summary["expected_machines"], 4);
    assert_eq!(summary["current_healthy"], 3);
    assert_eq!(summary["remediations_allowed"], 1);
    assert_eq!(summary["unhealthy"][0], "worker-b");
}
