//! CLI behaviour that needs no provisioning registry.

use crate::support::harness::{stderr, stdout, TestHarness};

#[test]
fn test_version() {
    let harness = TestHarness::new();
    let output = harness.run(&["version"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains(&format!("stackgate {}", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn test_validate_network_needs_no_registry() {
    let harness = TestHarness::new();
    let output = harness.run(&["validate", "--mode", "network"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("no prerequisites"));
}

#[test]
fn test_validate_all_ignores_tenant() {
    let harness = TestHarness::new();
    let output = harness.run(&["validate", "--mode", "all", "--tenant", "alice,bob"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
}

#[test]
fn test_validate_unknown_mode_lists_valid_values() {
    let harness = TestHarness::new();
    let output = harness.run(&["validate", "--mode", "bogus"]);

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("Invalid DEPLOY_MODE: \"bogus\""), "stderr: {}", err);
    assert!(err.contains("Valid values: \"network\", \"legacy\", \"ai\", \"all\""));
}

#[test]
fn test_mode_from_environment() {
    let harness = TestHarness::new()
        .with_env("DEPLOY_MODE", "ai")
        .with_env("PARTICIPANT_PREFIX", "alice,bob");
    let output = harness.run(&["validate"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid PARTICIPANT_PREFIX"));
}

#[test]
fn test_quiet_suppresses_success_output() {
    let harness = TestHarness::new();
    let output = harness.run(&["validate", "--mode", "network", "--quiet"]);

    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_plan_orders_dependencies_first() {
    let harness = TestHarness::new();
    let output = harness.run(&["plan", "--mode", "all", "--tenant", "alice,bob", "--json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["mode"], "all");
    assert_eq!(plan["prerequisites"].as_array().unwrap().len(), 0);

    let names: Vec<&str> = plan["units"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 1 + 2 + 2 * 5);

    let pos = |name: &str| names.iter().position(|n| *n == name).unwrap();
    assert_eq!(pos("PulsoSaludNetworkStack"), 0);
    assert!(pos("alice-MedicalReportsLegacyStack") < pos("alice-AIExtractionStack"));
    assert!(pos("bob-MedicalReportsLegacyStack") < pos("bob-AIEmailStack"));
    assert!(pos("alice-AIRAGStack") < pos("alice-AIClassificationStack"));
    assert!(pos("bob-AIRAGStack") < pos("bob-AISummaryStack"));

    assert_eq!(plan["region"], "us-east-2");
    let classification = &plan["units"][pos("alice-AIClassificationStack")]["dependsOn"];
    let deps: Vec<&str> = classification
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d.as_str().unwrap())
        .collect();
    assert!(deps.contains(&"alice-MedicalReportsLegacyStack"));
    assert!(deps.contains(&"alice-AIRAGStack"));
}

#[test]
fn test_plan_ai_lists_base_unit_as_prerequisite() {
    let harness = TestHarness::new();
    let output = harness.run(&["plan", "--mode", "ai", "--tenant", "acme"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("acme-AIRAGStack"));
    assert!(out.contains("Must already be deployed:"));
    assert!(out.contains("acme-MedicalReportsLegacyStack"));
}

#[test]
fn test_cdk_json_context_is_read() {
    let harness = TestHarness::new().with_cdk_json(
        r#"{
            "app": "npx ts-node --prefer-ts-exts bin/app.ts",
            "context": { "deployMode": "legacy", "participantPrefix": "clinic-a,clinic-b" }
        }"#,
    );
    let output = harness.run(&["plan", "--json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["mode"], "legacy");
    assert_eq!(plan["tenants"], serde_json::json!(["clinic-a", "clinic-b"]));
    assert_eq!(plan["prerequisites"], serde_json::json!(["PulsoSaludNetworkStack"]));
}

#[test]
fn test_context_flag_beats_cdk_json() {
    let harness = TestHarness::new().with_cdk_json(r#"{"context": {"deployMode": "legacy"}}"#);
    let output = harness.run(&["plan", "--json", "-c", "deployMode=network"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["mode"], "network");
}

#[test]
fn test_malformed_cdk_json_fails() {
    let harness = TestHarness::new().with_cdk_json("{ not json");
    let output = harness.run(&["plan"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to parse"));
}

#[test]
fn test_completion_bash() {
    let harness = TestHarness::new();
    let output = harness.run(&["completion", "bash"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("stackgate"));
}
