//! Prerequisite validation against a fake AWS CLI.
#![cfg(unix)]

use crate::support::harness::{stderr, stdout, FakeRegistry, TestHarness};

const NETWORK: &str = "PulsoSaludNetworkStack";

fn network_exports() -> Vec<String> {
    ["VpcId", "PrivateSubnetIds", "IsolatedSubnetIds"]
        .iter()
        .map(|s| format!("{}-{}", NETWORK, s))
        .collect()
}

fn tenant_exports(tenant: &str) -> Vec<String> {
    [
        "BucketName",
        "VpcId",
        "PrivateSubnetIds",
        "DbSecretArn",
        "DbClusterArn",
    ]
    .iter()
    .map(|s| format!("{}-{}", tenant, s))
    .collect()
}

#[test]
fn test_legacy_passes_when_network_is_complete() {
    let registry = FakeRegistry::new()
        .unit(NETWORK, "CREATE_COMPLETE")
        .exports(&network_exports());
    let harness = TestHarness::new().with_registry(&registry);

    let output = harness.run(&[
        "validate", "--mode", "legacy", "--tenant", "acme", "--region", "eu-west-1",
    ]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains(NETWORK));

    let calls = harness.aws_calls();
    assert!(calls[0].starts_with("cloudformation describe-stacks --stack-name PulsoSaludNetworkStack"));
    assert!(calls.iter().all(|c| c.contains("--region eu-west-1")));
}

#[test]
fn test_legacy_fails_when_network_is_missing() {
    let harness = TestHarness::new().with_registry(&FakeRegistry::new());

    let output = harness.run(&["validate", "--mode", "legacy", "--tenant", "acme"]);

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("PulsoSaludNetworkStack not found"), "stderr: {}", err);
    assert!(err.contains("$env:DEPLOY_MODE = \"network\"; cdk deploy PulsoSaludNetworkStack"));
    assert!(err.contains("export DEPLOY_MODE=network && cdk deploy PulsoSaludNetworkStack"));

    // Exports of a missing unit are never listed
    assert_eq!(harness.aws_calls().len(), 1);
}

#[test]
fn test_ai_fails_when_base_unit_rolled_back() {
    let registry = FakeRegistry::new()
        .unit("acme-MedicalReportsLegacyStack", "ROLLBACK_COMPLETE")
        .exports(&tenant_exports("acme"));
    let harness = TestHarness::new().with_registry(&registry);

    let output = harness.run(&["validate", "--mode", "ai", "--tenant", "acme"]);

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("acme-MedicalReportsLegacyStack not found"), "stderr: {}", err);
    assert!(err.contains("PARTICIPANT_PREFIX=acme"));
}

#[test]
fn test_ai_reports_first_missing_export() {
    let registry = FakeRegistry::new()
        .unit("acme-MedicalReportsLegacyStack", "UPDATE_COMPLETE")
        .export("acme-BucketName")
        .export("acme-VpcId")
        .export("acme-PrivateSubnetIds");
    let harness = TestHarness::new().with_registry(&registry);

    let output = harness.run(&["validate", "--mode", "ai", "--tenant", "acme"]);

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("Export \"acme-DbSecretArn\" not found"), "stderr: {}", err);
    assert!(!err.contains("acme-DbClusterArn"));
}

#[test]
fn test_ai_passes_when_base_unit_is_complete() {
    let registry = FakeRegistry::new()
        .unit("acme-MedicalReportsLegacyStack", "UPDATE_COMPLETE")
        .exports(&tenant_exports("acme"));
    let harness = TestHarness::new().with_registry(&registry);

    let output = harness.run(&["validate", "--mode", "ai", "--tenant", "acme"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
}

#[test]
fn test_unreachable_registry_is_not_reported_as_missing() {
    let registry = FakeRegistry::new().failing("Unable to locate credentials");
    let harness = TestHarness::new().with_registry(&registry);

    let output = harness.run(&["validate", "--mode", "legacy", "--tenant", "acme"]);

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("Could not check PulsoSaludNetworkStack"), "stderr: {}", err);
    assert!(err.contains("Unable to locate credentials"));
    assert!(!err.contains("not found"));
}

#[test]
fn test_missing_aws_cli_is_a_transport_failure() {
    let harness = TestHarness::new();

    let output = harness.run(&["validate", "--mode", "legacy"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Could not check PulsoSaludNetworkStack"));
}

#[test]
fn test_status_shows_every_unit() {
    let registry = FakeRegistry::new()
        .unit("acme-MedicalReportsLegacyStack", "UPDATE_COMPLETE")
        .unit("acme-AIRAGStack", "CREATE_IN_PROGRESS");
    let harness = TestHarness::new().with_registry(&registry);

    let output = harness.run(&["status", "--mode", "ai", "--tenant", "acme"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("acme-MedicalReportsLegacyStack"));
    assert!(out.contains("(prerequisite)"));
    assert!(out.contains("CREATE_IN_PROGRESS"));
    assert!(out.contains("NOT_FOUND"));
    assert_eq!(harness.aws_calls().len(), 6);
}

#[test]
fn test_status_fails_when_registry_unreachable() {
    let registry = FakeRegistry::new().failing("Unable to locate credentials");
    let harness = TestHarness::new().with_registry(&registry);

    let output = harness.run(&["status", "--mode", "ai", "--tenant", "acme"]);

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    let failed_rows = out.lines().filter(|l| l.contains('✗')).count();
    assert_eq!(failed_rows, 6, "stdout: {}", out);
    assert!(out.contains("Unable to locate credentials"));
    assert!(!out.contains("NOT_FOUND"));
    assert!(stderr(&output).contains("6 of 6 units could not be checked in region us-east-2"));
}
