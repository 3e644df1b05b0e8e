//! Binary tests: exit status and a full run against a mock control plane

mod common;

use std::process::{Command, Output};

use mockito::Matcher;
use serde_json::json;

use common::{write_fixture, PROPERTIES};

fn properties_for(sch_url: &str, skip: Option<&str>) -> String {
    let mut text = String::from("[deployment]\n");
    for (key, value) in PROPERTIES {
        if Some(key) == skip {
            continue;
        }
        let value = if key == "SCH_URL" { sch_url } else { value };
        text.push_str(&format!("{}={}\n", key, value));
    }
    text
}

fn run_provisioner(dir: &std::path::Path, extra_args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sdc-provision"))
        .arg("--base-dir")
        .arg(dir)
        .args(extra_args)
        .env("CRED_ID", "cred-id")
        .env("CRED_TOKEN", "cred-token")
        .env("ENV_NAME", "prod-east")
        .env("DEPLOYMENT_SUFFIX", "sdc2")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[cfg(unix)]
#[test]
fn test_missing_property_exits_before_remote_calls() {
    let mut server = mockito::Server::new();
    let auth = server
        .mock("GET", "/security/rest/v1/currentUser")
        .expect(0)
        .create();

    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path(), &properties_for(&server.url(), Some("LIMITS_CPU")));

    let output = run_provisioner(dir.path(), &[]);

    // -1 surfaces as 255 on Unix
    assert_eq!(output.status.code(), Some(255));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("no value for deployment property key 'LIMITS_CPU'"));
    auth.assert();
}

#[test]
fn test_full_run_saves_manifest() {
    let mut server = mockito::Server::new();
    let deployment = json!({
        "id": "abc123:org-42",
        "name": "prod-east-sdc2",
        "type": "KUBERNETES",
        "envId": "env-1",
        "engineType": "DC",
        "engineVersion": "5.8.0"
    })
    .to_string();

    let auth = server
        .mock("GET", "/security/rest/v1/currentUser")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"principalId": "cred-id@org-42"}"#)
        .create();
    let environments = server
        .mock("GET", "/provisioning/rest/v1/csp/environments")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "data": [{"id": "env-1", "name": "prod-east", "kubernetesNamespace": "streamsets"}],
                "totalCount": 1
            })
            .to_string(),
        )
        .create();
    let add = server
        .mock("POST", "/provisioning/rest/v1/csp/deployments")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(&deployment)
        .create();
    let update = server
        .mock("PUT", "/provisioning/rest/v1/csp/deployment/abc123:org-42")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(&deployment)
        .expect(2)
        .create();
    let start = server
        .mock("POST", "/provisioning/rest/v1/csp/deployment/abc123:org-42/start")
        .match_query(Matcher::Any)
        .expect(0)
        .create();

    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path(), &properties_for(&server.url(), None));
    let manifest_path = dir.path().join("out").join("rendered.yaml");

    let output = run_provisioner(
        dir.path(),
        &["--save-manifest", manifest_path.to_str().unwrap()],
    );

    assert!(
        output.status.success(),
        "stdout: {}",
        String::from_utf8_lossy(&output.stdout)
    );
    auth.assert();
    environments.assert();
    add.assert();
    update.assert();
    start.assert();

    let manifest = std::fs::read_to_string(&manifest_path).unwrap();
    assert!(!manifest.contains("${"));
    assert!(manifest.contains("namespace: streamsets\n"));
    assert!(manifest.contains("deployment: abc123\n"));
}
