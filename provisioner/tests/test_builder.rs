//! Deployment builder tests

mod common;

use platform_api::models::{Environment, JavaMemoryStrategy};
use sdc_provisioner::deploy::assets::LocalAssets;
use sdc_provisioner::deploy::builder::{
    attach_advanced_configuration, configure_engine, stage_libs, DeploymentBuilder,
};
use sdc_provisioner::deploy::orchestrator::{check_manifest_tokens, manifest_values};
use sdc_provisioner::errors::ProvisionError;
use sdc_provisioner::template::{self, Unresolved};

use common::{config, MANIFEST, SDC_PROPERTIES};

fn environment() -> Environment {
    Environment {
        id: "env-1".to_string(),
        name: "prod-east".to_string(),
        kubernetes_namespace: Some("streamsets".to_string()),
        ..Default::default()
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_deployment_name() {
    let config = config();
    assert_eq!(config.deployment_name(), "prod-east-sdc2");
}

#[test]
fn test_build_deployment() {
    let config = config();
    let deployment = DeploymentBuilder::new(&config).build(&environment());

    assert_eq!(deployment.id, None);
    assert_eq!(deployment.name, "prod-east-sdc2");
    assert_eq!(deployment.deployment_type, "KUBERNETES");
    assert_eq!(deployment.env_id, "env-1");
    assert_eq!(deployment.engine_type, "DC");
    assert_eq!(deployment.engine_version, "5.8.0");
    assert_eq!(deployment.raw_deployment_tags, owned(&["k8s", "prod"]));
    assert_eq!(deployment.engine_configuration.labels, owned(&["prod-east-sdc2"]));
    assert!(!deployment.advanced_mode);
    assert!(deployment.yaml.is_none());
}

#[test]
fn test_stage_libs_baseline_first() {
    assert_eq!(
        stage_libs(&owned(&["jdbc", "aws"])),
        owned(&["dataformats", "dev", "basic", "jdbc", "aws"])
    );
    assert_eq!(
        stage_libs(&owned(&["basic", "jdbc", "dataformats", "aws"])),
        owned(&["dataformats", "dev", "basic", "jdbc", "aws"])
    );
    assert_eq!(stage_libs(&[]), owned(&["dataformats", "dev", "basic"]));
}

#[test]
fn test_configure_engine() {
    let config = config();
    let mut deployment = DeploymentBuilder::new(&config).build(&environment());
    configure_engine(&mut deployment, &config);

    let engine = &deployment.engine_configuration;
    assert_eq!(
        engine.stage_libs,
        owned(&["dataformats", "dev", "basic", "jdbc", "aws"])
    );
    assert_eq!(engine.labels, owned(&["prod-east-sdc2", "east", "k8s"]));
    assert_eq!(engine.max_cpu_load.as_deref(), Some("80.0"));
    assert_eq!(engine.max_memory_used.as_deref(), Some("70.0"));
    assert_eq!(engine.max_pipelines_running.as_deref(), Some("10"));
    assert_eq!(engine.jvm_config.memory_config_strategy, JavaMemoryStrategy::Absolute);
    assert_eq!(engine.jvm_config.jvm_min_memory.as_deref(), Some("2048"));
    assert_eq!(engine.jvm_config.jvm_max_memory.as_deref(), Some("4096"));
    assert_eq!(engine.jvm_config.extra_jvm_opts.as_deref(), Some("-XX:+UseG1GC"));
}

#[test]
fn test_attach_advanced_configuration() {
    let config = config();
    let assets = LocalAssets {
        sdc_properties: SDC_PROPERTIES.to_string(),
        credential_stores: "stores".to_string(),
        security_policy: "policy".to_string(),
        log4j2: "log4j2".to_string(),
        proxy_properties: None,
        manifest_template: MANIFEST.to_string(),
    };
    let mut deployment = DeploymentBuilder::new(&config).build(&environment());
    attach_advanced_configuration(&mut deployment, &assets, &config).unwrap();

    let advanced = &deployment.engine_configuration.advanced_configuration;
    let sdc = advanced.data_collector_configuration.as_deref().unwrap();
    assert!(sdc.contains("sdc.base.http.url=https://sdc.example.com/sdc2/\n"));
    assert!(sdc.contains("${file(\"keystore-password.txt\")}"));
    assert_eq!(advanced.credential_stores.as_deref(), Some("stores"));
    assert_eq!(advanced.security_policy.as_deref(), Some("policy"));
    assert_eq!(advanced.log4j2.as_deref(), Some("log4j2"));
    assert_eq!(advanced.proxy_properties, None);
}

#[test]
fn test_render_manifest() {
    let config = config();
    let values = manifest_values(&config, "streamsets", "abc123");
    let rendered = template::render(MANIFEST, &values, Unresolved::Reject).unwrap();

    assert!(!rendered.contains("${"));
    assert!(rendered.contains("namespace: streamsets\n"));
    assert!(rendered.contains("value: abc123:org-42\n"));
    assert!(rendered.contains("image: streamsets/datacollector:5.8.0\n"));
    assert!(rendered.contains("value: https://sdc.example.com/sdc2\n"));

    let again = template::render(&rendered, &values, Unresolved::Reject).unwrap();
    assert_eq!(again, rendered);
}

#[test]
fn test_check_manifest_tokens() {
    assert!(check_manifest_tokens(MANIFEST).is_ok());

    let err = check_manifest_tokens("name: ${DEP_ID}-${CLUSTER}\n").unwrap_err();
    match err {
        ProvisionError::UnresolvedPlaceholders(names) => assert_eq!(names, vec!["CLUSTER"]),
        other => panic!("expected unresolved placeholders, got {:?}", other),
    }
}
