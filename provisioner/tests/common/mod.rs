//! Shared test fixtures

#![allow(dead_code)]

use std::path::Path;

use sdc_provisioner::storage::properties::DeploymentProperties;
use sdc_provisioner::storage::settings::{EnvVars, ProvisionConfig};

pub const PROPERTIES: [(&str, &str); 19] = [
    ("SCH_URL", "https://cp.example.com"),
    ("ORG_ID", "org-42"),
    ("ENVIRONMENT_NAME", "prod-east"),
    ("LOAD_BALANCER_HOSTNAME", "sdc.example.com"),
    ("SDC_DEPLOYMENT_MANIFEST", "yaml/sdc.yaml"),
    ("SDC_VERSION", "5.8.0"),
    ("DEPLOYMENT_TAGS", "k8s,prod"),
    ("USER_STAGE_LIBS", "jdbc,aws"),
    ("ENGINE_LABELS", "east,k8s"),
    ("SDC_MAX_CPU_LOAD", "80.0"),
    ("SDC_MAX_MEMORY_USED", "70.0"),
    ("SDC_MAX_PIPELINES_RUNNING", "10"),
    ("SDC_JAVA_MIN_HEAP_MB", "2048"),
    ("SDC_JAVA_MAX_HEAP_MB", "4096"),
    ("SDC_JAVA_OPTS", "-XX:+UseG1GC"),
    ("REQUESTS_MEMORY", "3Gi"),
    ("LIMITS_MEMORY", "5Gi"),
    ("REQUESTS_CPU", "1000m"),
    ("LIMITS_CPU", "3000m"),
];

pub const MANIFEST: &str = "\
apiVersion: apps/v1
kind: Deployment
metadata:
  name: sdc-${DEPLOYMENT_SUFFIX}
  namespace: ${NAMESPACE}
  labels:
    deployment: ${DEP_ID}
spec:
  template:
    spec:
      containers:
      - name: sdc
        image: streamsets/datacollector:${SDC_VERSION}
        env:
        - name: STREAMSETS_DEPLOYMENT_SCH_URL
          value: ${SCH_URL}
        - name: STREAMSETS_DEPLOYMENT_ID
          value: ${DEP_ID}:${ORG_ID}
        - name: SDC_BASE_HTTP_URL
          value: https://${LOAD_BALANCER_HOSTNAME}/${DEPLOYMENT_SUFFIX}
        resources:
          requests:
            memory: ${REQUESTS_MEMORY}
            cpu: ${REQUESTS_CPU}
          limits:
            memory: ${LIMITS_MEMORY}
            cpu: ${LIMITS_CPU}
";

pub const SDC_PROPERTIES: &str = "\
sdc.base.http.url=${SDC_BASE_HTTP_URL}
http.realm.file.permission.check=true
https.keystore.password=${file(\"keystore-password.txt\")}
";

/// Properties file text, optionally leaving out one key
pub fn properties_text(skip: Option<&str>) -> String {
    let mut text = String::from("[deployment]\n");
    for (key, value) in PROPERTIES {
        if Some(key) != skip {
            text.push_str(&format!("{}={}\n", key, value));
        }
    }
    text
}

pub fn env_vars() -> EnvVars {
    EnvVars::from_pairs([
        ("CRED_ID", "cred-id"),
        ("CRED_TOKEN", "cred-token"),
        ("ENV_NAME", "prod-east"),
        ("DEPLOYMENT_SUFFIX", "sdc2"),
    ])
}

pub fn config() -> ProvisionConfig {
    let props = DeploymentProperties::parse(&properties_text(None)).unwrap();
    ProvisionConfig::resolve(&env_vars(), &props).unwrap()
}

/// Write a complete provisioning directory
pub fn write_fixture(dir: &Path, properties: &str) {
    std::fs::write(dir.join("deployment.properties"), properties).unwrap();

    let etc = dir.join("etc");
    std::fs::create_dir_all(&etc).unwrap();
    std::fs::write(etc.join("sdc.properties"), SDC_PROPERTIES).unwrap();
    std::fs::write(etc.join("credential-stores.properties"), "credentialStores=\n").unwrap();
    std::fs::write(etc.join("security.policy"), "grant { permission java.security.AllPermission; };\n").unwrap();
    std::fs::write(etc.join("sdc-log4j2.properties"), "rootLogger.level=INFO\n").unwrap();

    let yaml = dir.join("yaml");
    std::fs::create_dir_all(&yaml).unwrap();
    std::fs::write(yaml.join("sdc.yaml"), MANIFEST).unwrap();
}
