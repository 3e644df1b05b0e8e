//! API models

use serde::{Deserialize, Serialize};

/// Deployment type for engines running on a Kubernetes environment
pub const DEPLOYMENT_TYPE_KUBERNETES: &str = "KUBERNETES";

/// Engine type of a Data Collector
pub const ENGINE_TYPE_DATA_COLLECTOR: &str = "DC";

/// Authenticated principal returned by the security service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    #[serde(default)]
    pub principal_id: String,
    #[serde(default)]
    pub principal_type: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
}

/// One page of a paged listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub len: u32,
    #[serde(default)]
    pub total_count: u32,
}

/// Environment a deployment is placed into
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub id: String,
    pub name: String,

    /// Environment type, e.g. `KUBERNETES`
    #[serde(default, rename = "type")]
    pub environment_type: Option<String>,

    /// Namespace the Kubernetes agent manages
    #[serde(default)]
    pub kubernetes_namespace: Option<String>,

    #[serde(default)]
    pub state: Option<String>,
}

/// A deployment record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    /// Assigned by the service when the deployment is added
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: String,

    #[serde(rename = "type")]
    pub deployment_type: String,

    pub env_id: String,

    pub engine_type: String,

    pub engine_version: String,

    #[serde(default)]
    pub raw_deployment_tags: Vec<String>,

    #[serde(default)]
    pub engine_configuration: EngineConfiguration,

    /// Lets a custom YAML manifest replace the generated Kubernetes resources
    #[serde(default)]
    pub advanced_mode: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaml: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_instances: Option<u32>,
}

impl Deployment {
    /// Enable or disable advanced mode
    pub fn set_advanced_mode(&mut self, enabled: bool) {
        self.advanced_mode = enabled;
    }

    /// Identifier prefix before the first colon
    ///
    /// Identifiers look like `<uuid>:<org>`. Returns `None` when the
    /// deployment has no identifier yet or the identifier has no colon.
    pub fn short_id(&self) -> Option<&str> {
        self.id
            .as_deref()
            .and_then(|id| id.split_once(':'))
            .map(|(prefix, _)| prefix)
    }
}

/// Engine configuration attached to a deployment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfiguration {
    #[serde(default)]
    pub engine_version: String,

    #[serde(default)]
    pub engine_type: String,

    #[serde(default)]
    pub stage_libs: Vec<String>,

    #[serde(default)]
    pub labels: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_cpu_load: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_memory_used: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pipelines_running: Option<String>,

    #[serde(default)]
    pub jvm_config: JavaConfiguration,

    #[serde(default)]
    pub advanced_configuration: AdvancedConfiguration,
}

/// How the engine JVM heap is sized
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JavaMemoryStrategy {
    #[default]
    Percentage,
    Absolute,
}

/// Java settings of the engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JavaConfiguration {
    #[serde(default)]
    pub memory_config_strategy: JavaMemoryStrategy,

    /// Minimum heap in MB
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jvm_min_memory: Option<String>,

    /// Maximum heap in MB
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jvm_max_memory: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_jvm_opts: Option<String>,
}

/// Raw configuration file contents shipped to the engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedConfiguration {
    /// `sdc.properties`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_collector_configuration: Option<String>,

    /// `credential-stores.properties`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_stores: Option<String>,

    /// `security.policy`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_policy: Option<String>,

    /// `sdc-log4j2.properties`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log4j2: Option<String>,

    /// `proxy.properties`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_properties: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id() {
        let deployment = Deployment {
            id: Some("abc123:DEPLOYMENT".to_string()),
            ..Default::default()
        };
        assert_eq!(deployment.short_id(), Some("abc123"));

        let deployment = Deployment {
            id: Some("a:b:c".to_string()),
            ..Default::default()
        };
        assert_eq!(deployment.short_id(), Some("a"));
    }

    #[test]
    fn test_short_id_without_colon() {
        let deployment = Deployment {
            id: Some("abc123".to_string()),
            ..Default::default()
        };
        assert_eq!(deployment.short_id(), None);
        assert_eq!(Deployment::default().short_id(), None);
    }
}
