//! Resolved provisioning configuration

use std::collections::HashMap;
use std::path::PathBuf;

use secrecy::SecretString;
use tracing::warn;

use crate::errors::{MissingConfiguration, ProvisionError};
use crate::storage::properties::DeploymentProperties;
use crate::utils::split_list;

pub const ENV_CRED_ID: &str = "CRED_ID";
pub const ENV_CRED_TOKEN: &str = "CRED_TOKEN";
pub const ENV_ENV_NAME: &str = "ENV_NAME";
pub const ENV_DEPLOYMENT_SUFFIX: &str = "DEPLOYMENT_SUFFIX";

/// Snapshot of the environment variables the provisioner reads
#[derive(Debug, Clone, Default)]
pub struct EnvVars {
    values: HashMap<String, String>,
}

impl EnvVars {
    /// Capture the process environment
    pub fn from_process() -> Self {
        let values = [ENV_CRED_ID, ENV_CRED_TOKEN, ENV_ENV_NAME, ENV_DEPLOYMENT_SUFFIX]
            .into_iter()
            .filter_map(|key| std::env::var(key).ok().map(|value| (key.to_string(), value)))
            .collect();
        Self { values }
    }

    /// Build from explicit pairs
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a required variable; absent or empty values are an error
    pub fn require(&self, key: &str) -> Result<&str, MissingConfiguration> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| MissingConfiguration::EnvVar(key.to_string()))
    }
}

/// Control-plane API credential pair
#[derive(Debug)]
pub struct Credentials {
    pub credential_id: String,
    pub token: SecretString,
}

/// Engine resource ceilings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineLimits {
    pub max_cpu_load: String,
    pub max_memory_used: String,
    pub max_pipelines_running: String,
}

/// Engine JVM settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaSettings {
    pub min_heap_mb: String,
    pub max_heap_mb: String,
    pub java_opts: String,
}

/// Kubernetes pod resource requests and limits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodResources {
    pub requests_memory: String,
    pub limits_memory: String,
    pub requests_cpu: String,
    pub limits_cpu: String,
}

/// Everything one provisioning run needs, resolved once at start-up
#[derive(Debug)]
pub struct ProvisionConfig {
    pub credentials: Credentials,

    /// Environment the deployment is placed into
    pub environment_name: String,

    pub deployment_suffix: String,

    /// Control-plane base URL
    pub sch_url: String,

    pub org_id: String,

    pub load_balancer_hostname: String,

    /// Manifest template path as written in the properties file
    pub manifest: PathBuf,

    pub sdc_version: String,

    pub deployment_tags: Vec<String>,

    pub user_stage_libs: Vec<String>,

    pub engine_labels: Vec<String>,

    pub engine_limits: EngineLimits,

    pub java: JavaSettings,

    pub resources: PodResources,
}

impl ProvisionConfig {
    /// Resolve the configuration from environment variables and properties
    ///
    /// Fails on the first required value that is absent or empty.
    pub fn resolve(env: &EnvVars, props: &DeploymentProperties) -> Result<Self, ProvisionError> {
        let credentials = Credentials {
            credential_id: env.require(ENV_CRED_ID)?.to_string(),
            token: SecretString::from(env.require(ENV_CRED_TOKEN)?.to_string()),
        };
        let env_name = env.require(ENV_ENV_NAME)?.to_string();
        let deployment_suffix = env.require(ENV_DEPLOYMENT_SUFFIX)?.to_string();

        props.check_required()?;
        let prop = |key: &str| -> Result<String, MissingConfiguration> {
            props.require(key).map(str::to_string)
        };

        let environment_name = prop("ENVIRONMENT_NAME")?;
        if environment_name != env_name {
            warn!(
                "{} '{}' differs from ENVIRONMENT_NAME '{}'; using ENVIRONMENT_NAME",
                ENV_ENV_NAME, env_name, environment_name
            );
        }

        Ok(Self {
            credentials,
            environment_name,
            deployment_suffix,
            sch_url: prop("SCH_URL")?,
            org_id: prop("ORG_ID")?,
            load_balancer_hostname: prop("LOAD_BALANCER_HOSTNAME")?,
            manifest: PathBuf::from(prop("SDC_DEPLOYMENT_MANIFEST")?),
            sdc_version: prop("SDC_VERSION")?,
            deployment_tags: split_list(&prop("DEPLOYMENT_TAGS")?),
            user_stage_libs: split_list(&prop("USER_STAGE_LIBS")?),
            engine_labels: split_list(&prop("ENGINE_LABELS")?),
            engine_limits: EngineLimits {
                max_cpu_load: prop("SDC_MAX_CPU_LOAD")?,
                max_memory_used: prop("SDC_MAX_MEMORY_USED")?,
                max_pipelines_running: prop("SDC_MAX_PIPELINES_RUNNING")?,
            },
            java: JavaSettings {
                min_heap_mb: prop("SDC_JAVA_MIN_HEAP_MB")?,
                max_heap_mb: prop("SDC_JAVA_MAX_HEAP_MB")?,
                java_opts: prop("SDC_JAVA_OPTS")?,
            },
            resources: PodResources {
                requests_memory: prop("REQUESTS_MEMORY")?,
                limits_memory: prop("LIMITS_MEMORY")?,
                requests_cpu: prop("REQUESTS_CPU")?,
                limits_cpu: prop("LIMITS_CPU")?,
            },
        })
    }

    /// `<environment>-<suffix>`
    pub fn deployment_name(&self) -> String {
        format!("{}-{}", self.environment_name, self.deployment_suffix)
    }

    /// Public base URL of the engine behind the load balancer
    pub fn engine_base_url(&self) -> String {
        format!(
            "https://{}/{}/",
            self.load_balancer_hostname, self.deployment_suffix
        )
    }
}
