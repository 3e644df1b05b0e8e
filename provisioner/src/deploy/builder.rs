//! Deployment record construction

use platform_api::models::{
    AdvancedConfiguration, Deployment, EngineConfiguration, Environment, JavaConfiguration,
    JavaMemoryStrategy, DEPLOYMENT_TYPE_KUBERNETES, ENGINE_TYPE_DATA_COLLECTOR,
};

use crate::deploy::assets::LocalAssets;
use crate::errors::ProvisionError;
use crate::storage::settings::ProvisionConfig;
use crate::template::{self, TemplateValues, Unresolved};
use crate::utils::extend_unique;

/// Stage libraries every engine gets, ahead of user libraries
pub const BASELINE_STAGE_LIBS: [&str; 3] = ["dataformats", "dev", "basic"];

/// Token in `sdc.properties` replaced by the engine's public URL
pub const SDC_BASE_HTTP_URL_TOKEN: &str = "SDC_BASE_HTTP_URL";

/// Builds the initial deployment record from the resolved configuration
#[derive(Debug, Clone, Copy)]
pub struct DeploymentBuilder<'a> {
    config: &'a ProvisionConfig,
}

impl<'a> DeploymentBuilder<'a> {
    pub fn new(config: &'a ProvisionConfig) -> Self {
        Self { config }
    }

    /// Build an unregistered deployment placed into `environment`
    ///
    /// The engine is labelled with the deployment name by default.
    pub fn build(&self, environment: &Environment) -> Deployment {
        let name = self.config.deployment_name();

        Deployment {
            id: None,
            name: name.clone(),
            deployment_type: DEPLOYMENT_TYPE_KUBERNETES.to_string(),
            env_id: environment.id.clone(),
            engine_type: ENGINE_TYPE_DATA_COLLECTOR.to_string(),
            engine_version: self.config.sdc_version.clone(),
            raw_deployment_tags: self.config.deployment_tags.clone(),
            engine_configuration: EngineConfiguration {
                engine_version: self.config.sdc_version.clone(),
                engine_type: ENGINE_TYPE_DATA_COLLECTOR.to_string(),
                labels: vec![name],
                ..Default::default()
            },
            advanced_mode: false,
            yaml: None,
            desired_instances: Some(1),
        }
    }
}

/// Baseline stage libraries followed by `user_libs`, without duplicates
pub fn stage_libs(user_libs: &[String]) -> Vec<String> {
    let mut libs: Vec<String> = BASELINE_STAGE_LIBS.iter().map(|s| s.to_string()).collect();
    extend_unique(&mut libs, user_libs);
    libs
}

/// Apply stage libraries, labels, resource ceilings and Java settings
pub fn configure_engine(deployment: &mut Deployment, config: &ProvisionConfig) {
    let engine = &mut deployment.engine_configuration;

    engine.stage_libs = stage_libs(&config.user_stage_libs);
    extend_unique(&mut engine.labels, &config.engine_labels);

    engine.max_cpu_load = Some(config.engine_limits.max_cpu_load.clone());
    engine.max_memory_used = Some(config.engine_limits.max_memory_used.clone());
    engine.max_pipelines_running = Some(config.engine_limits.max_pipelines_running.clone());

    engine.jvm_config = JavaConfiguration {
        memory_config_strategy: JavaMemoryStrategy::Absolute,
        jvm_min_memory: Some(config.java.min_heap_mb.clone()),
        jvm_max_memory: Some(config.java.max_heap_mb.clone()),
        extra_jvm_opts: Some(config.java.java_opts.clone()),
    };
}

/// Attach the raw engine configuration files
///
/// `${SDC_BASE_HTTP_URL}` in `sdc.properties` becomes the engine's public URL;
/// other `${...}` expressions in that file belong to the engine and are kept.
pub fn attach_advanced_configuration(
    deployment: &mut Deployment,
    assets: &LocalAssets,
    config: &ProvisionConfig,
) -> Result<(), ProvisionError> {
    let values = TemplateValues::new().with(SDC_BASE_HTTP_URL_TOKEN, config.engine_base_url());
    let sdc_properties = template::render(&assets.sdc_properties, &values, Unresolved::Keep)?;

    deployment.engine_configuration.advanced_configuration = AdvancedConfiguration {
        data_collector_configuration: Some(sdc_properties),
        credential_stores: Some(assets.credential_stores.clone()),
        security_policy: Some(assets.security_policy.clone()),
        log4j2: Some(assets.log4j2.clone()),
        proxy_properties: assets.proxy_properties.clone(),
    };
    Ok(())
}
