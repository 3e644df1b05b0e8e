//! Deployment provisioning sequence

use platform_api::models::Deployment;
use tracing::{error, info};

use crate::deploy::assets::LocalAssets;
use crate::deploy::builder::{attach_advanced_configuration, configure_engine, DeploymentBuilder};
use crate::errors::ProvisionError;
use crate::http::control_plane::ControlPlane;
use crate::storage::settings::ProvisionConfig;
use crate::template::{self, TemplateValues, Unresolved};

/// Provisioning run options
#[derive(Debug, Clone, Default)]
pub struct ProvisionOptions {
    /// Start the deployment once it is fully defined
    pub start: bool,
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct ProvisionOutcome {
    /// Deployment as last returned by the control plane
    pub deployment: Deployment,

    /// Namespace of the target environment
    pub namespace: String,

    /// Rendered manifest assigned to the deployment
    pub manifest: String,

    pub started: bool,
}

/// Placeholders the manifest template may use
pub const MANIFEST_TOKENS: [&str; 11] = [
    "DEP_ID",
    "NAMESPACE",
    "SDC_VERSION",
    "ORG_ID",
    "SCH_URL",
    "REQUESTS_MEMORY",
    "LIMITS_MEMORY",
    "REQUESTS_CPU",
    "LIMITS_CPU",
    "DEPLOYMENT_SUFFIX",
    "LOAD_BALANCER_HOSTNAME",
];

/// Reject a manifest template using placeholders that will never be resolved
pub fn check_manifest_tokens(manifest_template: &str) -> Result<(), ProvisionError> {
    let unknown: Vec<String> = template::placeholders(manifest_template)
        .into_iter()
        .filter(|name| !MANIFEST_TOKENS.contains(name))
        .map(str::to_string)
        .collect();
    if unknown.is_empty() {
        Ok(())
    } else {
        Err(ProvisionError::UnresolvedPlaceholders(unknown))
    }
}

/// Values for the manifest template placeholders
pub fn manifest_values(
    config: &ProvisionConfig,
    namespace: &str,
    short_deployment_id: &str,
) -> TemplateValues {
    TemplateValues::new()
        .with("DEP_ID", short_deployment_id)
        .with("NAMESPACE", namespace)
        .with("SDC_VERSION", config.sdc_version.as_str())
        .with("ORG_ID", config.org_id.as_str())
        .with("SCH_URL", config.sch_url.as_str())
        .with("REQUESTS_MEMORY", config.resources.requests_memory.as_str())
        .with("LIMITS_MEMORY", config.resources.limits_memory.as_str())
        .with("REQUESTS_CPU", config.resources.requests_cpu.as_str())
        .with("LIMITS_CPU", config.resources.limits_cpu.as_str())
        .with("DEPLOYMENT_SUFFIX", config.deployment_suffix.as_str())
        .with("LOAD_BALANCER_HOSTNAME", config.load_balancer_hostname.as_str())
}

/// Drives one deployment from creation to (optionally) start
pub struct Provisioner<'a, C: ControlPlane + ?Sized> {
    client: &'a C,
    config: &'a ProvisionConfig,
    assets: &'a LocalAssets,
}

impl<'a, C: ControlPlane + ?Sized> Provisioner<'a, C> {
    pub fn new(client: &'a C, config: &'a ProvisionConfig, assets: &'a LocalAssets) -> Self {
        Self {
            client,
            config,
            assets,
        }
    }

    /// Create, configure and optionally start the deployment
    ///
    /// Nothing is rolled back on failure: once the deployment has been added,
    /// a later error leaves it on the control plane in whatever state the
    /// last successful update produced.
    pub async fn provision(
        &self,
        options: &ProvisionOptions,
    ) -> Result<ProvisionOutcome, ProvisionError> {
        // Fail on template typos before anything exists remotely
        check_manifest_tokens(&self.assets.manifest_template)?;

        info!("Connecting to Control Hub");
        let user = self.client.authenticate().await?;
        info!("Authenticated as {}", user.principal_id);

        info!("Getting the environment");
        let environment = self
            .client
            .find_environment(&self.config.environment_name)
            .await?;
        info!("Found environment {}", environment.name);

        // Kubernetes environments carry their namespace
        let namespace = environment.kubernetes_namespace.clone().ok_or_else(|| {
            ProvisionError::NotFound(format!(
                "kubernetes namespace of environment '{}'",
                environment.name
            ))
        })?;
        info!("Using namespace {}", namespace);

        // Register the deployment
        let deployment = DeploymentBuilder::new(self.config).build(&environment);
        info!("Creating deployment {}", deployment.name);
        let deployment = self.client.add_deployment(&deployment).await?;

        let deployment_id = deployment.id.clone().unwrap_or_default();
        self.finalize(deployment, namespace, options)
            .await
            .inspect_err(|e| {
                error!(
                    "Deployment {} was added but not finalized: {}",
                    deployment_id, e
                );
            })
    }

    /// Steps after the deployment exists on the control plane
    async fn finalize(
        &self,
        mut deployment: Deployment,
        namespace: String,
        options: &ProvisionOptions,
    ) -> Result<ProvisionOutcome, ProvisionError> {
        // Engine configuration and etc/ files
        info!(
            "Adding Stage Libs: {}",
            self.config.user_stage_libs.join(",")
        );
        configure_engine(&mut deployment, self.config);
        attach_advanced_configuration(&mut deployment, self.assets, self.config)?;

        info!("Updating deployment configuration");
        let mut deployment = self.client.update_deployment(&deployment).await?;

        // Manifest needs the id assigned by the control plane
        deployment.set_advanced_mode(true);

        let short_id = deployment
            .short_id()
            .ok_or_else(|| {
                ProvisionError::InvalidDeploymentId(deployment.id.clone().unwrap_or_default())
            })?
            .to_string();
        let values = manifest_values(self.config, &namespace, &short_id);
        let manifest = template::render(
            &self.assets.manifest_template,
            &values,
            Unresolved::Reject,
        )?;
        deployment.yaml = Some(manifest.clone());

        info!("Updating deployment manifest");
        let deployment = self.client.update_deployment(&deployment).await?;

        // Start
        let started = if options.start {
            info!("Starting deployment {}", deployment.name);
            self.client.start_deployment(&deployment).await?;
            true
        } else {
            false
        };

        Ok(ProvisionOutcome {
            deployment,
            namespace,
            manifest,
            started,
        })
    }
}
