//! Local files shipped with a deployment

use tracing::info;

use crate::errors::ProvisionError;
use crate::storage::layout::ConfigLayout;
use crate::storage::settings::ProvisionConfig;

/// Contents of the `etc/` engine configuration files and the manifest
/// template, read before anything is sent to the control plane
#[derive(Debug, Clone, Default)]
pub struct LocalAssets {
    pub sdc_properties: String,
    pub credential_stores: String,
    pub security_policy: String,
    pub log4j2: String,
    pub proxy_properties: Option<String>,
    pub manifest_template: String,
}

impl LocalAssets {
    /// Read every file; a missing required file fails the run
    pub async fn load(
        layout: &ConfigLayout,
        config: &ProvisionConfig,
    ) -> Result<Self, ProvisionError> {
        info!("Loading sdc.properties");
        let sdc_properties = layout.sdc_properties_file().read_string().await?;

        info!("Loading credential-stores.properties");
        let credential_stores = layout.credential_stores_file().read_string().await?;

        info!("Loading security.policy");
        let security_policy = layout.security_policy_file().read_string().await?;

        info!("Loading sdc-log4j2.properties");
        let log4j2 = layout.log4j2_file().read_string().await?;

        let proxy_file = layout.proxy_properties_file();
        let proxy_properties = proxy_file.read_optional_string().await?;
        if proxy_properties.is_some() {
            info!("Loading proxy.properties");
        }

        let manifest_file = layout.manifest_file(&config.manifest);
        info!("Using yaml template: {}", manifest_file.path().display());
        let manifest_template = manifest_file.read_string().await?;

        Ok(Self {
            sdc_properties,
            credential_stores,
            security_policy,
            log4j2,
            proxy_properties,
            manifest_template,
        })
    }
}
