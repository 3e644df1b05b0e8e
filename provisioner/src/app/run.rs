//! Provisioning run

use tracing::info;

use crate::app::options::AppOptions;
use crate::deploy::assets::LocalAssets;
use crate::deploy::orchestrator::{ProvisionOutcome, Provisioner};
use crate::errors::ProvisionError;
use crate::filesys::file::File;
use crate::http::client::HttpClient;
use crate::storage::properties::DeploymentProperties;
use crate::storage::settings::{EnvVars, ProvisionConfig};

/// Run one provisioning pass
///
/// All local inputs are loaded and checked before the first remote call.
pub async fn run(options: &AppOptions, env: &EnvVars) -> Result<ProvisionOutcome, ProvisionError> {
    let layout = options.layout();

    let properties_file = layout.properties_file();
    info!("Reading {}", properties_file.path().display());
    let properties = DeploymentProperties::load(&properties_file).await?;
    let config = ProvisionConfig::resolve(env, &properties)?;

    let assets = LocalAssets::load(&layout, &config).await?;

    let client = HttpClient::new(
        &config.sch_url,
        &config.credentials,
        options.request_timeout(),
    )?;

    let outcome = Provisioner::new(&client, &config, &assets)
        .provision(&options.provision_options())
        .await?;

    if let Some(path) = &options.save_manifest {
        let file = File::new(path);
        file.write_string(&outcome.manifest).await?;
        info!("Saved rendered manifest to {}", file.path().display());
    }

    Ok(outcome)
}
