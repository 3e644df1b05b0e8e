//! Command-line options

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::deploy::orchestrator::ProvisionOptions;
use crate::http::client::DEFAULT_TIMEOUT;
use crate::logs::{LogLevel, LogOptions};
use crate::storage::layout::ConfigLayout;
use crate::utils::LONG_VERSION;

/// Create (and optionally start) an SDC Kubernetes deployment
///
/// Reads `CRED_ID`, `CRED_TOKEN`, `ENV_NAME` and `DEPLOYMENT_SUFFIX` from the
/// environment and the `[deployment]` section of `deployment.properties`.
#[derive(Debug, Clone, Parser)]
#[command(name = "sdc-provision", version, long_version = LONG_VERSION)]
pub struct AppOptions {
    /// Directory holding deployment.properties, etc/ and the manifest
    #[arg(long, default_value = ".")]
    pub base_dir: PathBuf,

    /// Properties file, relative to the base directory
    #[arg(long)]
    pub properties: Option<PathBuf>,

    /// Start the deployment after it has been created
    #[arg(long)]
    pub start: bool,

    /// Also write the rendered manifest to this path
    #[arg(long, value_name = "PATH")]
    pub save_manifest: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    /// Control-plane request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,
}

impl AppOptions {
    pub fn layout(&self) -> ConfigLayout {
        let layout = ConfigLayout::new(&self.base_dir);
        match &self.properties {
            Some(path) => layout.with_properties_file(path),
            None => layout,
        }
    }

    pub fn log_options(&self) -> LogOptions {
        LogOptions {
            log_level: self.log_level.clone(),
            json_format: self.json_logs,
        }
    }

    pub fn provision_options(&self) -> ProvisionOptions {
        ProvisionOptions { start: self.start }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
