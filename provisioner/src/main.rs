//! SDC Provisioner - Entry Point
//!
//! Creates an SDC deployment on a Kubernetes environment of the control
//! plane, attaches the local engine configuration and custom manifest, and
//! optionally starts it.

use clap::Parser;
use tracing::{error, info};

use sdc_provisioner::app::options::AppOptions;
use sdc_provisioner::app::run::run;
use sdc_provisioner::logs::init_logging;
use sdc_provisioner::storage::settings::EnvVars;

#[tokio::main]
async fn main() {
    let options = AppOptions::parse();

    if let Err(e) = init_logging(options.log_options()) {
        eprintln!("Failed to initialize logging: {e}");
    }

    match run(&options, &EnvVars::from_process()).await {
        Ok(outcome) => {
            if outcome.started {
                info!("Started deployment {}", outcome.deployment.name);
            }
            info!("Done");
        }
        Err(e) => {
            error!("Error: {e}");
            error!("Exiting");
            std::process::exit(e.exit_code());
        }
    }
}
