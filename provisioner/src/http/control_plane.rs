//! Control-plane operations used by the provisioner

use async_trait::async_trait;
use platform_api::models::{CurrentUser, Deployment, Environment, Page};
use tracing::debug;

use crate::errors::ProvisionError;
use crate::http::client::HttpClient;

const CURRENT_USER_PATH: &str = "/security/rest/v1/currentUser";
const ENVIRONMENTS_PATH: &str = "/provisioning/rest/v1/csp/environments";
const DEPLOYMENTS_PATH: &str = "/provisioning/rest/v1/csp/deployments";
const DEPLOYMENT_PATH: &str = "/provisioning/rest/v1/csp/deployment";

/// Environments requested per page
const PAGE_LEN: u32 = 50;

/// Control-plane operations, as a trait for testability
#[async_trait]
pub trait ControlPlane: Send + Sync {
    /// Validate the credentials and return the principal they belong to
    async fn authenticate(&self) -> Result<CurrentUser, ProvisionError>;

    /// Find an environment by its name
    async fn find_environment(&self, name: &str) -> Result<Environment, ProvisionError>;

    /// Register a new deployment; the returned copy carries the assigned id
    async fn add_deployment(&self, deployment: &Deployment) -> Result<Deployment, ProvisionError>;

    /// Replace a registered deployment's definition
    async fn update_deployment(&self, deployment: &Deployment)
        -> Result<Deployment, ProvisionError>;

    /// Start a registered deployment
    async fn start_deployment(&self, deployment: &Deployment) -> Result<(), ProvisionError>;
}

fn deployment_id(deployment: &Deployment) -> Result<&str, ProvisionError> {
    deployment.id.as_deref().ok_or_else(|| {
        ProvisionError::InvalidDeploymentId(format!(
            "deployment '{}' has not been added yet",
            deployment.name
        ))
    })
}

#[async_trait]
impl ControlPlane for HttpClient {
    async fn authenticate(&self) -> Result<CurrentUser, ProvisionError> {
        self.get(CURRENT_USER_PATH, &[]).await
    }

    async fn find_environment(&self, name: &str) -> Result<Environment, ProvisionError> {
        let mut offset: u32 = 0;
        loop {
            let query = [("offset", offset.to_string()), ("len", PAGE_LEN.to_string())];
            let page: Page<Environment> = self.get(ENVIRONMENTS_PATH, &query).await?;
            debug!(
                "Fetched {} environments at offset {} of {}",
                page.data.len(),
                offset,
                page.total_count
            );

            let fetched = page.data.len() as u32;
            if let Some(environment) = page.data.into_iter().find(|env| env.name == name) {
                return Ok(environment);
            }

            offset += fetched;
            if fetched == 0 || offset >= page.total_count {
                return Err(ProvisionError::NotFound(format!("environment '{}'", name)));
            }
        }
    }

    async fn add_deployment(&self, deployment: &Deployment) -> Result<Deployment, ProvisionError> {
        self.post(DEPLOYMENTS_PATH, &[], deployment).await
    }

    async fn update_deployment(
        &self,
        deployment: &Deployment,
    ) -> Result<Deployment, ProvisionError> {
        let path = format!("{}/{}", DEPLOYMENT_PATH, deployment_id(deployment)?);
        self.put(&path, deployment).await
    }

    async fn start_deployment(&self, deployment: &Deployment) -> Result<(), ProvisionError> {
        let path = format!("{}/{}/start", DEPLOYMENT_PATH, deployment_id(deployment)?);
        let query = [("environmentId", deployment.env_id.clone())];
        let _: serde_json::Value = self.post(&path, &query, &serde_json::json!({})).await?;
        Ok(())
    }
}
