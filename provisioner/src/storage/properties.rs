//! Deployment properties file

use std::collections::HashMap;

use ini::{Ini, ParseOption};

use crate::errors::{MissingConfiguration, ProvisionError};
use crate::filesys::file::File;

/// Section holding the deployment parameters
pub const DEPLOYMENT_SECTION: &str = "deployment";

/// Every key the `[deployment]` section must define
pub const REQUIRED_KEYS: [&str; 19] = [
    "SCH_URL",
    "ORG_ID",
    "ENVIRONMENT_NAME",
    "LOAD_BALANCER_HOSTNAME",
    "SDC_DEPLOYMENT_MANIFEST",
    "SDC_VERSION",
    "DEPLOYMENT_TAGS",
    "USER_STAGE_LIBS",
    "ENGINE_LABELS",
    "SDC_MAX_CPU_LOAD",
    "SDC_MAX_MEMORY_USED",
    "SDC_MAX_PIPELINES_RUNNING",
    "SDC_JAVA_MIN_HEAP_MB",
    "SDC_JAVA_MAX_HEAP_MB",
    "SDC_JAVA_OPTS",
    "REQUESTS_MEMORY",
    "LIMITS_MEMORY",
    "REQUESTS_CPU",
    "LIMITS_CPU",
];

/// Flat key/value view of the `[deployment]` section
///
/// Keys are matched case-insensitively. Values are opaque strings.
#[derive(Debug, Clone, Default)]
pub struct DeploymentProperties {
    values: HashMap<String, String>,
}

impl DeploymentProperties {
    /// Load the `[deployment]` section of a properties file
    pub async fn load(file: &File) -> Result<Self, ProvisionError> {
        let contents = file.read_string().await?;
        Self::parse_named(&contents, &file.path().display().to_string())
    }

    /// Parse properties text
    pub fn parse(contents: &str) -> Result<Self, ProvisionError> {
        Self::parse_named(contents, "<inline>")
    }

    fn parse_named(contents: &str, origin: &str) -> Result<Self, ProvisionError> {
        let options = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..Default::default()
        };
        let ini = Ini::load_from_str_opt(contents, options).map_err(|e| {
            ProvisionError::PropertiesParse {
                path: origin.to_string(),
                message: e.to_string(),
            }
        })?;

        let section = ini
            .section(Some(DEPLOYMENT_SECTION))
            .ok_or_else(|| MissingConfiguration::Section(DEPLOYMENT_SECTION.to_string()))?;

        let values = section
            .iter()
            .map(|(key, value)| (key.trim().to_uppercase(), value.trim().to_string()))
            .collect();

        Ok(Self { values })
    }

    /// Look up an optional key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(&key.to_uppercase())
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Look up a required key; absent or empty values are an error
    pub fn require(&self, key: &str) -> Result<&str, MissingConfiguration> {
        self.get(key)
            .ok_or_else(|| MissingConfiguration::Property(key.to_string()))
    }

    /// Check every required key, reporting the first one missing
    pub fn check_required(&self) -> Result<(), MissingConfiguration> {
        for key in REQUIRED_KEYS {
            self.require(key)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
