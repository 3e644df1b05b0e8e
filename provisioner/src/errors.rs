//! Error types for the provisioner

use thiserror::Error;

/// Process exit status for a missing required configuration value
pub const EXIT_MISSING_CONFIGURATION: i32 = -1;

/// Process exit status for every other failure
pub const EXIT_FAILURE: i32 = 1;

/// Main error type for the provisioner
#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Properties parse error in {path}: {message}")]
    PropertiesParse { path: String, message: String },

    #[error("{0}")]
    MissingConfiguration(MissingConfiguration),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Control plane returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid deployment id: '{0}'")]
    InvalidDeploymentId(String),

    #[error("Unresolved template placeholders: {}", .0.join(", "))]
    UnresolvedPlaceholders(Vec<String>),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ProvisionError {
    /// Exit status the process terminates with for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ProvisionError::MissingConfiguration(_) => EXIT_MISSING_CONFIGURATION,
            _ => EXIT_FAILURE,
        }
    }
}

/// A required configuration value that is absent or empty
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MissingConfiguration {
    #[error("no value for deployment property key '{0}'")]
    Property(String),

    #[error("no [{0}] section in the deployment properties file")]
    Section(String),

    #[error("no value for environment variable '{0}'")]
    EnvVar(String),
}

impl From<MissingConfiguration> for ProvisionError {
    fn from(err: MissingConfiguration) -> Self {
        ProvisionError::MissingConfiguration(err)
    }
}
