//! On-disk layout of the provisioning inputs

use std::path::{Path, PathBuf};

use crate::filesys::file::File;

/// Default name of the deployment properties file
pub const PROPERTIES_FILE_NAME: &str = "deployment.properties";

/// Locations of the properties file, the `etc/` engine configuration files
/// and the manifest template, relative to a base directory
#[derive(Debug, Clone)]
pub struct ConfigLayout {
    /// Base directory all relative paths resolve against
    pub base_dir: PathBuf,

    /// Properties file override
    properties_override: Option<PathBuf>,
}

impl ConfigLayout {
    /// Create a new layout rooted at `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            properties_override: None,
        }
    }

    /// Use a properties file other than `<base_dir>/deployment.properties`
    pub fn with_properties_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.properties_override = Some(path.into());
        self
    }

    /// Resolve a path against the base directory unless it is absolute
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Get the deployment properties file
    pub fn properties_file(&self) -> File {
        match &self.properties_override {
            Some(path) => File::new(self.resolve(path)),
            None => File::new(self.base_dir.join(PROPERTIES_FILE_NAME)),
        }
    }

    /// Get the engine configuration directory
    pub fn etc_dir(&self) -> PathBuf {
        self.base_dir.join("etc")
    }

    pub fn sdc_properties_file(&self) -> File {
        File::new(self.etc_dir().join("sdc.properties"))
    }

    pub fn credential_stores_file(&self) -> File {
        File::new(self.etc_dir().join("credential-stores.properties"))
    }

    pub fn security_policy_file(&self) -> File {
        File::new(self.etc_dir().join("security.policy"))
    }

    pub fn log4j2_file(&self) -> File {
        File::new(self.etc_dir().join("sdc-log4j2.properties"))
    }

    /// Optional; skipped when absent
    pub fn proxy_properties_file(&self) -> File {
        File::new(self.etc_dir().join("proxy.properties"))
    }

    /// Get the manifest template named by the properties file
    pub fn manifest_file(&self, manifest: impl AsRef<Path>) -> File {
        File::new(self.resolve(manifest))
    }
}

impl Default for ConfigLayout {
    fn default() -> Self {
        Self::new(".")
    }
}
