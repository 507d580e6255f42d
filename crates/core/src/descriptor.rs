//! Plugin descriptor
//!
//! The host describes each plugin with a small manifest. Only the version is
//! consumed by the settings store (it ends up in the settings file header),
//! the rest is carried for log lines and diagnostics.
//!
//! ```toml
//! name = "AfkBooter"
//! version = "1.2.1"
//! description = "Kicks idle players"
//! authors = ["neromir"]
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::DescriptorError;

/// Host-supplied plugin description
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PluginDescriptor {
    /// Plugin display name
    pub name: String,

    /// Version string shown in the generated settings file
    pub version: String,

    /// Short human readable description
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub authors: Vec<String>,
}

impl PluginDescriptor {
    /// Build a descriptor for hosts that supply metadata programmatically.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: None,
            authors: Vec::new(),
        }
    }

    /// Parse a descriptor from manifest text.
    pub fn from_toml_str(content: &str) -> Result<Self, DescriptorError> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a manifest file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DescriptorError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let descriptor = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded plugin descriptor {} from {:?}", descriptor.full_name(), path);
        Ok(descriptor)
    }

    /// `name vversion`, the form used in log lines
    pub fn full_name(&self) -> String {
        format!("{} v{}", self.name, self.version)
    }
}
