use std::fs;
use std::path::Path;

use rbdiff_core::{Capabilities, ClientOptions};
use serde::Deserialize;
use tracing::debug;

use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SvnConfig {
    #[serde(default)]
    show_copies_as_adds: Option<bool>,
}

impl SvnConfig {
    #[must_use]
    pub fn show_copies_as_adds(&self) -> Option<bool> {
        self.show_copies_as_adds
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatchConfig {
    #[serde(default)]
    strip: Option<u32>,
}

impl PatchConfig {
    #[must_use]
    pub fn strip(&self) -> Option<u32> {
        self.strip
    }
}

/// Settings from an `rbdiff` TOML file. Command-line flags are layered on
/// top with the `with_*` methods.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    repository_type: Option<String>,
    #[serde(default)]
    repository_url: Option<String>,
    #[serde(default)]
    svn: SvnConfig,
    #[serde(default)]
    patch: PatchConfig,
    #[serde(default)]
    capabilities: Option<Capabilities>,
}

impl Config {
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not a valid config.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    #[must_use]
    pub fn repository_type(&self) -> Option<&str> {
        self.repository_type.as_deref()
    }

    #[must_use]
    pub fn repository_url(&self) -> Option<&str> {
        self.repository_url.as_deref()
    }

    #[must_use]
    pub fn svn(&self) -> &SvnConfig {
        &self.svn
    }

    #[must_use]
    pub fn patch(&self) -> &PatchConfig {
        &self.patch
    }

    #[must_use]
    pub fn capabilities(&self) -> Option<&Capabilities> {
        self.capabilities.as_ref()
    }

    #[must_use]
    pub fn with_repository_type(mut self, repository_type: impl Into<String>) -> Self {
        self.repository_type = Some(repository_type.into());
        self
    }

    #[must_use]
    pub fn with_repository_url(mut self, url: impl Into<String>) -> Self {
        self.repository_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_show_copies_as_adds(mut self, show: bool) -> Self {
        self.svn.show_copies_as_adds = Some(show);
        self
    }

    #[must_use]
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    #[must_use]
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            repository_url: self.repository_url.clone(),
            svn_show_copies_as_adds: self.svn.show_copies_as_adds,
        }
    }
}

/// Reads a capabilities document in the JSON form the review server returns.
///
/// # Errors
///
/// Returns [`ConfigError::Read`] if the file cannot be read and
/// [`ConfigError::Capabilities`] if it is not JSON.
pub fn load_capabilities(path: &Path) -> Result<Capabilities> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Capabilities::from_json(&content).map_err(|source| ConfigError::Capabilities {
        path: path.to_path_buf(),
        source,
    })
}
