//! Configuration file discovery and loading.
//!
//! Layers are applied in this order (later wins):
//! 1. Built-in defaults ([`InstallConfig::default`])
//! 2. Config file (`--config`, else `/etc/xui-installer/config.yml` if present)
//! 3. Command-line overrides ([`ConfigOverrides`])
//!
//! Relative directories in the result are anchored at the current directory.

use crate::config::schema::InstallConfig;
use crate::error::{InstallerError, Result};
use crate::install::absolute_path;
use std::fs;
use std::path::{Path, PathBuf};

/// System-wide config file consulted when `--config` is not given.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/xui-installer/config.yml";

/// Values supplied on the command line that override the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub repo_url: Option<String>,
    pub install_dir: Option<PathBuf>,
    pub link_dir: Option<PathBuf>,
}

impl ConfigOverrides {
    /// Apply every override that is set.
    pub fn apply(&self, config: &mut InstallConfig) {
        if let Some(url) = &self.repo_url {
            config.repo_url = url.clone();
        }
        if let Some(dir) = &self.install_dir {
            config.install_dir = dir.clone();
        }
        if let Some(dir) = &self.link_dir {
            config.link_dir = dir.clone();
        }
    }
}

/// Load the effective configuration.
///
/// An explicit path must exist. The system path is optional.
pub fn load_config(explicit: Option<&Path>, overrides: &ConfigOverrides) -> Result<InstallConfig> {
    load_config_from(explicit, Path::new(SYSTEM_CONFIG_PATH), overrides)
}

/// Load the effective configuration with a custom fallback path.
pub fn load_config_from(
    explicit: Option<&Path>,
    fallback: &Path,
    overrides: &ConfigOverrides,
) -> Result<InstallConfig> {
    let mut config = match explicit {
        Some(path) => load_config_file(path)?,
        None if fallback.is_file() => load_config_file(fallback)?,
        None => InstallConfig::default(),
    };

    overrides.apply(&mut config);
    resolve_paths(&mut config)?;
    tracing::debug!("Effective config: {:?}", config);
    Ok(config)
}

/// Make the install, link and work directories absolute.
fn resolve_paths(config: &mut InstallConfig) -> Result<()> {
    config.install_dir = absolute_path(&config.install_dir)?;
    config.link_dir = absolute_path(&config.link_dir)?;
    if let Some(work) = &config.work_dir {
        config.work_dir = Some(absolute_path(work)?);
    }
    Ok(())
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<InstallConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            InstallerError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            InstallerError::Io(e)
        }
    })?;

    tracing::debug!("Loaded config file {}", path.display());
    parse_config(&content, path)
}

/// Parse YAML content into an [`InstallConfig`].
///
/// An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<InstallConfig> {
    if content.trim().is_empty() {
        return Ok(InstallConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| InstallerError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}
