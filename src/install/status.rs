//! Inspecting and removing an installation.

use std::fs;
use std::path::PathBuf;

use crate::config::InstallConfig;
use crate::error::{InstallerError, Result};
use crate::requirements::probe::is_executable;

use super::files::link_points_to;

/// State of the symlink on PATH.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkState {
    /// Nothing at the link path.
    Missing,
    /// A symlink that resolves to the installed file.
    Installed,
    /// A symlink that points somewhere else.
    Foreign { target: PathBuf },
    /// A regular file or directory occupies the link path.
    NotASymlink,
}

/// Snapshot of what is on disk for a configuration.
#[derive(Debug, Clone)]
pub struct InstallStatus {
    pub installed_path: PathBuf,
    pub link_path: PathBuf,
    pub file_present: bool,
    pub file_executable: bool,
    pub link: LinkState,
}

impl InstallStatus {
    /// Inspect the filesystem.
    pub fn inspect(config: &InstallConfig) -> Self {
        let installed_path = config.installed_path();
        let link_path = config.link_path();
        let file_present = installed_path.is_file();
        let file_executable = file_present && is_executable(&installed_path);

        let link = match fs::symlink_metadata(&link_path) {
            Err(_) => LinkState::Missing,
            Ok(meta) if !meta.file_type().is_symlink() => LinkState::NotASymlink,
            Ok(_) if link_points_to(&link_path, &installed_path) => LinkState::Installed,
            Ok(_) => LinkState::Foreign {
                target: fs::read_link(&link_path).unwrap_or_default(),
            },
        };

        Self {
            installed_path,
            link_path,
            file_present,
            file_executable,
            link,
        }
    }

    /// Whether the tool is fully installed and invocable through the link.
    pub fn is_complete(&self) -> bool {
        self.file_present && self.file_executable && self.link == LinkState::Installed
    }
}

/// What [`uninstall`] removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UninstallReport {
    pub removed_link: bool,
    pub removed_file: bool,
    pub removed_dir: bool,
}

impl UninstallReport {
    /// Whether anything was removed at all.
    pub fn removed_anything(&self) -> bool {
        self.removed_link || self.removed_file || self.removed_dir
    }
}

/// Remove the symlink (only if it is ours), the installed file, and the
/// install directory when it is left empty.
pub fn uninstall(config: &InstallConfig) -> Result<UninstallReport> {
    let status = InstallStatus::inspect(config);
    let mut report = UninstallReport::default();

    match &status.link {
        LinkState::Installed => {
            fs::remove_file(&status.link_path).map_err(|e| {
                InstallerError::filesystem("remove symlink", &status.link_path, e)
            })?;
            report.removed_link = true;
        }
        LinkState::Foreign { target } => {
            tracing::warn!(
                "Leaving {} in place: it points to {}",
                status.link_path.display(),
                target.display()
            );
        }
        LinkState::NotASymlink => {
            tracing::warn!(
                "Leaving {} in place: it is not a symlink",
                status.link_path.display()
            );
        }
        LinkState::Missing => {}
    }

    if status.file_present {
        fs::remove_file(&status.installed_path).map_err(|e| {
            InstallerError::filesystem("remove file", &status.installed_path, e)
        })?;
        report.removed_file = true;
    }

    let dir = &config.install_dir;
    let is_empty = fs::read_dir(dir)
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false);
    if is_empty {
        fs::remove_dir(dir).map_err(|e| InstallerError::filesystem("remove directory", dir, e))?;
        report.removed_dir = true;
    }

    tracing::debug!("Uninstall report: {:?}", report);
    Ok(report)
}
