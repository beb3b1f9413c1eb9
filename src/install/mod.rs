//! Placing the tool on disk and linking it onto PATH.
//!
//! - [`files`] - directory creation, copy with executable bit, symlink replacement
//! - [`status`] - inspecting and removing an installation

pub mod files;
pub mod status;

use std::path::{Path, PathBuf};

use crate::config::InstallConfig;
use crate::error::{InstallerError, Result};

pub use files::{
    absolute_path, copy_executable, ensure_dir, link_points_to, replace_symlink,
    resolved_location,
};
pub use status::{uninstall, InstallStatus, LinkState, UninstallReport};

/// Where the tool ended up after [`install_tool`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledTool {
    pub path: PathBuf,
    pub link: PathBuf,
    pub bytes: u64,
}

/// Copy the tool out of a cloned repository and link it.
///
/// Creates the install directory if needed, replaces any previous copy and
/// any previous link. Relative directories are taken from the current
/// directory, and a link that would land on the installed file itself is
/// rejected before anything is written.
pub fn install_tool(config: &InstallConfig, clone_root: &Path) -> Result<InstalledTool> {
    let source = config.source_path(clone_root);
    let dest = absolute_path(&config.installed_path())?;
    let link = absolute_path(&config.link_path())?;

    if resolved_location(&dest) == resolved_location(&link) {
        return Err(InstallerError::InvalidConfig {
            message: format!(
                "link path {} is the installed file itself; use a different link_dir or link_name",
                link.display()
            ),
        });
    }

    ensure_dir(&absolute_path(&config.install_dir)?)?;
    let bytes = copy_executable(&source, &dest)?;
    replace_symlink(&dest, &link)?;

    Ok(InstalledTool {
        path: dest,
        link,
        bytes,
    })
}
