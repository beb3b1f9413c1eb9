//! Uninstall command implementation.
//!
//! The `xui-installer uninstall` command removes the link and the installed
//! file. System packages installed earlier are left alone.

use std::path::{Path, PathBuf};

use crate::cli::args::UninstallArgs;
use crate::config::load_config;
use crate::error::{InstallerError, Result};
use crate::install::uninstall;
use crate::shell::HostContext;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The uninstall command implementation.
pub struct UninstallCommand<'a> {
    config_path: Option<PathBuf>,
    args: UninstallArgs,
    host: &'a HostContext,
}

impl<'a> UninstallCommand<'a> {
    /// Create a new uninstall command.
    pub fn new(config_path: Option<&Path>, args: UninstallArgs, host: &'a HostContext) -> Self {
        Self {
            config_path: config_path.map(Path::to_path_buf),
            args,
            host,
        }
    }
}

impl Command for UninstallCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if !self.host.is_elevated() {
            return Err(InstallerError::NotElevated);
        }

        let config = load_config(self.config_path.as_deref(), &self.args.overrides())?;
        let report = uninstall(&config)?;

        if report.removed_link {
            ui.success(&format!("Removed {}", config.link_path().display()));
        }
        if report.removed_file {
            ui.success(&format!("Removed {}", config.installed_path().display()));
        }
        if report.removed_dir {
            ui.success(&format!("Removed {}", config.install_dir.display()));
        }
        if !report.removed_anything() {
            ui.message("Nothing to remove");
        }

        Ok(CommandResult::success())
    }
}
