//! Status command implementation.
//!
//! The `xui-installer status` command reports whether the tool is installed
//! and reachable through its link. It never needs root.

use std::path::{Path, PathBuf};

use crate::cli::args::StatusArgs;
use crate::config::load_config;
use crate::error::Result;
use crate::install::{InstallStatus, LinkState};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The status command implementation.
pub struct StatusCommand {
    config_path: Option<PathBuf>,
    args: StatusArgs,
}

impl StatusCommand {
    /// Create a new status command.
    pub fn new(config_path: Option<&Path>, args: StatusArgs) -> Self {
        Self {
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }
}

impl Command for StatusCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = load_config(self.config_path.as_deref(), &self.args.overrides())?;
        let status = InstallStatus::inspect(&config);

        ui.show_header("XUI TUI Manager - Status");

        let file = status.installed_path.display();
        match (status.file_present, status.file_executable) {
            (true, true) => ui.success(&format!("{} is installed", file)),
            (true, false) => ui.warning(&format!("{} is present but not executable", file)),
            (false, _) => ui.warning(&format!("{} is not installed", file)),
        }

        let link = status.link_path.display();
        match &status.link {
            LinkState::Installed => ui.success(&format!("{} links to the installed file", link)),
            LinkState::Missing => ui.warning(&format!("{} does not exist", link)),
            LinkState::Foreign { target } => {
                ui.warning(&format!("{} points to {}", link, target.display()))
            }
            LinkState::NotASymlink => ui.warning(&format!("{} is not a symlink", link)),
        }

        if status.is_complete() {
            Ok(CommandResult::success())
        } else {
            ui.show_hint("Run: sudo xui-installer install");
            Ok(CommandResult::failure(1))
        }
    }
}
