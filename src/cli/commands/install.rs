//! Install command implementation.
//!
//! The `xui-installer install` command (also the default when no subcommand
//! is given) runs the full install pipeline.

use std::path::{Path, PathBuf};

use crate::cli::args::InstallArgs;
use crate::config::load_config;
use crate::error::Result;
use crate::runner::{show_post_install_notes, InstallOptions, InstallPipeline};
use crate::shell::HostContext;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The install command implementation.
pub struct InstallCommand<'a> {
    config_path: Option<PathBuf>,
    args: InstallArgs,
    host: &'a HostContext,
}

impl<'a> InstallCommand<'a> {
    /// Create a new install command.
    pub fn new(config_path: Option<&Path>, args: InstallArgs, host: &'a HostContext) -> Self {
        Self {
            config_path: config_path.map(Path::to_path_buf),
            args,
            host,
        }
    }

    fn options(&self) -> InstallOptions {
        InstallOptions {
            skip_deps: self.args.skip_deps,
            dry_run: self.args.dry_run,
        }
    }
}

impl Command for InstallCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = load_config(self.config_path.as_deref(), &self.args.overrides())?;

        ui.show_header("XUI TUI Manager installer");

        let report = InstallPipeline::new(&config, self.host).run(&self.options(), ui)?;

        let Some(installed) = &report.installed else {
            ui.success("Dry run complete");
            return Ok(CommandResult::success());
        };

        for name in report.newly_installed() {
            ui.message(&format!("Installed requirement: {}", name));
        }
        if let Some(sha) = &report.commit_sha {
            ui.message(&format!("Source commit: {}", sha));
        }
        ui.success(&format!(
            "Installed {} -> {}",
            installed.link.display(),
            installed.path.display()
        ));
        show_post_install_notes(&config, ui);

        Ok(CommandResult::success())
    }
}
