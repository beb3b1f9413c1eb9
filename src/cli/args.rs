//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::ConfigOverrides;

/// xui-installer - Install the XUI TUI manager and link it onto PATH.
#[derive(Debug, Parser)]
#[command(name = "xui-installer")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides /etc/xui-installer/config.yml)
    #[arg(short, long, global = true, env = "XUI_INSTALLER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Show verbose output, including package manager and git output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install dependencies, fetch the tool and link it (default)
    Install(InstallArgs),

    /// Show whether the tool is installed and linked
    Status(StatusArgs),

    /// Remove the installed tool and its link
    Uninstall(UninstallArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InstallArgs {
    /// Git repository to clone the tool from
    #[arg(long, value_name = "URL")]
    pub repo: Option<String>,

    /// Directory the tool is copied into
    #[arg(long, value_name = "DIR")]
    pub install_dir: Option<PathBuf>,

    /// Directory on PATH that receives the symlink
    #[arg(long, value_name = "DIR")]
    pub link_dir: Option<PathBuf>,

    /// Do not install system requirements or Python packages
    #[arg(long)]
    pub skip_deps: bool,

    /// Print what would happen without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl InstallArgs {
    /// Config values given on the command line.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            repo_url: self.repo.clone(),
            install_dir: self.install_dir.clone(),
            link_dir: self.link_dir.clone(),
        }
    }
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StatusArgs {
    /// Directory the tool was copied into
    #[arg(long, value_name = "DIR")]
    pub install_dir: Option<PathBuf>,

    /// Directory holding the symlink
    #[arg(long, value_name = "DIR")]
    pub link_dir: Option<PathBuf>,
}

impl StatusArgs {
    /// Config values given on the command line.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            repo_url: None,
            install_dir: self.install_dir.clone(),
            link_dir: self.link_dir.clone(),
        }
    }
}

/// Arguments for the `uninstall` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct UninstallArgs {
    /// Directory the tool was copied into
    #[arg(long, value_name = "DIR")]
    pub install_dir: Option<PathBuf>,

    /// Directory holding the symlink
    #[arg(long, value_name = "DIR")]
    pub link_dir: Option<PathBuf>,
}

impl UninstallArgs {
    /// Config values given on the command line.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            repo_url: None,
            install_dir: self.install_dir.clone(),
            link_dir: self.link_dir.clone(),
        }
    }
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
