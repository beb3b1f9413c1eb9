//! Requirement installation.
//!
//! For each required command: probe PATH, and when it is missing install
//! its package with the first available system package manager, then
//! probe again. Continued absence is fatal.

use std::path::PathBuf;

use crate::config::Requirement;
use crate::error::{InstallerError, Result};
use crate::shell::{display_command, CommandResult, HostContext};

use super::package_manager::PackageManager;

/// What happened while ensuring a requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnsureOutcome {
    /// The command was already on PATH; nothing was installed.
    AlreadyPresent { path: PathBuf },
    /// The package was installed and the command now resolves.
    Installed {
        manager: PackageManager,
        path: PathBuf,
    },
}

impl EnsureOutcome {
    /// Where the command resolved.
    pub fn path(&self) -> &PathBuf {
        match self {
            EnsureOutcome::AlreadyPresent { path } | EnsureOutcome::Installed { path, .. } => path,
        }
    }
}

/// Installs missing system requirements.
///
/// Holds the selected package manager for the whole run so detection and
/// the apt-get index refresh each happen at most once.
pub struct RequirementInstaller<'a> {
    host: &'a HostContext,
    manager: Option<PackageManager>,
    refreshed: bool,
}

impl<'a> RequirementInstaller<'a> {
    /// Create an installer bound to a host.
    pub fn new(host: &'a HostContext) -> Self {
        Self {
            host,
            manager: None,
            refreshed: false,
        }
    }

    /// Make sure `requirement.command` resolves on PATH.
    pub fn ensure(&mut self, requirement: &Requirement) -> Result<EnsureOutcome> {
        if let Some(path) = self.host.find_command(&requirement.command) {
            tracing::debug!("'{}' already present at {}", requirement.command, path.display());
            return Ok(EnsureOutcome::AlreadyPresent { path });
        }

        let manager = self.manager_for(&requirement.command)?;
        tracing::info!(
            "Installing '{}' with {} (package {})",
            requirement.command,
            manager,
            requirement.package
        );

        if !self.refreshed {
            if let Some(args) = manager.refresh_args() {
                self.run_checked(manager.binary(), &args)?;
            }
            self.refreshed = true;
        }

        let args = manager.install_args(&[requirement.package.as_str()]);
        self.run_checked(manager.binary(), &args)?;

        match self.host.find_command(&requirement.command) {
            Some(path) => Ok(EnsureOutcome::Installed { manager, path }),
            None => Err(InstallerError::RequirementMissing {
                requirement: requirement.command.clone(),
                message: format!(
                    "still not on PATH after installing package '{}' with {}",
                    requirement.package, manager
                ),
            }),
        }
    }

    fn manager_for(&mut self, requirement: &str) -> Result<PackageManager> {
        if let Some(manager) = self.manager {
            return Ok(manager);
        }

        let host = self.host;
        let manager = PackageManager::detect(&|cmd: &str| host.find_command(cmd)).ok_or_else(|| {
            InstallerError::NoPackageManager {
                requirement: requirement.to_string(),
            }
        })?;
        self.manager = Some(manager);
        Ok(manager)
    }

    fn run_checked(&self, program: &str, args: &[String]) -> Result<CommandResult> {
        run_checked(self.host, program, args)
    }
}

/// Run a program and turn a non-zero exit into [`InstallerError::CommandFailed`].
pub fn run_checked(host: &HostContext, program: &str, args: &[String]) -> Result<CommandResult> {
    let result = host.run(program, args)?;
    if result.success {
        Ok(result)
    } else {
        let output = result.combined_output();
        if !output.is_empty() {
            tracing::warn!("{} output:\n{}", program, output);
        }
        Err(InstallerError::CommandFailed {
            command: display_command(program, args),
            code: result.exit_code,
        })
    }
}

/// Install Python packages with pip in a single invocation.
pub fn install_python_packages(host: &HostContext, packages: &[String]) -> Result<()> {
    if packages.is_empty() {
        return Ok(());
    }

    let mut args = vec!["install".to_string()];
    args.extend(packages.iter().cloned());
    run_checked(host, "pip3", &args)?;
    Ok(())
}
