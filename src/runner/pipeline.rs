//! The install pipeline.
//!
//! Steps run strictly in order and the first failure ends the run:
//! privilege check, system requirements, Python packages, clone, install.
//! The clone lives in a [`CloneWorkspace`] that is removed on every exit
//! path.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::config::InstallConfig;
use crate::error::{InstallerError, Result};
use crate::fetch::{CloneWorkspace, GitFetcher};
use crate::install::{install_tool, InstalledTool};
use crate::requirements::{install_python_packages, EnsureOutcome, RequirementInstaller};
use crate::shell::{display_command, HostContext};
use crate::ui::UserInterface;

/// Name of the file where the installed application keeps its settings.
pub const APP_CONFIG_FILE: &str = ".xui_tui_config.json";

/// Options for an install run.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstallOptions {
    /// Skip system requirement and Python package installation.
    pub skip_deps: bool,
    /// Print the plan without touching the host.
    pub dry_run: bool,
}

/// Result of an install run.
#[derive(Debug)]
pub struct InstallReport {
    /// Outcome per system requirement, in configured order.
    pub requirements: Vec<(String, EnsureOutcome)>,
    /// Commit that was installed, when git reported it.
    pub commit_sha: Option<String>,
    /// The placed tool; `None` for dry runs.
    pub installed: Option<InstalledTool>,
    /// Total duration.
    pub duration: Duration,
}

impl InstallReport {
    fn empty() -> Self {
        Self {
            requirements: Vec::new(),
            commit_sha: None,
            installed: None,
            duration: Duration::ZERO,
        }
    }

    /// Whether this run only printed a plan.
    pub fn is_dry_run(&self) -> bool {
        self.installed.is_none()
    }

    /// Requirements that had to be installed during this run.
    pub fn newly_installed(&self) -> impl Iterator<Item = &str> {
        self.requirements.iter().filter_map(|(name, outcome)| match outcome {
            EnsureOutcome::Installed { .. } => Some(name.as_str()),
            EnsureOutcome::AlreadyPresent { .. } => None,
        })
    }
}

/// Runs the install steps against a host.
pub struct InstallPipeline<'a> {
    config: &'a InstallConfig,
    host: &'a HostContext,
}

impl<'a> InstallPipeline<'a> {
    /// Create a pipeline for a resolved configuration.
    pub fn new(config: &'a InstallConfig, host: &'a HostContext) -> Self {
        Self { config, host }
    }

    /// Human-readable list of what a run would do.
    pub fn plan(&self, options: &InstallOptions) -> Vec<String> {
        let config = self.config;
        let mut plan = vec!["Verify the installer runs as root".to_string()];

        if !options.skip_deps {
            for requirement in &config.requirements {
                plan.push(format!(
                    "Ensure '{}' is on PATH (package '{}')",
                    requirement.command, requirement.package
                ));
            }
            if !config.python_packages.is_empty() {
                let mut args = vec!["install".to_string()];
                args.extend(config.python_packages.iter().cloned());
                plan.push(format!("Run {}", display_command("pip3", &args)));
            }
        }

        plan.push(format!("Clone {} into a temporary directory", config.repo_url));
        plan.push(format!(
            "Copy {} to {} (mode 0755)",
            config.source_file,
            config.installed_path().display()
        ));
        plan.push(format!(
            "Link {} -> {}",
            config.link_path().display(),
            config.installed_path().display()
        ));
        plan.push("Remove the temporary directory".to_string());
        plan
    }

    /// Run every step in order.
    pub fn run(&self, options: &InstallOptions, ui: &mut dyn UserInterface) -> Result<InstallReport> {
        if options.dry_run {
            ui.show_header("Dry run: nothing will be changed");
            for (index, line) in self.plan(options).iter().enumerate() {
                ui.message(&format!("  {}. {}", index + 1, line));
            }
            return Ok(InstallReport::empty());
        }

        let start = Instant::now();
        let total = if options.skip_deps { 3 } else { 5 };
        let mut current = 0;
        let mut report = InstallReport::empty();

        // Nothing on the host may change before this check passes.
        current += 1;
        ui.show_progress(current, total);
        if !self.host.is_elevated() {
            return Err(InstallerError::NotElevated);
        }
        info!("Privilege check passed");

        if options.skip_deps {
            info!("Skipping system requirements and Python packages");
            ui.warning("Skipping dependency installation (--skip-deps)");
        } else {
            current += 1;
            ui.show_progress(current, total);
            report.requirements = self.ensure_requirements(ui)?;

            current += 1;
            ui.show_progress(current, total);
            self.install_packages(ui)?;
        }

        current += 1;
        ui.show_progress(current, total);
        let workspace = CloneWorkspace::create(self.config.work_dir.as_deref())?;
        let fetched = step(ui, &format!("Cloning {}", self.config.repo_url), || {
            GitFetcher::new(self.host).fetch(&self.config.repo_url, &workspace)
        })?;
        report.commit_sha = fetched.commit_sha.clone();

        current += 1;
        ui.show_progress(current, total);
        let installed = step(ui, &format!("Installing {}", self.config.file_name()), || {
            install_tool(self.config, &fetched.local_path)
        })?;
        info!(
            "Installed {} ({} bytes), linked from {}",
            installed.path.display(),
            installed.bytes,
            installed.link.display()
        );

        if let Err(e) = workspace.close() {
            warn!("Could not remove temporary directory: {}", e);
            ui.warning(&format!("Could not remove temporary directory: {}", e));
        }

        report.installed = Some(installed);
        report.duration = start.elapsed();
        Ok(report)
    }

    fn ensure_requirements(&self, ui: &mut dyn UserInterface) -> Result<Vec<(String, EnsureOutcome)>> {
        info!("Checking {} system requirements", self.config.requirements.len());
        let mut installer = RequirementInstaller::new(self.host);
        let mut outcomes = Vec::with_capacity(self.config.requirements.len());

        for requirement in &self.config.requirements {
            let mut spinner = ui.start_spinner(&format!("Checking {}", requirement.command));
            match installer.ensure(requirement) {
                Ok(outcome) => {
                    let path = outcome.path().display();
                    if let EnsureOutcome::Installed { manager, .. } = &outcome {
                        spinner.finish_success(&format!(
                            "Installed {} with {} ({})",
                            requirement.command, manager, path
                        ));
                    } else {
                        spinner.finish_skipped(&format!(
                            "{} already installed ({})",
                            requirement.command, path
                        ));
                    }
                    outcomes.push((requirement.command.clone(), outcome));
                }
                Err(e) => {
                    spinner.finish_error(&format!("{}: {}", requirement.command, e));
                    return Err(e);
                }
            }
        }

        Ok(outcomes)
    }

    fn install_packages(&self, ui: &mut dyn UserInterface) -> Result<()> {
        let packages = &self.config.python_packages;
        if packages.is_empty() {
            return Ok(());
        }

        info!("Installing Python packages: {}", packages.join(", "));
        step(ui, &format!("Installing Python packages ({})", packages.join(", ")), || {
            install_python_packages(self.host, packages)
        })
    }
}

/// Run one step under a spinner, finishing it with the outcome.
fn step<T>(ui: &mut dyn UserInterface, label: &str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    info!("{}", label);
    let mut spinner = ui.start_spinner(label);
    match f() {
        Ok(value) => {
            spinner.finish_success(label);
            Ok(value)
        }
        Err(e) => {
            spinner.finish_error(&format!("{}: {}", label, e));
            Err(e)
        }
    }
}

/// Where the installed application keeps its own settings.
///
/// Falls back to a `~`-relative path when the home directory is unknown.
pub fn app_config_path() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(APP_CONFIG_FILE),
        None => PathBuf::from("~").join(APP_CONFIG_FILE),
    }
}

/// Print how to start the installed tool.
pub fn show_post_install_notes(config: &InstallConfig, ui: &mut dyn UserInterface) {
    ui.show_hint(&format!("Run: sudo {}", config.link_name));
    ui.show_hint(&format!("Or:  {}", config.link_name));
    ui.show_hint(&format!(
        "Settings are stored in {}",
        app_config_path().display()
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Requirement;
    use crate::shell::CommandResult;
    use crate::ui::{MockUI, SpinnerStatus};
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    fn ok() -> Result<CommandResult> {
        Ok(CommandResult::success(String::new(), String::new(), Duration::ZERO))
    }

    fn recording_host(elevated: bool, calls: Rc<RefCell<Vec<String>>>) -> HostContext {
        HostContext {
            is_elevated: Box::new(move || elevated),
            find_command: Box::new(|cmd: &str| Some(PathBuf::from("/usr/bin").join(cmd))),
            run_command: Box::new(move |program: &str, args: &[String]| {
                calls.borrow_mut().push(display_command(program, args));
                ok()
            }),
        }
    }

    fn test_config(temp: &TempDir) -> InstallConfig {
        let work = temp.path().join("work");
        std::fs::create_dir_all(&work).unwrap();
        InstallConfig {
            install_dir: temp.path().join("opt"),
            link_dir: temp.path().join("bin"),
            work_dir: Some(work),
            ..Default::default()
        }
    }

    fn work_entries(config: &InstallConfig) -> usize {
        std::fs::read_dir(config.work_dir.as_ref().unwrap())
            .unwrap()
            .count()
    }

    #[test]
    fn not_elevated_fails_before_any_command() {
        let temp = TempDir::new().unwrap();
        let config = test_config(&temp);
        let calls = Rc::new(RefCell::new(Vec::new()));
        let host = recording_host(false, Rc::clone(&calls));
        let mut ui = MockUI::new();

        let result = InstallPipeline::new(&config, &host).run(&InstallOptions::default(), &mut ui);

        assert!(matches!(result, Err(InstallerError::NotElevated)));
        assert!(calls.borrow().is_empty());
        assert!(!config.install_dir.exists());
        assert!(!config.link_dir.exists());
        assert_eq!(work_entries(&config), 0);
    }

    #[test]
    fn dry_run_touches_nothing() {
        let temp = TempDir::new().unwrap();
        let config = test_config(&temp);
        let calls = Rc::new(RefCell::new(Vec::new()));
        let host = recording_host(false, Rc::clone(&calls));
        let mut ui = MockUI::new();
        let options = InstallOptions {
            dry_run: true,
            ..Default::default()
        };

        let report = InstallPipeline::new(&config, &host).run(&options, &mut ui).unwrap();

        assert!(report.is_dry_run());
        assert!(calls.borrow().is_empty());
        assert!(ui.has_message("pip3 install requests rich"));
        assert!(ui.has_message(&config.repo_url));
        assert!(!config.install_dir.exists());
        assert_eq!(work_entries(&config), 0);
    }

    #[test]
    fn plan_omits_dependencies_when_skipped() {
        let config = InstallConfig::default();
        let host = recording_host(true, Rc::new(RefCell::new(Vec::new())));
        let pipeline = InstallPipeline::new(&config, &host);

        let full = pipeline.plan(&InstallOptions::default());
        let skipped = pipeline.plan(&InstallOptions {
            skip_deps: true,
            ..Default::default()
        });

        assert!(full.iter().any(|l| l.contains("'pip3'")));
        assert!(!skipped.iter().any(|l| l.contains("pip3")));
        assert_eq!(full.len(), skipped.len() + 4);
    }

    #[test]
    fn present_requirements_are_skipped_and_pip_runs_once() {
        let temp = TempDir::new().unwrap();
        let config = InstallConfig {
            repo_url: temp.path().join("missing.git").to_string_lossy().to_string(),
            ..test_config(&temp)
        };
        let calls = Rc::new(RefCell::new(Vec::new()));
        let host = recording_host(true, Rc::clone(&calls));
        let mut ui = MockUI::new();

        // The fake git "succeeds" without producing files, so the copy fails.
        let result = InstallPipeline::new(&config, &host).run(&InstallOptions::default(), &mut ui);
        assert!(matches!(result, Err(InstallerError::SourceMissing { .. })));

        let calls = calls.borrow();
        assert!(!calls.iter().any(|c| c.starts_with("apt-get")));
        assert_eq!(calls.iter().filter(|c| c.starts_with("pip3")).count(), 1);
        assert!(calls.contains(&"pip3 install requests rich".to_string()));

        let finished = ui.finished();
        assert_eq!(
            finished.iter().filter(|(_, s)| *s == SpinnerStatus::Skipped).count(),
            config.requirements.len()
        );
        assert!(finished
            .iter()
            .any(|(msg, _)| msg == "git already installed (/usr/bin/git)"));
        assert_eq!(finished.last().map(|(_, s)| *s), Some(SpinnerStatus::Error));
        assert_eq!(work_entries(&config), 0);
    }

    #[test]
    fn missing_requirement_without_manager_is_fatal() {
        let temp = TempDir::new().unwrap();
        let config = InstallConfig {
            requirements: vec![Requirement::new("git", "git")],
            ..test_config(&temp)
        };
        let host = HostContext {
            is_elevated: Box::new(|| true),
            find_command: Box::new(|_: &str| None),
            run_command: Box::new(|_: &str, _: &[String]| ok()),
        };
        let mut ui = MockUI::new();

        let result = InstallPipeline::new(&config, &host).run(&InstallOptions::default(), &mut ui);

        assert!(matches!(result, Err(InstallerError::NoPackageManager { .. })));
        assert_eq!(ui.finished().last().map(|(_, s)| *s), Some(SpinnerStatus::Error));
    }

    #[test]
    fn post_install_notes_mention_link_and_settings() {
        let mut ui = MockUI::new();
        show_post_install_notes(&InstallConfig::default(), &mut ui);
        assert!(ui.has_hint("sudo xui-manager"));
        assert!(ui.has_hint(APP_CONFIG_FILE));
    }

    #[test]
    fn app_config_path_ends_with_file_name() {
        assert!(app_config_path().ends_with(APP_CONFIG_FILE));
    }
}
