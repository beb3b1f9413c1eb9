//! Configuration schema definitions.
//!
//! This module contains the struct definitions that map to the optional
//! YAML configuration file. Every field has a built-in default, so an
//! empty file (or no file at all) yields the stock installation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default remote repository the tool is cloned from.
pub const DEFAULT_REPO_URL: &str = "https://github.com/xui-tui-manager/xui-tui-manager.git";

/// Default directory the tool is copied into.
pub const DEFAULT_INSTALL_DIR: &str = "/opt/xui-tui-manager";

/// Default name of the script inside the repository.
pub const DEFAULT_SOURCE_FILE: &str = "xui_tui_app.py";

/// Default directory on PATH that receives the symlink.
pub const DEFAULT_LINK_DIR: &str = "/usr/local/bin";

/// Default name of the symlink users invoke.
pub const DEFAULT_LINK_NAME: &str = "xui-manager";

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InstallConfig {
    /// Git URL of the repository holding the tool.
    pub repo_url: String,

    /// Directory the tool is installed into.
    pub install_dir: PathBuf,

    /// Path of the tool relative to the repository root.
    pub source_file: String,

    /// Directory on PATH that receives the symlink.
    pub link_dir: PathBuf,

    /// Name of the symlink.
    pub link_name: String,

    /// System commands that must be present, in install order.
    pub requirements: Vec<Requirement>,

    /// Python packages installed with pip.
    pub python_packages: Vec<String>,

    /// Directory temporary clones are created in (system temp dir when unset).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_dir: Option<PathBuf>,
}

/// A system command and the package that provides it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Requirement {
    /// Command looked up on PATH.
    pub command: String,

    /// Package handed to the system package manager.
    pub package: String,
}

impl Requirement {
    /// Create a requirement.
    pub fn new(command: &str, package: &str) -> Self {
        Self {
            command: command.to_string(),
            package: package.to_string(),
        }
    }
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            repo_url: DEFAULT_REPO_URL.to_string(),
            install_dir: PathBuf::from(DEFAULT_INSTALL_DIR),
            source_file: DEFAULT_SOURCE_FILE.to_string(),
            link_dir: PathBuf::from(DEFAULT_LINK_DIR),
            link_name: DEFAULT_LINK_NAME.to_string(),
            requirements: default_requirements(),
            python_packages: default_python_packages(),
            work_dir: None,
        }
    }
}

impl InstallConfig {
    /// Final location of the installed tool.
    pub fn installed_path(&self) -> PathBuf {
        self.install_dir.join(self.file_name())
    }

    /// Location of the symlink.
    pub fn link_path(&self) -> PathBuf {
        self.link_dir.join(&self.link_name)
    }

    /// Location of the tool inside a cloned repository.
    pub fn source_path(&self, clone_root: &Path) -> PathBuf {
        clone_root.join(&self.source_file)
    }

    /// File name the tool is installed under.
    ///
    /// Only the last component of `source_file` is kept, so a tool nested
    /// in the repository still lands directly in `install_dir`.
    pub fn file_name(&self) -> &str {
        Path::new(&self.source_file)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.source_file)
    }
}

fn default_requirements() -> Vec<Requirement> {
    vec![
        Requirement::new("git", "git"),
        Requirement::new("python3", "python3"),
        Requirement::new("pip3", "python3-pip"),
    ]
}

fn default_python_packages() -> Vec<String> {
    vec!["requests".to_string(), "rich".to_string()]
}
