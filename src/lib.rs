//! xui-installer - Install the XUI TUI manager on a Linux host.
//!
//! The installer makes sure git, Python and pip are present, installs the
//! Python packages the tool imports, clones the tool's repository into a
//! temporary directory, copies the script into place and links it onto PATH.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration defaults, file loading and overrides
//! - [`error`] - Error types and result aliases
//! - [`fetch`] - Cloning into a scoped temporary directory
//! - [`install`] - Copying, linking, status and removal
//! - [`requirements`] - PATH probing and system package installation
//! - [`runner`] - The ordered install pipeline
//! - [`shell`] - External command execution and the host seam
//! - [`ui`] - Spinners and terminal output
//!
//! # Example
//!
//! ```
//! use xui_installer::config::{parse_config, InstallConfig};
//! use std::path::Path;
//!
//! let config = parse_config("install_dir: /srv/xui\n", Path::new("config.yml")).unwrap();
//! assert_eq!(config.installed_path(), Path::new("/srv/xui/xui_tui_app.py"));
//! assert_eq!(config.repo_url, InstallConfig::default().repo_url);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod install;
pub mod requirements;
pub mod runner;
pub mod shell;
pub mod ui;

pub use error::{InstallerError, Result};
