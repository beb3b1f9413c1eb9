//! System requirement detection and installation.
//!
//! # Modules
//!
//! - [`probe`] - PATH lookup for required commands
//! - [`package_manager`] - apt-get / yum / dnf selection
//! - [`installer`] - Install-if-missing with post-install re-check, and pip

pub mod installer;
pub mod package_manager;
pub mod probe;

pub use installer::{install_python_packages, run_checked, EnsureOutcome, RequirementInstaller};
pub use package_manager::PackageManager;
pub use probe::{find_command, is_executable};
