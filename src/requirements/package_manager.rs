//! System package manager selection.

use std::fmt;
use std::path::PathBuf;

/// A supported system package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    AptGet,
    Yum,
    Dnf,
}

impl PackageManager {
    /// Managers in the order they are tried.
    pub const PREFERENCE: [PackageManager; 3] =
        [PackageManager::AptGet, PackageManager::Yum, PackageManager::Dnf];

    /// Executable name looked up on PATH.
    pub fn binary(&self) -> &'static str {
        match self {
            PackageManager::AptGet => "apt-get",
            PackageManager::Yum => "yum",
            PackageManager::Dnf => "dnf",
        }
    }

    /// Arguments that refresh the package index before the first install.
    ///
    /// Only apt-get needs this; yum and dnf refresh metadata on demand.
    pub fn refresh_args(&self) -> Option<Vec<String>> {
        match self {
            PackageManager::AptGet => Some(vec!["update".to_string()]),
            PackageManager::Yum | PackageManager::Dnf => None,
        }
    }

    /// Arguments that install `packages` without prompting.
    pub fn install_args(&self, packages: &[&str]) -> Vec<String> {
        let mut args = vec!["install".to_string(), "-y".to_string()];
        args.extend(packages.iter().map(|p| p.to_string()));
        args
    }

    /// Pick the first available manager in [`Self::PREFERENCE`] order.
    pub fn detect(find_command: &dyn Fn(&str) -> Option<PathBuf>) -> Option<PackageManager> {
        let found = Self::PREFERENCE
            .into_iter()
            .find(|pm| find_command(pm.binary()).is_some());
        tracing::debug!("Detected package manager: {:?}", found);
        found
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary())
    }
}
