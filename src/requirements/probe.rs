//! Command-existence probe.
//!
//! Answers "does this command resolve on PATH?" by walking the PATH
//! entries directly. The `which` command is not used: it is sometimes a
//! shell builtin and its behavior varies across systems.
//!
//! # Example
//!
//! ```no_run
//! use xui_installer::requirements::probe::find_command;
//!
//! if let Some(path) = find_command("git") {
//!     println!("git is at {}", path.display());
//! }
//! ```

use std::path::{Path, PathBuf};

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On non-Unix platforms executability is not tracked in permission bits.
#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Resolve a command's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    for dir in path_entries {
        let candidate = dir.join(tool);
        if candidate.is_file() && is_executable(&candidate) {
            return Some(candidate);
        }
    }
    None
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Find a command on the current PATH.
///
/// PATH is re-read on every call so that binaries installed by a package
/// manager earlier in the run are picked up.
pub fn find_command(tool: &str) -> Option<PathBuf> {
    let found = resolve_tool_path(tool, &parse_system_path());
    tracing::debug!("Probe '{}': {:?}", tool, found);
    found
}
