//! Error types for installer operations.
//!
//! This module defines [`InstallerError`], the error type used throughout
//! the installer, and a [`Result`] type alias for convenience.
//!
//! Every variant is fatal: the pipeline stops at the first error, the
//! temporary clone directory is dropped, and the process exits with status 1.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for installer operations.
#[derive(Debug, Error)]
pub enum InstallerError {
    /// The installer needs root but is running as an ordinary user.
    #[error("This operation must be run as root (try again with sudo)")]
    NotElevated,

    /// A requirement is missing and none of apt-get, yum or dnf is available.
    #[error("No supported package manager found to install '{requirement}' (tried apt-get, yum, dnf)")]
    NoPackageManager { requirement: String },

    /// A requirement is still missing after its install command ran.
    #[error("Missing requirement '{requirement}': {message}")]
    RequirementMissing {
        requirement: String,
        message: String,
    },

    /// An external command ran and exited non-zero.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// An external command could not be started at all.
    #[error("Failed to start {command}: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Cloning the remote repository failed.
    #[error("Failed to clone {url}: {message}")]
    CloneFailed { url: String, message: String },

    /// The file to install is not present in the cloned repository.
    #[error("Source file not found in repository: {path}")]
    SourceMissing { path: PathBuf },

    /// A filesystem operation on a specific path failed.
    #[error("Failed to {action} {path}: {source}")]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse the configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// The resolved configuration cannot be installed as given.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl InstallerError {
    /// Wrap an IO error with the action and path it happened on.
    pub fn filesystem(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Filesystem {
            action,
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for installer operations.
pub type Result<T> = std::result::Result<T, InstallerError>;
