//! Git repository fetching into a scoped temporary directory.
//!
//! [`CloneWorkspace`] owns a freshly created, uniquely named temporary
//! directory and deletes it when dropped. Every exit path of the install
//! pipeline (success, early `?` return, or panic unwind) therefore removes
//! the clone without explicit per-branch cleanup.

use std::path::{Path, PathBuf};

use anyhow::bail;
use tempfile::TempDir;

use crate::error::{InstallerError, Result};
use crate::shell::HostContext;

/// Prefix of temporary clone directories.
const WORKSPACE_PREFIX: &str = "xui-installer-";

/// Temporary directory holding one clone.
#[derive(Debug)]
pub struct CloneWorkspace {
    dir: TempDir,
}

impl CloneWorkspace {
    /// Create a fresh workspace under `parent`, or the system temp dir.
    pub fn create(parent: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(WORKSPACE_PREFIX);

        let dir = match parent {
            Some(parent) => builder
                .tempdir_in(parent)
                .map_err(|e| InstallerError::filesystem("create temporary directory in", parent, e))?,
            None => builder.tempdir().map_err(|e| {
                InstallerError::filesystem("create temporary directory in", std::env::temp_dir(), e)
            })?,
        };

        tracing::debug!("Created clone workspace {}", dir.path().display());
        Ok(Self { dir })
    }

    /// Root of the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Where the repository is cloned inside the workspace.
    pub fn repo_path(&self) -> PathBuf {
        self.dir.path().join("repo")
    }

    /// Remove the workspace now, reporting any failure.
    ///
    /// Dropping the workspace also removes it but swallows errors.
    pub fn close(self) -> Result<()> {
        let path = self.dir.path().to_path_buf();
        tracing::debug!("Removing clone workspace {}", path.display());
        self.dir
            .close()
            .map_err(|e| InstallerError::filesystem("remove temporary directory", path, e))
    }
}

/// Information about a completed clone.
#[derive(Debug)]
pub struct GitFetchResult {
    /// Path to the cloned working copy.
    pub local_path: PathBuf,
    /// Commit SHA of the cloned HEAD, when it could be read.
    pub commit_sha: Option<String>,
}

/// Clones repositories with the `git` client.
pub struct GitFetcher<'a> {
    host: &'a HostContext,
}

impl<'a> GitFetcher<'a> {
    /// Create a new git fetcher.
    pub fn new(host: &'a HostContext) -> Self {
        Self { host }
    }

    /// Shallow-clone `url` into the workspace.
    pub fn fetch(&self, url: &str, workspace: &CloneWorkspace) -> Result<GitFetchResult> {
        let repo_path = workspace.repo_path();
        let args = vec![
            "clone".to_string(),
            "--depth".to_string(),
            "1".to_string(),
            url.to_string(),
            repo_path.to_string_lossy().to_string(),
        ];

        let result = self.host.run("git", &args).map_err(|e| InstallerError::CloneFailed {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        if !result.success {
            let stderr = result.stderr.trim();
            return Err(InstallerError::CloneFailed {
                url: url.to_string(),
                message: if stderr.is_empty() {
                    format!("git exited with code {:?}", result.exit_code)
                } else {
                    stderr.to_string()
                },
            });
        }

        let commit_sha = match self.head_sha(&repo_path) {
            Ok(sha) => Some(sha),
            Err(e) => {
                tracing::debug!("Could not read cloned HEAD: {}", e);
                None
            }
        };
        tracing::info!("Cloned {} at {}", url, commit_sha.as_deref().unwrap_or("unknown commit"));

        Ok(GitFetchResult {
            local_path: repo_path,
            commit_sha,
        })
    }

    fn head_sha(&self, repo_path: &Path) -> anyhow::Result<String> {
        let args = vec![
            "-C".to_string(),
            repo_path.to_string_lossy().to_string(),
            "rev-parse".to_string(),
            "HEAD".to_string(),
        ];
        let result = self.host.run("git", &args)?;
        if !result.success {
            bail!("git rev-parse exited with {:?}", result.exit_code);
        }
        let sha = result.stdout.trim();
        if sha.is_empty() {
            bail!("git rev-parse printed nothing");
        }
        Ok(sha.to_string())
    }
}
