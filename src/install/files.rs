//! Filesystem operations for placing and linking the tool.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{InstallerError, Result};

/// Permission bits given to the installed tool.
#[cfg(unix)]
pub const INSTALLED_MODE: u32 = 0o755;

/// Anchor a relative path at the current directory.
///
/// Symlinks store their target verbatim, so everything that ends up in a
/// link has to be absolute first.
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| InstallerError::filesystem("resolve path", path, e))
}

/// Create a directory and its parents. Existing directories are fine.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| InstallerError::filesystem("create directory", dir, e))?;
    tracing::debug!("Ensured directory {}", dir.display());
    Ok(())
}

/// Copy `source` to `dest`, replacing any previous copy, and mark it executable.
///
/// Returns the number of bytes copied.
pub fn copy_executable(source: &Path, dest: &Path) -> Result<u64> {
    if !source.is_file() {
        return Err(InstallerError::SourceMissing {
            path: source.to_path_buf(),
        });
    }

    let bytes =
        fs::copy(source, dest).map_err(|e| InstallerError::filesystem("copy file to", dest, e))?;
    tracing::debug!("Copied {} -> {} ({} bytes)", source.display(), dest.display(), bytes);

    set_executable(dest)?;
    Ok(bytes)
}

#[cfg(unix)]
fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(INSTALLED_MODE))
        .map_err(|e| InstallerError::filesystem("set permissions on", path, e))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> Result<()> {
    Ok(())
}

/// Create `link` pointing at `target`, replacing an existing file or symlink.
///
/// A real directory at `link` is never removed.
pub fn replace_symlink(target: &Path, link: &Path) -> Result<()> {
    if let Some(parent) = link.parent() {
        ensure_dir(parent)?;
    }

    if let Ok(meta) = fs::symlink_metadata(link) {
        if meta.is_dir() {
            return Err(InstallerError::filesystem(
                "replace symlink",
                link,
                std::io::Error::other("a directory exists at the link path"),
            ));
        }
        fs::remove_file(link)
            .map_err(|e| InstallerError::filesystem("remove existing link", link, e))?;
        tracing::debug!("Removed existing {}", link.display());
    }

    create_symlink(target, link)
        .map_err(|e| InstallerError::filesystem("create symlink", link, e))?;
    tracing::debug!("Linked {} -> {}", link.display(), target.display());
    Ok(())
}

#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}

/// Whether `link` is a symlink that resolves to `target`.
///
/// A relative link target is read from the link's own directory.
pub fn link_points_to(link: &Path, target: &Path) -> bool {
    let Ok(dest) = fs::read_link(link) else {
        return false;
    };
    let dest = match link.parent() {
        Some(parent) if dest.is_relative() => parent.join(dest),
        _ => dest,
    };
    if dest == target {
        return true;
    }
    match (fs::canonicalize(link), fs::canonicalize(target)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Where `path` lives once symlinked parent directories are resolved.
///
/// Falls back to the path itself while the parent does not exist yet.
pub fn resolved_location(path: &Path) -> PathBuf {
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => fs::canonicalize(parent)
            .map(|dir| dir.join(name))
            .unwrap_or_else(|_| path.to_path_buf()),
        _ => path.to_path_buf(),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    #[test]
    fn ensure_dir_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("opt/tool");
        ensure_dir(&dir).unwrap();
        ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn copy_executable_sets_mode() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("tool.py");
        let dest = temp.path().join("installed.py");
        fs::write(&source, "print('hi')\n").unwrap();
        fs::set_permissions(&source, fs::Permissions::from_mode(0o644)).unwrap();

        let bytes = copy_executable(&source, &dest).unwrap();

        assert_eq!(bytes, 12);
        let mode = fs::metadata(&dest).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, INSTALLED_MODE);
        assert_eq!(fs::read(&dest).unwrap(), fs::read(&source).unwrap());
    }

    #[test]
    fn copy_executable_overwrites_previous_copy() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("tool.py");
        let dest = temp.path().join("installed.py");
        fs::write(&dest, "old").unwrap();
        fs::write(&source, "new").unwrap();

        copy_executable(&source, &dest).unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "new");
    }

    #[test]
    fn copy_executable_missing_source() {
        let temp = TempDir::new().unwrap();
        let err = copy_executable(&temp.path().join("nope.py"), &temp.path().join("out"))
            .unwrap_err();
        assert!(matches!(err, InstallerError::SourceMissing { .. }));
    }

    #[test]
    fn replace_symlink_creates_and_replaces() {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("first");
        let second = temp.path().join("second");
        fs::write(&first, "1").unwrap();
        fs::write(&second, "2").unwrap();
        let link = temp.path().join("bin/tool");

        replace_symlink(&first, &link).unwrap();
        assert!(link_points_to(&link, &first));

        replace_symlink(&second, &link).unwrap();
        assert!(link_points_to(&link, &second));
        assert_eq!(fs::read_to_string(&link).unwrap(), "2");
    }

    #[test]
    fn replace_symlink_replaces_regular_file() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("target");
        let link = temp.path().join("tool");
        fs::write(&target, "t").unwrap();
        fs::write(&link, "stale copy").unwrap();

        replace_symlink(&target, &link).unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    }

    #[test]
    fn replace_symlink_replaces_dangling_link() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("target");
        let link = temp.path().join("tool");
        fs::write(&target, "t").unwrap();
        std::os::unix::fs::symlink(temp.path().join("gone"), &link).unwrap();

        replace_symlink(&target, &link).unwrap();

        assert!(link_points_to(&link, &target));
    }

    #[test]
    fn replace_symlink_refuses_directory() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("target");
        let link = temp.path().join("tool");
        fs::write(&target, "t").unwrap();
        fs::create_dir(&link).unwrap();

        let err = replace_symlink(&target, &link).unwrap_err();

        assert!(matches!(err, InstallerError::Filesystem { .. }));
        assert!(link.is_dir());
    }

    #[test]
    fn link_points_to_is_false_for_other_targets() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a");
        let b = temp.path().join("b");
        fs::write(&a, "a").unwrap();
        fs::write(&b, "b").unwrap();
        let link = temp.path().join("link");
        std::os::unix::fs::symlink(&a, &link).unwrap();

        assert!(link_points_to(&link, &a));
        assert!(!link_points_to(&link, &b));
        assert!(!link_points_to(&a, &a));
    }

    #[test]
    fn relative_link_target_is_read_from_link_dir() {
        let temp = TempDir::new().unwrap();
        let opt = temp.path().join("opt");
        let bin = temp.path().join("bin");
        fs::create_dir_all(&opt).unwrap();
        fs::create_dir_all(&bin).unwrap();
        let target = opt.join("tool.py");
        fs::write(&target, "t").unwrap();
        let link = bin.join("tool");
        std::os::unix::fs::symlink("../opt/tool.py", &link).unwrap();

        assert!(link_points_to(&link, &target));
    }

    #[test]
    fn dangling_relative_link_does_not_count() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("opt/tool.py");
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        fs::write(&target, "t").unwrap();
        let link = temp.path().join("bin/tool");
        fs::create_dir_all(link.parent().unwrap()).unwrap();
        // Same text as the target path, but resolved from bin/ it dangles.
        std::os::unix::fs::symlink("opt/tool.py", &link).unwrap();

        assert!(!link_points_to(&link, &target));
        assert!(!link_points_to(&link, Path::new("opt/tool.py")));
    }

    #[test]
    fn absolute_path_anchors_at_current_dir() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(absolute_path(Path::new("opt/tool")).unwrap(), cwd.join("opt/tool"));
        assert_eq!(absolute_path(Path::new("/usr/local/bin")).unwrap(), PathBuf::from("/usr/local/bin"));
    }

    #[test]
    fn resolved_location_follows_symlinked_parent() {
        let temp = TempDir::new().unwrap();
        let real = temp.path().join("real");
        fs::create_dir_all(&real).unwrap();
        let alias = temp.path().join("alias");
        std::os::unix::fs::symlink(&real, &alias).unwrap();

        assert_eq!(
            resolved_location(&alias.join("tool")),
            resolved_location(&real.join("tool"))
        );
        let missing = temp.path().join("missing/tool");
        assert_eq!(resolved_location(&missing), missing);
    }
}
