//! Integration tests for the command-line interface.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Write a config that keeps every path inside `root`.
fn write_config(root: &Path) -> std::path::PathBuf {
    let config = format!(
        "repo_url: {}\ninstall_dir: {}\nlink_dir: {}\n",
        root.join("missing.git").display(),
        root.join("opt").display(),
        root.join("bin").display()
    );
    let path = root.join("config.yml");
    fs::write(&path, config).unwrap();
    path
}

fn installer() -> Command {
    let mut cmd = Command::new(cargo_bin("xui-installer"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    installer()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("uninstall"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    installer()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_rejects_unknown_subcommand() -> Result<(), Box<dyn std::error::Error>> {
    installer().arg("frobnicate").assert().failure();
    Ok(())
}

#[test]
fn completions_bash() -> Result<(), Box<dyn std::error::Error>> {
    installer()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("xui-installer"));
    Ok(())
}

#[test]
fn dry_run_prints_plan_and_changes_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let config = write_config(temp.path());

    installer()
        .args(["install", "--dry-run", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("pip3 install requests rich"))
        .stdout(predicate::str::contains("xui-manager"));

    assert!(!temp.path().join("opt").exists());
    assert!(!temp.path().join("bin").exists());
    Ok(())
}

#[test]
fn status_reports_missing_install() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let config = write_config(temp.path());

    installer()
        .args(["status", "--config"])
        .arg(&config)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is not installed"));
    Ok(())
}

#[test]
fn missing_config_file_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;

    installer()
        .args(["status", "--config"])
        .arg(temp.path().join("absent.yml"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration not found"));
    Ok(())
}

#[test]
fn malformed_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let config = temp.path().join("config.yml");
    fs::write(&config, "surprise_key: true\n")?;

    installer()
        .args(["install", "--dry-run", "--config"])
        .arg(&config)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn install_without_root_fails_before_changes() -> Result<(), Box<dyn std::error::Error>> {
    if unsafe { libc::geteuid() } == 0 {
        return Ok(());
    }
    let temp = TempDir::new()?;
    let config = write_config(temp.path());

    installer()
        .arg("--config")
        .arg(&config)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("root"));

    assert!(!temp.path().join("opt").exists());
    assert!(!temp.path().join("bin").exists());
    Ok(())
}

#[cfg(unix)]
#[test]
fn uninstall_without_root_fails() -> Result<(), Box<dyn std::error::Error>> {
    if unsafe { libc::geteuid() } == 0 {
        return Ok(());
    }
    let temp = TempDir::new()?;
    let config = write_config(temp.path());

    installer()
        .args(["uninstall", "--config"])
        .arg(&config)
        .assert()
        .code(1);
    Ok(())
}

/// Lay out `opt/xui_tui_app.py` and `bin/xui-manager` under `root`, linking
/// with the given target text.
#[cfg(unix)]
fn lay_out_install(root: &Path, link_target: &Path) {
    use std::os::unix::fs::PermissionsExt;

    fs::create_dir_all(root.join("opt")).unwrap();
    fs::create_dir_all(root.join("bin")).unwrap();
    let file = root.join("opt/xui_tui_app.py");
    fs::write(&file, "print('xui')\n").unwrap();
    fs::set_permissions(&file, fs::Permissions::from_mode(0o755)).unwrap();
    std::os::unix::fs::symlink(link_target, root.join("bin/xui-manager")).unwrap();
}

#[cfg(unix)]
#[test]
fn status_accepts_relative_dirs() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let config = write_config(temp.path());
    lay_out_install(temp.path(), &temp.path().join("opt/xui_tui_app.py"));

    installer()
        .current_dir(temp.path())
        .args(["status", "--install-dir", "opt", "--link-dir", "bin", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("links to the installed file"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn status_rejects_dangling_relative_link() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let config = write_config(temp.path());
    // Resolved from bin/ this text points at bin/opt/..., which does not exist.
    lay_out_install(temp.path(), Path::new("opt/xui_tui_app.py"));

    installer()
        .current_dir(temp.path())
        .args(["status", "--install-dir", "opt", "--link-dir", "bin", "--config"])
        .arg(&config)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("points to"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn dry_run_plans_absolute_paths_for_relative_dirs() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let config = write_config(temp.path());

    installer()
        .current_dir(temp.path())
        .args(["install", "--dry-run", "--install-dir", "opt", "--link-dir", "bin", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("/opt/xui_tui_app.py"))
        .stdout(predicate::str::contains(" opt/xui_tui_app.py").not());
    Ok(())
}

#[cfg(unix)]
#[test]
fn uninstall_accepts_relative_dirs_as_root() -> Result<(), Box<dyn std::error::Error>> {
    if unsafe { libc::geteuid() } != 0 {
        return Ok(());
    }
    let temp = TempDir::new()?;
    let config = write_config(temp.path());
    lay_out_install(temp.path(), &temp.path().join("opt/xui_tui_app.py"));

    installer()
        .current_dir(temp.path())
        .args(["uninstall", "--install-dir", "opt", "--link-dir", "bin", "--config"])
        .arg(&config)
        .assert()
        .success();

    assert!(fs::symlink_metadata(temp.path().join("bin/xui-manager")).is_err());
    assert!(!temp.path().join("opt").exists());
    Ok(())
}
