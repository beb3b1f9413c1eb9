//! Installer configuration.
//!
//! - Schema definitions and built-in defaults in [`schema`]
//! - File discovery, loading and CLI overrides in [`loader`]
//!
//! # Example
//!
//! ```
//! use xui_installer::config::InstallConfig;
//!
//! let config = InstallConfig::default();
//! assert_eq!(config.link_name, "xui-manager");
//! assert!(config.installed_path().ends_with("xui_tui_app.py"));
//! ```

pub mod loader;
pub mod schema;

pub use loader::{
    load_config, load_config_file, load_config_from, parse_config, ConfigOverrides,
    SYSTEM_CONFIG_PATH,
};
pub use schema::{
    InstallConfig, Requirement, DEFAULT_INSTALL_DIR, DEFAULT_LINK_DIR, DEFAULT_LINK_NAME,
    DEFAULT_REPO_URL, DEFAULT_SOURCE_FILE,
};
