//! Install orchestration.

pub mod pipeline;

pub use pipeline::{
    app_config_path, show_post_install_notes, InstallOptions, InstallPipeline, InstallReport,
    APP_CONFIG_FILE,
};
