//! Entry point shared by `merge-translations` and `fix-translations`.

use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::ConfigManager;
use crate::runner::{
    run_merge,
    run_sanitize,
};

/// Which maintenance pass to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// Deep-merge overlays into each locale file
    Merge,
    /// Remove numeric keys from the configured mapping
    Sanitize,
}

/// Load configuration from `root` and run `tool` over every configured file.
///
/// Returns failure if the configuration is invalid or any file failed.
#[must_use]
pub fn run(tool: Tool, root: PathBuf) -> ExitCode {
    let config_manager = match ConfigManager::load(root) {
        Ok(manager) => manager,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let root = config_manager.root();
    let settings = config_manager.settings();

    let report = match tool {
        Tool::Merge => match run_merge(root, settings) {
            Ok(report) => report,
            Err(e) => {
                tracing::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        Tool::Sanitize => run_sanitize(root, settings),
    };

    if report.has_failures() { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

/// [`run`] rooted at the current working directory.
#[must_use]
pub fn run_in_current_dir(tool: Tool) -> ExitCode {
    match std::env::current_dir() {
        Ok(root) => run(tool, root),
        Err(e) => {
            tracing::error!("Failed to determine current directory: {e}");
            ExitCode::FAILURE
        }
    }
}
