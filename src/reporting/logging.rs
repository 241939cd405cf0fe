use crate::config::Config;
use chrono::{DateTime, Local};
use log::{debug, error, info, warn};
use std::path::Path;

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    // try_init: the logger may already be set when embedded or under test
    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .try_init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    let rule = config.summary_rule();
    info!(
        "Configuration: drafts_dir={}, orientation={}, invalid_numeric={:?}",
        config.drafts_dir().display(),
        config.orientation(),
        config.coercion_policy()
    );
    info!(
        "Summary rule: completion_threshold={}%, disbursement_basis={:?}",
        rule.completion_threshold, rule.disbursement_basis
    );
    if let Some(ref logo) = config.logo_path {
        debug!("Logo: {logo}");
    }
}

pub fn log_draft_loaded(path: &Path, saved_at: &DateTime<Local>) {
    info!(
        "Loaded draft {} (saved {})",
        path.display(),
        saved_at.format("%Y-%m-%d %H:%M:%S")
    );
}

pub fn log_draft_missing(path: &Path) {
    debug!("No draft at {}, starting an empty report", path.display());
}

pub fn log_draft_saved(path: &Path) {
    debug!("Draft saved to {}", path.display());
}

/// Log a field edit
pub fn log_edit(section: &str, detail: &str) {
    info!("Edited {section}: {detail}");
}

/// Log a completed export
pub fn log_export(kind: &str, path: &Path) {
    info!("Exported {kind} report to {}", path.display());
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}

/// Log warning information
pub fn log_warning(message: &str) {
    warn!("{message}");
}
