//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::constants::{defaults, limits, orientations, output_formats};
use crate::core::error::{Result, TetReportError};
use crate::model::CoercionPolicy;
use crate::summary::SummaryRule;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the autosaved draft
    pub drafts_dir: Option<String>,

    /// PNG logo embedded at the top of the printable report
    pub logo_path: Option<String>,

    /// Printable page orientation (landscape, portrait)
    pub orientation: Option<String>,

    /// Output format (text, json, minimal)
    pub output_format: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,

    /// What to do with numeric input that cannot be accepted (reject, coerce)
    pub invalid_numeric: Option<CoercionPolicy>,

    /// Bank and administrative charges pre-filled on a new report
    pub bank_charges_amount: Option<f64>,

    /// Aggregation rule for the summary figures
    pub summary: Option<SummaryRule>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            drafts_dir: Some(defaults::DRAFTS_DIR.to_string()),
            logo_path: None,
            orientation: Some(orientations::DEFAULT.to_string()),
            output_format: Some(output_formats::DEFAULT.to_string()),
            verbose: Some(false),
            invalid_numeric: Some(CoercionPolicy::default()),
            bank_charges_amount: Some(defaults::BANK_CHARGES_AMOUNT),
            summary: Some(SummaryRule::default()),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            TetReportError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            TetReportError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        // Validate the loaded configuration
        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        // Check for .tetreport.toml in current directory
        if let Ok(config) = Self::load_from_file(defaults::CONFIG_FILE) {
            return config;
        }

        // Check for .tetreport.toml in parent directories (up to 3 levels)
        for i in 1..=3 {
            let path = format!("{}{}", "../".repeat(i), defaults::CONFIG_FILE);
            if let Ok(config) = Self::load_from_file(&path) {
                return config;
            }
        }

        // Fall back to defaults
        Self::default()
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        if let Some(ref drafts_dir) = cli_config.drafts_dir {
            self.drafts_dir = Some(drafts_dir.clone());
        }
        if let Some(ref logo_path) = cli_config.logo_path {
            self.logo_path = Some(logo_path.clone());
        }
        if let Some(ref orientation) = cli_config.orientation {
            self.orientation = Some(orientation.clone());
        }

        // Output & format
        if cli_config.verbose {
            self.verbose = Some(true);
        }
        if let Some(ref output_format) = cli_config.output_format {
            self.output_format = Some(output_format.clone());
        }

        if cli_config.coerce_invalid {
            self.invalid_numeric = Some(CoercionPolicy::Coerce);
        }
    }

    pub fn drafts_dir(&self) -> PathBuf {
        PathBuf::from(self.drafts_dir.as_deref().unwrap_or(defaults::DRAFTS_DIR))
    }

    pub fn orientation(&self) -> &str {
        self.orientation.as_deref().unwrap_or(orientations::DEFAULT)
    }

    pub fn coercion_policy(&self) -> CoercionPolicy {
        self.invalid_numeric.unwrap_or_default()
    }

    pub fn bank_charges_amount(&self) -> f64 {
        self.bank_charges_amount
            .unwrap_or(defaults::BANK_CHARGES_AMOUNT)
    }

    pub fn summary_rule(&self) -> SummaryRule {
        self.summary.unwrap_or_default()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(ref orientation) = self.orientation
            && !orientations::ALL.contains(&orientation.to_lowercase().as_str())
        {
            return Err(TetReportError::Config(format!(
                "Invalid orientation '{orientation}'. Expected one of: {}.",
                orientations::ALL.join(", ")
            )));
        }

        if let Some(ref format) = self.output_format
            && !output_formats::ALL.contains(&format.as_str())
        {
            return Err(TetReportError::Config(format!(
                "Invalid output format '{format}'. Expected one of: {}.",
                output_formats::ALL.join(", ")
            )));
        }

        if let Some(amount) = self.bank_charges_amount
            && !(amount.is_finite() && amount >= limits::MIN_AMOUNT)
        {
            return Err(TetReportError::Config(format!(
                "Bank charges amount {amount} is invalid. Expected a non-negative number."
            )));
        }

        if let Some(ref rule) = self.summary {
            let threshold = rule.completion_threshold;
            if !(threshold > limits::MIN_PERCENTAGE && threshold <= limits::MAX_PERCENTAGE) {
                return Err(TetReportError::Config(format!(
                    "Completion threshold {threshold}% is invalid. Expected a value above 0 and at most 100."
                )));
            }
        }

        if let Some(ref drafts_dir) = self.drafts_dir
            && drafts_dir.trim().is_empty()
        {
            return Err(TetReportError::Config(
                "Drafts directory cannot be empty.".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    pub drafts_dir: Option<String>,    // --drafts-dir
    pub logo_path: Option<String>,     // --logo
    pub orientation: Option<String>,   // export html --orientation
    pub coerce_invalid: bool,          // --coerce-invalid

    // Output & format
    pub quiet: bool,                   // --quiet
    pub verbose: bool,                 // --verbose
    pub output_format: Option<String>, // --format

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}
