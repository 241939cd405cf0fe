/// Application-wide constants to avoid magic values throughout the codebase.
///
/// This module centralizes the literal strings and numbers shared by the
/// model, the summary calculator and the exporters.
/// Output format constants
pub mod output_formats {
    /// Text output format - colorful output with section headers
    pub const TEXT: &str = "text";
    /// JSON output format - structured output for automation
    pub const JSON: &str = "json";
    /// Minimal output format - plain key/value lines without colors
    pub const MINIMAL: &str = "minimal";

    /// Default output format
    pub const DEFAULT: &str = TEXT;

    /// All valid output formats
    pub const ALL: [&str; 3] = [TEXT, JSON, MINIMAL];
}

/// Printable page orientation names
pub mod orientations {
    pub const LANDSCAPE: &str = "landscape";
    pub const PORTRAIT: &str = "portrait";

    pub const DEFAULT: &str = LANDSCAPE;

    pub const ALL: [&str; 2] = [LANDSCAPE, PORTRAIT];
}

/// Default values for a new report and the summary rule
pub mod defaults {
    /// Bank and administrative charges pre-filled in the form (naira)
    pub const BANK_CHARGES_AMOUNT: f64 = 215_013.00;
    /// A project counts as completed at or above this completion percentage
    pub const COMPLETION_THRESHOLD: f64 = 100.0;
    /// Description given to a newly added project row
    pub const PROJECT_DESCRIPTION: &str = "New Project";
    /// Recommendation given to a newly added project row
    pub const RECOMMENDATION: &str = "Pending Review";
    /// Directory holding working drafts
    pub const DRAFTS_DIR: &str = "drafts";
    /// File name of the autosaved draft
    pub const AUTOSAVE_FILE: &str = "autosave.json";
    /// Name of the configuration file searched for in standard locations
    pub const CONFIG_FILE: &str = ".tetreport.toml";
}

/// Numeric field limits
pub mod limits {
    /// Maximum percentage value
    pub const MAX_PERCENTAGE: f64 = 100.0;
    /// Minimum percentage value
    pub const MIN_PERCENTAGE: f64 = 0.0;
    /// Minimum monetary amount
    pub const MIN_AMOUNT: f64 = 0.0;
}

/// Fixed wording of the printed report
pub mod report_text {
    pub const FUND_NAME: &str = "TERTIARY EDUCATION TRUST FUND";
    pub const DEPARTMENT: &str = "Monitoring & Evaluation Department";
    pub const REPORT_TITLE: &str = "Second / Final Tranche Monitoring Report";
    pub const BANK_CHARGES_PROJECT: &str = "Bank and Administrative Charges";
    pub const BANK_CHARGES_OBSERVATION: &str = "Administrative charges";
    pub const BANK_CHARGES_RECOMMENDATION: &str = "Processed";
    pub const NO_COMMENTS: &str = "No comments provided";
    pub const NOT_APPLICABLE: &str = "N/A";
    pub const FILE_PREFIX: &str = "TETFUND_Report";
    pub const CURRENCY_SYMBOL: &str = "₦";
}

/// Display and formatting constants
pub mod display {
    /// Emoji for success status
    pub const SUCCESS_EMOJI: &str = "✅";
    /// Emoji for warning status
    pub const WARNING_EMOJI: &str = "⚠️";
    /// Emoji for error status
    pub const ERROR_EMOJI: &str = "❌";
    /// Emoji for the institution section
    pub const INSTITUTION_EMOJI: &str = "🏢";
    /// Emoji for the projects section
    pub const PROJECTS_EMOJI: &str = "🏗️";
    /// Emoji for the monitoring team section
    pub const TEAM_EMOJI: &str = "👥";
    /// Emoji for the summary section
    pub const SUMMARY_EMOJI: &str = "📊";
    /// Emoji for exported files
    pub const FILE_EMOJI: &str = "📄";
}
