// Command-line interface definitions and parsing for tetreport

use crate::config::CliConfig;
use crate::core::constants::{orientations, output_formats};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    // Draft
    /// Draft file to edit instead of the autosave in the drafts directory
    #[arg(long, global = true, value_name = "FILE", help_heading = "Draft")]
    pub draft: Option<PathBuf>,

    /// Directory holding the autosaved draft (default: drafts)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Draft")]
    pub drafts_dir: Option<String>,

    // Input
    /// Blank invalid numeric input with a warning instead of rejecting it
    #[arg(long, global = true, help_heading = "Input")]
    pub coerce_invalid: bool,

    /// PNG logo embedded in the printable report
    #[arg(long, global = true, value_name = "FILE", help_heading = "Input")]
    pub logo: Option<String>,

    // Output & Verbosity
    /// Suppress everything except errors
    #[arg(short = 'q', long, global = true, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Output format (default: text)
    #[arg(long, global = true, value_name = "FORMAT", value_parser = output_formats::ALL, help_heading = "Output & Verbosity")]
    pub format: Option<String>,

    // Configuration
    /// Use specific config file
    #[arg(long, global = true, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, global = true, help_heading = "Configuration")]
    pub no_config: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start a new empty report, replacing the current draft
    New,
    /// Print the report and its summary
    Show,
    /// Print the summary figures only
    Summary,
    /// Edit the institution details
    #[command(subcommand)]
    Institution(InstitutionCommand),
    /// Edit the projects monitoring table
    #[command(subcommand)]
    Project(ProjectCommand),
    /// Edit the monitoring team
    #[command(subcommand)]
    Team(TeamCommand),
    /// Bank and administrative charges
    #[command(subcommand)]
    Charges(ChargesCommand),
    /// Edit the DM&E approval
    #[command(subcommand)]
    Approval(ApprovalCommand),
    /// Check the report is ready for the printable export
    Validate,
    /// Export the report
    #[command(subcommand)]
    Export(ExportCommand),
    /// Fill in the report with interactive prompts
    Form,
    /// Discard the current draft
    Reset,
    /// Generate shell completions
    #[command(name = "completion-generate", arg_required_else_help = true)]
    CompletionGenerate {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum InstitutionCommand {
    /// Set name, location, code, year or date (YYYY-MM-DD)
    Set {
        field: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

#[derive(Subcommand)]
pub enum ProjectCommand {
    /// Append a project row
    Add { description: Option<String> },
    /// Remove the project at POSITION, or the last one
    Remove { position: Option<usize> },
    /// Set one column of the project at POSITION
    Set {
        position: usize,
        field: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

#[derive(Subcommand)]
pub enum TeamCommand {
    /// Add a team member
    Add { name: String, designation: String },
    /// Remove the last team member
    Remove,
    /// Set the name or designation of the member at POSITION
    Set {
        position: usize,
        field: String,
        value: String,
    },
}

#[derive(Subcommand)]
pub enum ChargesCommand {
    /// Add the charges to the totals and the printed table
    Include,
    /// Leave the charges out
    Exclude,
    /// Set the charges amount
    Amount {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

#[derive(Subcommand)]
pub enum ApprovalCommand {
    /// Set status, officer, date (YYYY-MM-DD) or comments
    Set { field: String, value: String },
}

#[derive(Subcommand)]
pub enum ExportCommand {
    /// Printable HTML report
    Html {
        /// Output file (default: TETFUND_Report_<Institution>_<timestamp>.html)
        #[arg(short = 'o', long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Page orientation (default: landscape)
        #[arg(long, value_parser = orientations::ALL)]
        orientation: Option<String>,
    },
    /// Directory of CSV sheets
    Csv {
        /// Output directory (default: TETFUND_Report_<timestamp>)
        #[arg(short = 'o', long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
    /// Report and summary as JSON
    Json {
        /// Output file (default: TETFUND_Report_<timestamp>.json)
        #[arg(short = 'o', long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

impl Commands {
    /// Whether the command changes the draft and must save it afterwards
    pub fn modifies_draft(&self) -> bool {
        matches!(
            self,
            Commands::New
                | Commands::Institution(_)
                | Commands::Project(_)
                | Commands::Team(_)
                | Commands::Charges(_)
                | Commands::Approval(_)
                | Commands::Form
        )
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Convert derive-based CLI arguments directly to CliConfig structure
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    let orientation = match cli.command {
        Commands::Export(ExportCommand::Html {
            ref orientation, ..
        }) => non_empty(orientation),
        _ => None,
    };

    CliConfig {
        drafts_dir: non_empty(&cli.drafts_dir),
        logo_path: non_empty(&cli.logo),
        orientation,
        coerce_invalid: cli.coerce_invalid,
        quiet: cli.quiet,
        verbose: cli.verbose,
        output_format: cli.format.clone(),
        config_file: non_empty(&cli.config),
        no_config: cli.no_config,
    }
}
