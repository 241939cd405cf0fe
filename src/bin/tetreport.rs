use chrono::Local;
use clap::{CommandFactory, Parser};
use tetreport::config::{CliConfig, Config};
use tetreport::core::constants::{display, output_formats};
use tetreport::core::error::Result;
use tetreport::drafts::DraftStore;
use tetreport::export::html::load_logo_or_warn;
use tetreport::export::{
    JsonDocument, Orientation, PrintableReport, ReportDocument, default_html_filename,
    default_json_filename, default_workbook_dirname, write_workbook,
};
use tetreport::model::{CoercionPolicy, InspectionReport};
use tetreport::reporting::logging;
use tetreport::summary::SummaryCalculator;
use tetreport::ui::cli::{
    ApprovalCommand, ChargesCommand, ExportCommand, InstitutionCommand, ProjectCommand,
    TeamCommand,
};
use tetreport::ui::completion::print_completions;
use tetreport::ui::output;
use tetreport::ui::{Cli, Commands, ReportForm, cli_to_config};
use tetreport::validation::check_readiness;

use std::path::{Path, PathBuf};

fn main() {
    let cli = Cli::parse();

    // Handle completion commands first
    if let Some(exit_code) = handle_completion_commands(&cli) {
        std::process::exit(exit_code);
    }

    match run_tetreport_logic(&cli) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Handle completion commands and return exit code if a completion command was processed
pub fn handle_completion_commands(cli: &Cli) -> Option<i32> {
    match cli.command {
        Commands::CompletionGenerate { shell } => {
            let mut app = Cli::command();
            print_completions(shell, &mut app);
            Some(0)
        }
        _ => None,
    }
}

/// Main report logic extracted from main() for testing
pub fn run_tetreport_logic(cli: &Cli) -> Result<i32> {
    let cli_config = cli_to_config(cli);

    let config = load_and_merge_config(&cli_config)?;

    let output_settings = setup_output_settings(&cli_config, &config);
    logging::init_logger(output_settings.verbose, output_settings.quiet);
    logging::log_config_info(&config);

    let store = draft_store(cli, &config);
    let calculator = SummaryCalculator::new(config.summary_rule());
    let today = Local::now().date_naive();
    let fresh_report = || InspectionReport::new(today, config.bank_charges_amount());

    match cli.command {
        Commands::Reset => {
            let message = if store.discard()? {
                format!("Draft {} discarded", store.path().display())
            } else {
                "No draft to discard".to_string()
            };
            output_settings.success(&message);
            return Ok(0);
        }
        Commands::New => {
            store.save(&fresh_report())?;
            output_settings.success(&format!("Started a new report in {}", store.path().display()));
            return Ok(0);
        }
        _ => {}
    }

    let mut report = store.load_or_else(fresh_report)?;

    let exit_code = match cli.command {
        Commands::Show => {
            let summary = calculator.calculate(&report);
            output::display_report(&report, &summary, &output_settings.output_format)?;
            0
        }
        Commands::Summary => {
            let summary = calculator.calculate(&report);
            output::display_summary(&summary, &output_settings.output_format)?;
            0
        }
        Commands::Validate => {
            let readiness = check_readiness(&report);
            output::display_readiness(&readiness, &output_settings.output_format)?;
            if readiness.is_ready() { 0 } else { 1 }
        }
        Commands::Export(ref export) => {
            run_export(export, &report, &calculator, &config, &output_settings)?;
            0
        }
        Commands::Form => {
            ReportForm::new(config.coercion_policy(), calculator.clone())
                .with_autosave(store.clone())
                .run(&mut report)?;
            0
        }
        ref edit => {
            let message = apply_edit(edit, &mut report, config.coercion_policy())?;
            logging::log_edit("report", &message);
            output_settings.success(&message);
            0
        }
    };

    if cli.command.modifies_draft() {
        store.save(&report)?;
        if !output_settings.quiet {
            let summary = calculator.calculate(&report);
            output::display_summary(&summary, &output_settings.output_format)?;
        }
    }

    Ok(exit_code)
}

/// Apply a single editing command to the report, returning a confirmation message
pub fn apply_edit(
    command: &Commands,
    report: &mut InspectionReport,
    policy: CoercionPolicy,
) -> Result<String> {
    let message = match command {
        Commands::Institution(InstitutionCommand::Set { field, value }) => {
            report.set_institution_field(field, value)?;
            format!("Institution {field} set")
        }
        Commands::Project(ProjectCommand::Add { description }) => {
            let position = report.add_project(description.as_deref());
            format!("Added project {position}")
        }
        Commands::Project(ProjectCommand::Remove { position }) => {
            let removed = match position {
                Some(position) => Some(report.remove_project(*position)?),
                None => report.remove_last_project(),
            };
            match removed {
                Some(project) => format!("Removed project '{}'", project.project),
                None => "There are no projects to remove".to_string(),
            }
        }
        Commands::Project(ProjectCommand::Set {
            position,
            field,
            value,
        }) => {
            report.set_project_field(*position, field, value, policy)?;
            format!("Project {position} {field} set")
        }
        Commands::Team(TeamCommand::Add { name, designation }) => {
            let position = report.add_team_member(name, designation);
            format!("Added team member {position}")
        }
        Commands::Team(TeamCommand::Remove) => match report.remove_last_team_member() {
            Some(member) => format!("Removed team member '{}'", member.name),
            None => "There are no team members to remove".to_string(),
        },
        Commands::Team(TeamCommand::Set {
            position,
            field,
            value,
        }) => {
            report.set_team_field(*position, field, value)?;
            format!("Team member {position} {field} set")
        }
        Commands::Charges(ChargesCommand::Include) => {
            report.set_bank_charges_included(true);
            "Bank charges included".to_string()
        }
        Commands::Charges(ChargesCommand::Exclude) => {
            report.set_bank_charges_included(false);
            "Bank charges excluded".to_string()
        }
        Commands::Charges(ChargesCommand::Amount { value }) => {
            report.set_bank_charges_amount(value, policy)?;
            "Bank charges amount set".to_string()
        }
        Commands::Approval(ApprovalCommand::Set { field, value }) => {
            report.set_approval_field(field, value)?;
            format!("Approval {field} set")
        }
        _ => String::new(),
    };
    Ok(message)
}

fn run_export(
    export: &ExportCommand,
    report: &InspectionReport,
    calculator: &SummaryCalculator,
    config: &Config,
    output_settings: &OutputSettings,
) -> Result<()> {
    let now = Local::now();
    let (kind, path) = match export {
        ExportCommand::Html { out, .. } => {
            let path = out
                .clone()
                .unwrap_or_else(|| PathBuf::from(default_html_filename(report, &now)));
            let orientation: Orientation = config.orientation().parse()?;
            let doc = ReportDocument::new(report, calculator, orientation)
                .with_logo(load_logo_or_warn(config.logo_path.as_deref()))
                .with_generated_at(now);
            PrintableReport::write(&doc, &path)?;
            ("printable report", path)
        }
        ExportCommand::Csv { out } => {
            let dir = out
                .clone()
                .unwrap_or_else(|| PathBuf::from(default_workbook_dirname(&now)));
            write_workbook(&dir, report, &calculator.calculate(report))?;
            ("CSV workbook", dir)
        }
        ExportCommand::Json { out } => {
            let path = out
                .clone()
                .unwrap_or_else(|| PathBuf::from(default_json_filename(&now)));
            JsonDocument::new(report, calculator)
                .with_generated_at(now)
                .write(&path)?;
            ("JSON report", path)
        }
    };

    output_settings.exported(kind, &path);
    Ok(())
}

/// Draft store selected by `--draft`, or the autosave in the drafts directory
pub fn draft_store(cli: &Cli, config: &Config) -> DraftStore {
    match cli.draft {
        Some(ref path) => DraftStore::at_path(path.clone()),
        None => DraftStore::in_dir(config.drafts_dir()),
    }
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file).inspect_err(|e| {
            logging::log_error(
                &format!("Could not load config file '{config_file}'"),
                Some(e),
            );
        })?
    } else {
        Config::load_from_standard_locations()
    };

    // Merge CLI arguments with configuration (CLI takes precedence)
    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok(config)
}

/// Settings for output formatting and display
pub struct OutputSettings {
    pub quiet: bool,
    pub verbose: bool,
    pub output_format: String,
}

impl OutputSettings {
    fn success(&self, message: &str) {
        output::display_success(message, &self.output_format, self.quiet);
    }

    fn exported(&self, kind: &str, path: &Path) {
        if self.quiet {
            return;
        }
        match self.output_format.as_str() {
            output_formats::JSON => println!(
                "{}",
                serde_json::json!({ "exported": kind, "path": path.display().to_string() })
            ),
            output_formats::MINIMAL => println!("{}", path.display()),
            _ => println!(
                "{} Exported {kind} to {}",
                display::FILE_EMOJI,
                path.display()
            ),
        }
    }
}

/// Setup output settings based on CLI and config
pub fn setup_output_settings(cli_config: &CliConfig, config: &Config) -> OutputSettings {
    OutputSettings {
        quiet: cli_config.quiet,
        verbose: config.verbose.unwrap_or(false),
        output_format: config
            .output_format
            .as_deref()
            .unwrap_or(output_formats::DEFAULT)
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tetreport").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 9).unwrap()
    }

    fn apply(report: &mut InspectionReport, args: &[&str]) -> Result<String> {
        apply_edit(&parse(args).command, report, CoercionPolicy::Reject)
    }

    #[test]
    fn test_apply_edit_sequence() -> Result<()> {
        let mut report = InspectionReport::new(today(), 215_013.0);

        apply(&mut report, &["institution", "set", "name", "Yaba College"])?;
        assert_eq!(apply(&mut report, &["project", "add", "Workshop"])?, "Added project 1");
        apply(&mut report, &["project", "set", "1", "contract_sum", "₦2,500,000"])?;
        apply(&mut report, &["team", "add", "Engr. C.D.", "Engineer"])?;
        apply(&mut report, &["charges", "include"])?;
        apply(&mut report, &["approval", "set", "status", "approved"])?;

        assert_eq!(report.institution.name, "Yaba College");
        assert_eq!(report.projects[0].contract_sum, Some(2_500_000.0));
        assert_eq!(report.monitoring_team.len(), 1);
        assert!(report.bank_charges.included);
        Ok(())
    }

    #[test]
    fn test_apply_edit_rejects_invalid_number() {
        let mut report = InspectionReport::new(today(), 0.0);
        report.add_project(None);
        assert!(apply(&mut report, &["project", "set", "1", "disbursed", "150"]).is_err());
        assert_eq!(report.projects[0].disbursed, None);
    }

    #[test]
    fn test_apply_edit_remove_on_empty_report() -> Result<()> {
        let mut report = InspectionReport::new(today(), 0.0);
        assert_eq!(
            apply(&mut report, &["project", "remove"])?,
            "There are no projects to remove"
        );
        assert!(apply(&mut report, &["project", "remove", "3"]).is_err());
        assert_eq!(
            apply(&mut report, &["team", "remove"])?,
            "There are no team members to remove"
        );
        Ok(())
    }

    #[test]
    fn test_load_and_merge_config_no_config() -> Result<()> {
        let cli_config = CliConfig {
            no_config: true,
            drafts_dir: Some("work".to_string()),
            coerce_invalid: true,
            ..Default::default()
        };
        let config = load_and_merge_config(&cli_config)?;
        assert_eq!(config.drafts_dir(), PathBuf::from("work"));
        assert_eq!(config.coercion_policy(), CoercionPolicy::Coerce);
        Ok(())
    }

    #[test]
    fn test_load_and_merge_config_missing_file() {
        let cli_config = CliConfig {
            config_file: Some("does-not-exist.toml".to_string()),
            ..Default::default()
        };
        assert!(load_and_merge_config(&cli_config).is_err());
    }

    #[test]
    fn test_draft_store_selection() {
        let config = Config::default();
        let default_store = draft_store(&parse(&["show"]), &config);
        assert_eq!(default_store.path(), Path::new("drafts/autosave.json"));

        let explicit = draft_store(&parse(&["--draft", "site-visit.json", "show"]), &config);
        assert_eq!(explicit.path(), Path::new("site-visit.json"));
    }

    #[test]
    fn test_run_logic_edit_then_validate() -> Result<()> {
        let dir = TempDir::new()?;
        let draft = dir.path().join("draft.json");
        let draft = draft.to_string_lossy().into_owned();
        let run = |args: &[&str]| {
            let mut full = vec!["--no-config", "--quiet", "--draft", draft.as_str()];
            full.extend_from_slice(args);
            run_tetreport_logic(&parse(&full))
        };

        assert_eq!(run(&["validate"])?, 1);
        run(&["institution", "set", "name", "Kano State Polytechnic"])?;
        run(&["institution", "set", "location", "Kano"])?;
        run(&["project", "add", "ICT centre"])?;
        assert_eq!(run(&["validate"])?, 0);

        let html = dir.path().join("report.html");
        let html_arg = html.to_string_lossy().into_owned();
        run(&["export", "html", "--out", html_arg.as_str()])?;
        assert!(html.is_file());
        Ok(())
    }

    #[test]
    fn test_setup_output_settings() {
        let cli_config = CliConfig {
            quiet: true,
            ..Default::default()
        };
        let config = Config {
            output_format: Some("minimal".to_string()),
            verbose: Some(true),
            ..Config::default()
        };
        let settings = setup_output_settings(&cli_config, &config);
        assert!(settings.quiet);
        assert!(settings.verbose);
        assert_eq!(settings.output_format, "minimal");
    }
}
