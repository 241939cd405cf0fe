mod cli {
    #![allow(non_snake_case)]

    use assert_cmd::prelude::*;
    use predicates::str::{contains, starts_with};

    use std::fs;
    use std::path::Path;
    use std::process::Command;
    use tempfile::TempDir;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    const NAME: &str = "tetreport";

    /// Command bound to a draft file in `dir`, ignoring any config file
    fn tetreport(dir: &Path) -> Result<Command, Box<dyn std::error::Error>> {
        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.current_dir(dir)
            .env("NO_COLOR", "1")
            .arg("--no-config")
            .arg("--draft")
            .arg(dir.join("draft.json"));
        Ok(cmd)
    }

    fn fill_ready_report(dir: &Path) -> TestResult {
        for args in [
            vec!["institution", "set", "name", "University of Ilorin"],
            vec!["institution", "set", "location", "Ilorin"],
            vec!["institution", "set", "code", "TF/NC/2024/02"],
            vec!["institution", "set", "year", "2024"],
            vec!["project", "add", "Senate building"],
            vec!["project", "set", "1", "approved_cost", "₦10,000,000"],
            vec!["project", "set", "1", "contract_sum", "8,000,000"],
            vec!["project", "set", "1", "disbursed", "50%"],
            vec!["project", "set", "1", "completion", "100"],
            vec!["team", "add", "Arch. E.F.", "Team Lead"],
        ] {
            tetreport(dir)?.arg("--quiet").args(&args).assert().success();
        }
        Ok(())
    }

    #[test]
    fn test_output__when_no_command_provided() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.assert().failure().stderr(contains("Usage"));
        Ok(())
    }

    #[test]
    fn test_output__summary_of_empty_draft() -> TestResult {
        let dir = TempDir::new()?;
        tetreport(dir.path())?
            .args(["--format", "minimal", "summary"])
            .assert()
            .success()
            .stdout(starts_with("total_projects=0\n"))
            .stdout(contains("completion_rate=0.0"));
        Ok(())
    }

    #[test]
    fn test_edits__are_saved_to_draft() -> TestResult {
        let dir = TempDir::new()?;
        fill_ready_report(dir.path())?;

        let draft = fs::read_to_string(dir.path().join("draft.json"))?;
        assert!(draft.contains("\"saved_at\""));
        assert!(draft.contains("University of Ilorin"));
        assert!(draft.contains("\"contract_sum\": 8000000.0"));

        tetreport(dir.path())?
            .args(["--format", "minimal", "summary"])
            .assert()
            .success()
            .stdout(contains("total_projects=1"))
            .stdout(contains("completed=1"))
            .stdout(contains("total_disbursed=4000000.00"))
            .stdout(contains("balance=4000000.00"));
        Ok(())
    }

    #[test]
    fn test_edit__prints_recalculated_summary() -> TestResult {
        let dir = TempDir::new()?;
        tetreport(dir.path())?
            .args(["project", "add", "Library"])
            .assert()
            .success()
            .stdout(contains("Added project 1"))
            .stdout(contains("Total Projects: 1"));
        Ok(())
    }

    #[test]
    fn test_edit__invalid_number_is_rejected() -> TestResult {
        let dir = TempDir::new()?;
        tetreport(dir.path())?
            .args(["--quiet", "project", "add"])
            .assert()
            .success();

        tetreport(dir.path())?
            .args(["project", "set", "1", "disbursed", "120"])
            .assert()
            .failure()
            .stderr(contains("Error: Invalid number for 'disbursed'"));

        tetreport(dir.path())?
            .args(["project", "set", "1", "approved_cost", "-5"])
            .assert()
            .failure()
            .stderr(contains("amount cannot be negative"));
        Ok(())
    }

    #[test]
    fn test_edit__invalid_number_is_coerced_when_asked() -> TestResult {
        let dir = TempDir::new()?;
        tetreport(dir.path())?
            .args(["--quiet", "project", "add"])
            .assert()
            .success();

        tetreport(dir.path())?
            .args(["--coerce-invalid", "project", "set", "1", "disbursed", "lots"])
            .assert()
            .success();

        tetreport(dir.path())?
            .args(["--format", "json", "show"])
            .assert()
            .success()
            .stdout(contains("\"disbursed\": null"));
        Ok(())
    }

    #[test]
    fn test_edit__derived_column_is_read_only() -> TestResult {
        let dir = TempDir::new()?;
        tetreport(dir.path())?
            .args(["--quiet", "project", "add"])
            .assert()
            .success();

        tetreport(dir.path())?
            .args(["project", "set", "1", "balance", "20"])
            .assert()
            .failure()
            .stderr(contains("cannot be edited"));
        Ok(())
    }

    #[test]
    fn test_validate__fails_on_incomplete_report() -> TestResult {
        let dir = TempDir::new()?;
        tetreport(dir.path())?
            .arg("validate")
            .assert()
            .failure()
            .stdout(contains("Institution name is required"))
            .stdout(contains("At least one project is required"));
        Ok(())
    }

    #[test]
    fn test_validate__passes_on_complete_report() -> TestResult {
        let dir = TempDir::new()?;
        fill_ready_report(dir.path())?;
        tetreport(dir.path())?
            .arg("validate")
            .assert()
            .success()
            .stdout(contains("Report is ready for export"));
        Ok(())
    }

    #[test]
    fn test_export_html__refused_when_not_ready() -> TestResult {
        let dir = TempDir::new()?;
        let out = dir.path().join("report.html");
        tetreport(dir.path())?
            .args(["export", "html", "--out"])
            .arg(&out)
            .assert()
            .failure()
            .stderr(contains("Location is required"));
        assert!(!out.exists());
        Ok(())
    }

    #[test]
    fn test_export_html__writes_printable_report() -> TestResult {
        let dir = TempDir::new()?;
        fill_ready_report(dir.path())?;
        tetreport(dir.path())?
            .args(["--quiet", "charges", "include"])
            .assert()
            .success();

        let out = dir.path().join("report.html");
        tetreport(dir.path())?
            .args(["export", "html", "--orientation", "portrait", "--out"])
            .arg(&out)
            .assert()
            .success()
            .stdout(contains("Exported printable report"));

        let html = fs::read_to_string(&out)?;
        assert!(html.contains("size: A4;"));
        assert!(html.contains("University of Ilorin"));
        assert!(html.contains("TF/NC/2024/02"));
        assert!(html.contains("Bank and Administrative Charges"));
        assert!(html.contains("₦10,215,013.00"));
        Ok(())
    }

    #[test]
    fn test_export_html__default_file_name() -> TestResult {
        let dir = TempDir::new()?;
        fill_ready_report(dir.path())?;
        tetreport(dir.path())?
            .args(["--quiet", "export", "html"])
            .assert()
            .success();

        let exported: Vec<String> = fs::read_dir(dir.path())?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".html"))
            .collect();
        assert_eq!(exported.len(), 1);
        assert!(exported[0].starts_with("TETFUND_Report_University_of_Ilorin_"));
        Ok(())
    }

    #[test]
    fn test_export_csv__writes_three_sheets() -> TestResult {
        let dir = TempDir::new()?;
        fill_ready_report(dir.path())?;
        let out = dir.path().join("workbook");
        tetreport(dir.path())?
            .args(["--quiet", "export", "csv", "--out"])
            .arg(&out)
            .assert()
            .success();

        for sheet in ["projects.csv", "institution.csv", "summary.csv"] {
            assert!(out.join(sheet).is_file(), "{sheet} should exist");
        }
        let projects = fs::read_to_string(out.join("projects.csv"))?;
        assert!(projects.contains("Senate building"));
        Ok(())
    }

    #[test]
    fn test_export_json__includes_summary() -> TestResult {
        let dir = TempDir::new()?;
        fill_ready_report(dir.path())?;
        let out = dir.path().join("report.json");
        tetreport(dir.path())?
            .args(["--format", "minimal", "export", "json", "--out"])
            .arg(&out)
            .assert()
            .success()
            .stdout(contains("report.json"));

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out)?)?;
        assert_eq!(value["summary"]["total_projects"], 1);
        assert_eq!(value["report"]["institution"]["location"], "Ilorin");
        Ok(())
    }

    #[test]
    fn test_reset__discards_draft() -> TestResult {
        let dir = TempDir::new()?;
        fill_ready_report(dir.path())?;
        tetreport(dir.path())?
            .arg("reset")
            .assert()
            .success()
            .stdout(contains("discarded"));
        assert!(!dir.path().join("draft.json").exists());

        tetreport(dir.path())?
            .arg("reset")
            .assert()
            .success()
            .stdout(contains("No draft to discard"));
        Ok(())
    }

    #[test]
    fn test_new__starts_empty_report() -> TestResult {
        let dir = TempDir::new()?;
        fill_ready_report(dir.path())?;
        tetreport(dir.path())?.arg("new").assert().success();
        tetreport(dir.path())?
            .args(["--format", "minimal", "summary"])
            .assert()
            .success()
            .stdout(contains("total_projects=0"));
        Ok(())
    }

    #[test]
    fn test_config__summary_rule_from_file() -> TestResult {
        let dir = TempDir::new()?;
        let config = dir.path().join("tetreport.toml");
        fs::write(
            &config,
            "[summary]\ncompletion_threshold = 60.0\ndisbursement_basis = \"approved_cost\"\n",
        )?;

        let run = |args: &[&str]| -> Result<Command, Box<dyn std::error::Error>> {
            let mut cmd = Command::cargo_bin(NAME)?;
            cmd.current_dir(dir.path())
                .arg("--config")
                .arg(&config)
                .arg("--draft")
                .arg(dir.path().join("draft.json"))
                .args(args);
            Ok(cmd)
        };

        run(&["--quiet", "project", "add"])?.assert().success();
        run(&["--quiet", "project", "set", "1", "approved_cost", "1000"])?
            .assert()
            .success();
        run(&["--quiet", "project", "set", "1", "disbursed", "10"])?
            .assert()
            .success();
        run(&["--quiet", "project", "set", "1", "completion", "70"])?
            .assert()
            .success();

        run(&["--format", "minimal", "summary"])?
            .assert()
            .success()
            .stdout(contains("completed=1"))
            .stdout(contains("total_disbursed=100.00"));
        Ok(())
    }

    #[test]
    fn test_config__invalid_file_is_an_error() -> TestResult {
        let dir = TempDir::new()?;
        let config = dir.path().join("bad.toml");
        fs::write(&config, "orientation = \"sideways\"\n")?;

        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.current_dir(dir.path())
            .arg("--config")
            .arg(&config)
            .arg("summary")
            .assert()
            .failure()
            .stderr(contains("Invalid orientation 'sideways'"));
        Ok(())
    }

    #[test]
    fn test_completion_generate__bash() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.args(["completion-generate", "bash"])
            .assert()
            .success()
            .stdout(contains("_tetreport()"));
        Ok(())
    }
}
