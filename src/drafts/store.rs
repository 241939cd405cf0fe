use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::constants::defaults;
use crate::core::error::Result;
use crate::model::InspectionReport;
use crate::reporting::logging;

/// A saved report and when it was saved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub report: InspectionReport,
    pub saved_at: DateTime<Local>,
}

/// Reads and writes the draft file
#[derive(Debug, Clone)]
pub struct DraftStore {
    path: PathBuf,
}

impl DraftStore {
    /// Store using the autosave file inside `dir`
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            path: dir.as_ref().join(defaults::AUTOSAVE_FILE),
        }
    }

    /// Store using an explicit draft file
    pub fn at_path<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the draft, or `None` when nothing has been saved yet
    pub fn load(&self) -> Result<Option<Draft>> {
        if !self.exists() {
            logging::log_draft_missing(&self.path);
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        let draft: Draft = serde_json::from_str(&content)?;
        logging::log_draft_loaded(&self.path, &draft.saved_at);
        Ok(Some(draft))
    }

    /// Load the saved report, or build a fresh one with `fresh`
    pub fn load_or_else<F>(&self, fresh: F) -> Result<InspectionReport>
    where
        F: FnOnce() -> InspectionReport,
    {
        Ok(self.load()?.map(|d| d.report).unwrap_or_else(fresh))
    }

    pub fn save(&self, report: &InspectionReport) -> Result<Draft> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let draft = Draft {
            report: report.clone(),
            saved_at: Local::now(),
        };
        let json = serde_json::to_string_pretty(&draft)?;

        // Written beside the draft so the rename stays on one filesystem
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, json)?;
        fs::rename(&staging, &self.path)?;
        logging::log_draft_saved(&self.path);
        Ok(draft)
    }

    /// Remove the draft file if there is one
    pub fn discard(&self) -> Result<bool> {
        if self.exists() {
            fs::remove_file(&self.path)?;
            return Ok(true);
        }
        Ok(false)
    }
}
