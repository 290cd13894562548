//! Free-text reports kept per water body.
//!
//! A report is a plain text file named
//! `Report_<title>_<dd-mm-yy_HH-MM-SS>.txt` whose first line is the title.

use crate::{check_component, WaterBodyContext};
use anyhow::{bail, Context};
use chrono::{Local, NaiveDateTime};
use log::info;
use std::path::PathBuf;

/// Timestamp format embedded in report file names.
pub const REPORT_TIMESTAMP_FORMAT: &str = "%d-%m-%y_%H-%M-%S";

const REPORT_PREFIX: &str = "Report_";
const REPORT_EXTENSION: &str = ".txt";

impl WaterBodyContext {
    /// Write a new report stamped with the current local time.
    pub fn create_report(&self, title: &str, body: &str) -> anyhow::Result<PathBuf> {
        self.create_report_at(title, body, Local::now().naive_local())
    }

    /// Write a new report stamped with `timestamp`.
    pub fn create_report_at(
        &self,
        title: &str,
        body: &str,
        timestamp: NaiveDateTime,
    ) -> anyhow::Result<PathBuf> {
        let title = title.trim();
        check_component(title, "report title")?;
        let name = format!(
            "{}{}_{}{}",
            REPORT_PREFIX,
            title,
            timestamp.format(REPORT_TIMESTAMP_FORMAT),
            REPORT_EXTENSION
        );
        let dir = self.report_dir();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        let path = dir.join(&name);
        if path.exists() {
            bail!("report {} already exists", name);
        }
        std::fs::write(&path, format!("{}\n{}", title, body))
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("store: saved report {}", path.display());
        Ok(path)
    }

    /// File names of all reports, sorted.
    pub fn list_reports(&self) -> anyhow::Result<Vec<String>> {
        let dir = self.report_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in
            std::fs::read_dir(&dir).with_context(|| format!("failed to read {}", dir.display()))?
        {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if entry.file_type()?.is_file() && name.ends_with(REPORT_EXTENSION) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn read_report(&self, name: &str) -> anyhow::Result<String> {
        let path = self.report_path(name)?;
        std::fs::read_to_string(&path).with_context(|| format!("failed to read report {}", name))
    }

    pub fn delete_report(&self, name: &str) -> anyhow::Result<()> {
        let path = self.report_path(name)?;
        std::fs::remove_file(&path).with_context(|| format!("failed to delete report {}", name))?;
        info!("store: deleted report {}", path.display());
        Ok(())
    }

    fn report_path(&self, name: &str) -> anyhow::Result<PathBuf> {
        check_component(name, "report name")?;
        Ok(self.report_dir().join(name))
    }
}
