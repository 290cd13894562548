//! File-backed storage for water-quality data.
//!
//! Each water body is a folder under a storage root. Inside it, every
//! parameter series lives in its own CSV file and free-text reports live in
//! a separate folder:
//!
//! ```text
//! <root>/
//!   Lake Chapala/
//!     Data/
//!       DATA_pH.csv
//!       DATA_Dissolved_Oxygen.csv
//!     Reports/
//!       Report_March survey_01-04-24_10-30-00.txt
//! ```
//!
//! There is no global "active water body": callers open a
//! [`WaterBodyContext`] and pass it to every operation.
//!
//! # Usage
//!
//! ```rust
//! use wqm_core::series::Series;
//! use wqm_store::StorageLayout;
//!
//! let root = std::env::temp_dir().join(format!("wqm-doc-{}", std::process::id()));
//! let _ = std::fs::remove_dir_all(&root);
//! let layout = StorageLayout::new(&root);
//!
//! let lake = layout.create_water_body("Lake Chapala").unwrap();
//! let series = Series::new("pH").append("01/01/24", 7.1).unwrap();
//! lake.create_series(&series, "units").unwrap();
//!
//! let loaded = lake.load_series("pH").unwrap();
//! assert_eq!(loaded.len(), 1);
//! # std::fs::remove_dir_all(&root).unwrap();
//! ```

mod loader;
pub mod models;
mod reports;

use anyhow::{bail, Context};
use log::info;
use std::path::{Path, PathBuf};

/// Default folder holding one folder per water body.
pub const DEFAULT_ROOT: &str = "water_bodies";

/// Where water bodies, their data files and their reports are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    pub root: PathBuf,
    /// Sub-folder of a water body holding series files
    pub data_folder: String,
    /// Sub-folder of a water body holding reports
    pub report_folder: String,
}

impl Default for StorageLayout {
    fn default() -> Self {
        StorageLayout::new(DEFAULT_ROOT)
    }
}

impl StorageLayout {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            data_folder: "Data".to_string(),
            report_folder: "Reports".to_string(),
        }
    }

    /// Create the folder for a new water body. Fails if it already exists.
    pub fn create_water_body(&self, name: &str) -> anyhow::Result<WaterBodyContext> {
        check_component(name, "water body name")?;
        let context = self.context(name);
        let dir = context.body_dir();
        if dir.exists() {
            bail!("water body '{}' already exists", name);
        }
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        info!("store: created water body '{}' at {}", name, dir.display());
        Ok(context)
    }

    /// Open an existing water body. Fails if its folder is missing.
    pub fn open_water_body(&self, name: &str) -> anyhow::Result<WaterBodyContext> {
        check_component(name, "water body name")?;
        let context = self.context(name);
        if !context.body_dir().is_dir() {
            bail!(
                "water body '{}' not found under {}",
                name,
                self.root.display()
            );
        }
        Ok(context)
    }

    /// Names of all water bodies, sorted. Empty if the root does not exist.
    pub fn list_water_bodies(&self) -> anyhow::Result<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        let entries = std::fs::read_dir(&self.root)
            .with_context(|| format!("failed to read {}", self.root.display()))?;
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    fn context(&self, name: &str) -> WaterBodyContext {
        WaterBodyContext {
            name: name.to_string(),
            layout: self.clone(),
        }
    }
}

/// An opened water body: its name and the storage locations derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaterBodyContext {
    pub name: String,
    pub layout: StorageLayout,
}

impl WaterBodyContext {
    pub fn body_dir(&self) -> PathBuf {
        self.layout.root.join(&self.name)
    }

    pub fn data_dir(&self) -> PathBuf {
        self.body_dir().join(&self.layout.data_folder)
    }

    pub fn report_dir(&self) -> PathBuf {
        self.body_dir().join(&self.layout.report_folder)
    }
}

/// Reject names that would escape their folder when used as a path component.
fn check_component(name: &str, what: &str) -> anyhow::Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed.contains(['/', '\\'])
    {
        bail!("invalid {}: '{}'", what, name);
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::StorageLayout;

    /// A fresh storage root under the system temp dir, unique per test.
    pub fn scratch_layout(test: &str) -> StorageLayout {
        let root = std::env::temp_dir().join(format!(
            "wqm-store-{}-{}",
            std::process::id(),
            test
        ));
        let _ = std::fs::remove_dir_all(&root);
        StorageLayout::new(root)
    }
}
