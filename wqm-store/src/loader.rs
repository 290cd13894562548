//! Reading and writing parameter series files.
//!
//! One CSV file per parameter, named `DATA_<stem>.csv` where `<stem>` is
//! the parameter name with spaces turned into underscores and parentheses
//! removed.
//!
//! # CSV Format
//!
//! ```text
//! Date,Parameter,Value,Unit
//! 01/01/24,Dissolved Oxygen,7.8,mg/L
//! 15/01/24,Dissolved Oxygen,6.9,mg/L
//! ```

use crate::models::{SeriesRow, SERIES_FILE_EXTENSION, SERIES_FILE_PREFIX};
use crate::WaterBodyContext;
use anyhow::{bail, Context};
use log::{info, warn};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use wqm_core::parameter::ParameterCatalog;
use wqm_core::series::{Reading, Series};
use wqm_core::water_body::WaterBody;
use wqm_utils::names::file_stem;

impl WaterBodyContext {
    /// Path of the file holding a parameter's series.
    pub fn series_path(&self, parameter: &str) -> PathBuf {
        self.data_dir().join(format!(
            "{}{}.{}",
            SERIES_FILE_PREFIX,
            file_stem(parameter),
            SERIES_FILE_EXTENSION
        ))
    }

    /// Store a series in a new file. Fails if the parameter already has a
    /// file (append to it instead) or if the series is empty.
    pub fn create_series(&self, series: &Series, unit: &str) -> anyhow::Result<PathBuf> {
        let path = self.series_path(series.parameter());
        if path.exists() {
            bail!(
                "'{}' already has data in {}; append to it instead",
                series.parameter(),
                path.display()
            );
        }
        if series.is_empty() {
            bail!("no readings given for '{}'; nothing stored", series.parameter());
        }
        std::fs::create_dir_all(self.data_dir())
            .with_context(|| format!("failed to create {}", self.data_dir().display()))?;
        write_series(&path, series, unit)?;
        info!(
            "store: created {} with {} readings",
            path.display(),
            series.len()
        );
        Ok(path)
    }

    /// Append readings to a parameter's existing file. Only the new rows are
    /// written; rows already stored are left as they are. The merged series
    /// is returned.
    pub fn append_series(&self, additions: &Series, unit: &str) -> anyhow::Result<Series> {
        let path = self.series_path(additions.parameter());
        if !path.exists() {
            bail!(
                "'{}' has no data file yet; create it first",
                additions.parameter()
            );
        }
        let mut merged = read_series(&path)?;
        append_rows(&path, merged.parameter(), additions, unit)?;
        merged.extend(additions.readings().iter().copied());
        info!(
            "store: appended {} readings to {} (total {})",
            additions.len(),
            path.display(),
            merged.len()
        );
        Ok(merged)
    }

    /// Load one parameter's series.
    pub fn load_series(&self, parameter: &str) -> anyhow::Result<Series> {
        let path = self.series_path(parameter);
        if !path.exists() {
            bail!("no data stored for '{}' in '{}'", parameter, self.name);
        }
        read_series(&path)
    }

    /// Paths of all series files in this water body, sorted by name.
    pub fn list_series(&self) -> anyhow::Result<Vec<PathBuf>> {
        let dir = self.data_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(&dir)
            .with_context(|| format!("failed to read {}", dir.display()))?
        {
            let path = entry?.path();
            let is_series = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| {
                    n.starts_with(SERIES_FILE_PREFIX)
                        && n.ends_with(&format!(".{}", SERIES_FILE_EXTENSION))
                });
            if is_series && path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    /// Load every series of this water body, in catalog order with
    /// parameters unknown to the catalog last. Unreadable files are logged
    /// and skipped so one bad file does not hide the rest.
    pub fn load_water_body(&self, catalog: &ParameterCatalog) -> anyhow::Result<WaterBody> {
        let mut loaded = Vec::new();
        for path in self.list_series()? {
            match read_series(&path) {
                Ok(series) => loaded.push(canonical_name(series, catalog)),
                Err(e) => warn!("store: skipping {}: {:#}", path.display(), e),
            }
        }
        loaded.sort_by(|a, b| {
            let rank = |s: &Series| catalog.position(s.parameter()).unwrap_or(usize::MAX);
            rank(a)
                .cmp(&rank(b))
                .then_with(|| a.parameter().cmp(b.parameter()))
        });
        let mut body = WaterBody::new(self.name.clone());
        for series in loaded {
            body.merge(series);
        }
        info!(
            "store: loaded {} series for '{}'",
            body.series().len(),
            self.name
        );
        Ok(body)
    }
}

/// Parse a series file. The parameter name comes from the first row's
/// `Parameter` column, or from the file name if that is blank.
pub(crate) fn read_series(path: &Path) -> anyhow::Result<Series> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut parameter: Option<String> = None;
    let mut readings = Vec::new();
    for (line, result) in rdr.deserialize::<SeriesRow>().enumerate() {
        let row = result.with_context(|| format!("{}: malformed row", path.display()))?;
        // header is line 1
        let reading = Reading::parse(&row.date, &row.value)
            .with_context(|| format!("{}: line {}", path.display(), line + 2))?;
        if parameter.is_none() && !row.parameter.is_empty() {
            parameter = Some(row.parameter);
        }
        readings.push(reading);
    }
    if readings.is_empty() {
        bail!("{} holds no readings", path.display());
    }
    let parameter = match parameter {
        Some(p) => p,
        None => parameter_from_path(path)?,
    };
    Ok(Series::with_readings(parameter, readings))
}

/// Series named from a file name lose their parentheses; map them back to
/// the catalog spelling when the normalized names agree.
fn canonical_name(series: Series, catalog: &ParameterCatalog) -> Series {
    if catalog.get(series.parameter()).is_some() {
        return series;
    }
    match catalog.find_by_file_stem(&file_stem(series.parameter())) {
        Some(definition) => {
            Series::with_readings(definition.name.clone(), series.readings().to_vec())
        }
        None => series,
    }
}

fn write_series(path: &Path, series: &Series, unit: &str) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    for reading in series.readings() {
        wtr.serialize(SeriesRow::from_reading(series.parameter(), unit, reading))?;
    }
    wtr.flush()?;
    Ok(())
}

fn append_rows(
    path: &Path,
    parameter: &str,
    additions: &Series,
    unit: &str,
) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open {} for appending", path.display()))?;
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    for reading in additions.readings() {
        wtr.serialize(SeriesRow::from_reading(parameter, unit, reading))?;
    }
    wtr.flush()
        .with_context(|| format!("failed to append to {}", path.display()))?;
    Ok(())
}

fn parameter_from_path(path: &Path) -> anyhow::Result<String> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .and_then(|s| s.strip_prefix(SERIES_FILE_PREFIX))
        .with_context(|| format!("{} is not a series file", path.display()))?;
    Ok(stem.replace('_', " "))
}
