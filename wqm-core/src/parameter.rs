use crate::error::{QualityError, Result};
use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use wqm_utils::names::file_stem;

/// Embedded CSV data for the standard water-quality parameters.
pub static CSV_OBJECT: &str = include_str!("../../fixtures/parameters.csv");

/// Tolerance allowed when checking that catalog weights sum to at most 1.
const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Penalty applied per unit of excess when a value falls outside its range.
pub const EXCESS_PENALTY: f64 = 10.0;

/// Where a value sits relative to its ideal range.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum RangeStatus {
    Below,
    Within,
    Above,
}

/// The (min, max) interval considered acceptable for a parameter.
/// Both bounds are inclusive.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct IdealRange {
    pub min: f64,
    pub max: f64,
}

impl IdealRange {
    pub fn new(min: f64, max: f64) -> Result<IdealRange> {
        if !min.is_finite() || !max.is_finite() {
            return Err(QualityError::Catalog(format!(
                "range bounds must be finite ({}, {})",
                min, max
            )));
        }
        if min > max {
            return Err(QualityError::Catalog(format!(
                "range minimum {} exceeds maximum {}",
                min, max
            )));
        }
        Ok(IdealRange { min, max })
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn classify(&self, value: f64) -> RangeStatus {
        if value < self.min {
            RangeStatus::Below
        } else if value > self.max {
            RangeStatus::Above
        } else {
            RangeStatus::Within
        }
    }

    /// Distance used to penalize an out-of-range value: the larger of the
    /// distances to either bound. Zero for values inside the range.
    pub fn excess(&self, value: f64) -> f64 {
        if self.contains(value) {
            0.0
        } else {
            (value - self.min).abs().max((value - self.max).abs())
        }
    }

    /// Per-parameter score in [0, 100]: 100 inside the range, otherwise
    /// `100 - excess * 10` floored at zero.
    pub fn score(&self, value: f64) -> f64 {
        if self.contains(value) {
            100.0
        } else {
            (100.0 - self.excess(value) * EXCESS_PENALTY).max(0.0)
        }
    }
}

/// Reference data for one measured water-quality variable.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ParameterDefinition {
    pub name: String,
    pub unit: String,
    pub ideal_range: IdealRange,
    /// Share of the composite quality index; zero when unspecified
    pub weight: f64,
    pub description: Option<String>,
    pub remediation: Option<String>,
}

impl ParameterDefinition {
    /// Normalized identifier used for storage ("Dissolved Oxygen" -> "Dissolved_Oxygen").
    pub fn file_stem(&self) -> String {
        file_stem(&self.name)
    }
}

// NAME,UNIT,MIN,MAX,WEIGHT,DESCRIPTION,REMEDIATION
#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "NAME")]
    name: String,
    #[serde(rename = "UNIT")]
    unit: String,
    #[serde(rename = "MIN")]
    min: f64,
    #[serde(rename = "MAX")]
    max: f64,
    #[serde(rename = "WEIGHT")]
    weight: Option<f64>,
    #[serde(rename = "DESCRIPTION")]
    description: Option<String>,
    #[serde(rename = "REMEDIATION")]
    remediation: Option<String>,
}

impl TryFrom<CatalogRow> for ParameterDefinition {
    type Error = QualityError;

    fn try_from(row: CatalogRow) -> Result<Self> {
        let ideal_range = IdealRange::new(row.min, row.max)
            .map_err(|e| QualityError::Catalog(format!("{}: {}", row.name, e)))?;
        Ok(ParameterDefinition {
            name: row.name,
            unit: row.unit,
            ideal_range,
            weight: row.weight.unwrap_or_default(),
            description: row.description.filter(|s| !s.is_empty()),
            remediation: row.remediation.filter(|s| !s.is_empty()),
        })
    }
}

/// Immutable, validated table of parameter definitions keyed by name.
///
/// Definition order is preserved so callers can present parameters in
/// their canonical order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterCatalog {
    definitions: Vec<ParameterDefinition>,
    by_name: HashMap<String, usize>,
}

impl ParameterCatalog {
    /// Build the standard catalog from the embedded CSV.
    pub fn standard() -> Result<ParameterCatalog> {
        ParameterCatalog::parse_catalog_csv(CSV_OBJECT)
    }

    /// Parse a CSV string of parameter data into a catalog.
    ///
    /// Expected CSV columns: NAME, UNIT, MIN, MAX, WEIGHT, DESCRIPTION, REMEDIATION
    pub fn parse_catalog_csv(csv_object: &str) -> Result<ParameterCatalog> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(csv_object.as_bytes());
        let mut definitions = Vec::new();
        for row in rdr.deserialize::<CatalogRow>() {
            definitions.push(row?.try_into()?);
        }
        ParameterCatalog::from_definitions(definitions)
    }

    /// Validate and index a list of definitions.
    ///
    /// Rejects empty or duplicate names, negative or non-finite weights and
    /// weight totals above 1.
    pub fn from_definitions(definitions: Vec<ParameterDefinition>) -> Result<ParameterCatalog> {
        let mut by_name = HashMap::with_capacity(definitions.len());
        let mut total_weight = 0.0;
        for (position, definition) in definitions.iter().enumerate() {
            if definition.name.trim().is_empty() {
                return Err(QualityError::Catalog(format!(
                    "parameter at position {} has no name",
                    position + 1
                )));
            }
            if !definition.weight.is_finite() || definition.weight < 0.0 {
                return Err(QualityError::Catalog(format!(
                    "{}: weight {} must be a non-negative number",
                    definition.name, definition.weight
                )));
            }
            // re-validate ranges built by hand rather than through IdealRange::new
            IdealRange::new(definition.ideal_range.min, definition.ideal_range.max)
                .map_err(|e| QualityError::Catalog(format!("{}: {}", definition.name, e)))?;
            if by_name.insert(definition.name.clone(), position).is_some() {
                return Err(QualityError::Catalog(format!(
                    "duplicate parameter '{}'",
                    definition.name
                )));
            }
            total_weight += definition.weight;
        }
        if total_weight > 1.0 + WEIGHT_TOLERANCE {
            return Err(QualityError::Catalog(format!(
                "weights sum to {:.4}, more than 1",
                total_weight
            )));
        }
        log::debug!(
            "catalog: {} parameters, total weight {:.4}",
            definitions.len(),
            total_weight
        );
        Ok(ParameterCatalog {
            definitions,
            by_name,
        })
    }

    /// Find a definition by name, failing with `UnknownParameter`.
    pub fn lookup(&self, name: &str) -> Result<&ParameterDefinition> {
        self.get(name)
            .ok_or_else(|| QualityError::UnknownParameter(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&ParameterDefinition> {
        self.by_name.get(name).map(|&i| &self.definitions[i])
    }

    /// All definitions in canonical order.
    pub fn all(&self) -> &[ParameterDefinition] {
        &self.definitions
    }

    /// Canonical position of a parameter, if known.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Resolve a normalized storage identifier back to its definition.
    pub fn find_by_file_stem(&self, stem: &str) -> Option<&ParameterDefinition> {
        self.definitions.iter().find(|d| d.file_stem() == stem)
    }

    pub fn total_weight(&self) -> f64 {
        self.definitions.iter().map(|d| d.weight).sum()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(name: &str, min: f64, max: f64, weight: f64) -> ParameterDefinition {
        ParameterDefinition {
            name: name.to_string(),
            unit: "mg/L".to_string(),
            ideal_range: IdealRange { min, max },
            weight,
            description: None,
            remediation: None,
        }
    }

    #[test]
    fn test_standard_catalog() {
        let catalog = ParameterCatalog::standard().unwrap();
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.all()[0].name, "pH");
        assert_eq!(catalog.all()[9].name, "Total Dissolved Solids (TDS)");
        assert!((catalog.total_weight() - 1.0).abs() < 1e-9);

        let ph = catalog.lookup("pH").unwrap();
        assert_eq!(ph.ideal_range, IdealRange { min: 6.5, max: 8.5 });
        assert_eq!(ph.unit, "units");
        assert!(ph.remediation.is_some());

        let phosphates = catalog.lookup("Phosphates").unwrap();
        assert_eq!(phosphates.ideal_range.max, 0.1);
    }

    #[test]
    fn test_lookup_unknown() {
        let catalog = ParameterCatalog::standard().unwrap();
        assert_eq!(
            catalog.lookup("Mercury"),
            Err(QualityError::UnknownParameter("Mercury".to_string()))
        );
        assert!(catalog.get("ph").is_none());
    }

    #[test]
    fn test_find_by_file_stem() {
        let catalog = ParameterCatalog::standard().unwrap();
        let bod = catalog.find_by_file_stem("Biochemical_Oxygen_Demand_BOD").unwrap();
        assert_eq!(bod.name, "Biochemical Oxygen Demand (BOD)");
        assert_eq!(catalog.position(&bod.name), Some(8));
        assert!(catalog.find_by_file_stem("Lead").is_none());
    }

    #[test]
    fn test_empty_weight_defaults_to_zero() {
        let csv = "NAME,UNIT,MIN,MAX,WEIGHT,DESCRIPTION,REMEDIATION\nChloride,mg/L,0,250,,,\n";
        let catalog = ParameterCatalog::parse_catalog_csv(csv).unwrap();
        let chloride = catalog.lookup("Chloride").unwrap();
        assert_eq!(chloride.weight, 0.0);
        assert_eq!(chloride.description, None);
    }

    #[test]
    fn test_rejects_duplicates() {
        let result = ParameterCatalog::from_definitions(vec![
            definition("pH", 6.5, 8.5, 0.5),
            definition("pH", 6.0, 9.0, 0.5),
        ]);
        assert!(matches!(result, Err(QualityError::Catalog(_))));
    }

    #[test]
    fn test_rejects_inverted_range_and_bad_weights() {
        let inverted = ParameterCatalog::from_definitions(vec![definition("pH", 9.0, 6.0, 0.1)]);
        assert!(matches!(inverted, Err(QualityError::Catalog(_))));

        let negative = ParameterCatalog::from_definitions(vec![definition("pH", 6.5, 8.5, -0.1)]);
        assert!(matches!(negative, Err(QualityError::Catalog(_))));

        let heavy = ParameterCatalog::from_definitions(vec![
            definition("pH", 6.5, 8.5, 0.7),
            definition("Nitrates", 0.0, 10.0, 0.7),
        ]);
        assert!(matches!(heavy, Err(QualityError::Catalog(_))));

        let csv = "NAME,UNIT,MIN,MAX,WEIGHT,DESCRIPTION,REMEDIATION\npH,units,8.5,6.5,0.1,,\n";
        assert!(ParameterCatalog::parse_catalog_csv(csv).is_err());
    }

    #[test]
    fn test_range_classify_is_inclusive() {
        let range = IdealRange::new(6.5, 8.5).unwrap();
        assert_eq!(range.classify(6.5), RangeStatus::Within);
        assert_eq!(range.classify(8.5), RangeStatus::Within);
        assert_eq!(range.classify(6.4), RangeStatus::Below);
        assert_eq!(range.classify(8.6), RangeStatus::Above);
    }

    #[test]
    fn test_range_score() {
        let range = IdealRange::new(0.0, 5.0).unwrap();
        assert_eq!(range.score(5.0), 100.0);
        // 7 is 7 from min and 2 from max: excess 7
        assert_eq!(range.excess(7.0), 7.0);
        assert!((range.score(7.0) - 30.0).abs() < 1e-9);
        assert_eq!(range.score(15.0), 0.0);

        let ph = IdealRange::new(6.5, 8.5).unwrap();
        assert!((ph.score(9.0) - 75.0).abs() < 1e-9);
    }
}
