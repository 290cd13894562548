//! Weighted composite water-quality index.
//!
//! Every parameter in the snapshot contributes `score * weight`, where the
//! score is 100 inside the ideal range and falls by 10 per unit of excess
//! outside it. The total is not rescaled by the weights actually present,
//! so a water body missing parameters scores lower; `incomplete_warning`
//! flags that case.

use log::debug;
use serde::Serialize;
use std::fmt;
use wqm_core::parameter::{ParameterCatalog, RangeStatus};
use wqm_core::water_body::QualitySnapshot;

/// Qualitative label for a quality score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Tier {
    Excellent,
    Good,
    Acceptable,
    Poor,
    VeryPoor,
}

impl Tier {
    /// Inclusive lower bounds: 91, 71, 51, 26.
    pub fn from_score(score: f64) -> Tier {
        if score >= 91.0 {
            Tier::Excellent
        } else if score >= 71.0 {
            Tier::Good
        } else if score >= 51.0 {
            Tier::Acceptable
        } else if score >= 26.0 {
            Tier::Poor
        } else {
            Tier::VeryPoor
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tier::Excellent => "Excellent",
            Tier::Good => "Good",
            Tier::Acceptable => "Acceptable",
            Tier::Poor => "Poor",
            Tier::VeryPoor => "Very poor",
        };
        write!(f, "{}", label)
    }
}

/// How one snapshot entry fed into the index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contribution {
    pub parameter: String,
    pub value: f64,
    /// `None` when the parameter is not in the catalog
    pub status: Option<RangeStatus>,
    pub score: f64,
    pub weight: f64,
}

impl Contribution {
    pub fn weighted(&self) -> f64 {
        self.score * self.weight
    }

    fn note(&self) -> String {
        match self.status {
            None => format!("{}: not recognized for index", self.parameter),
            Some(RangeStatus::Within) => format!("{}: within range", self.parameter),
            Some(_) => format!(
                "{}: out of range (score {:.1})",
                self.parameter, self.score
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexResult {
    /// Weighted score in [0, 100]
    pub score: f64,
    pub tier: Tier,
    pub notes: Vec<String>,
    pub contributions: Vec<Contribution>,
    /// Fewer recognized parameters than the catalog defines
    pub incomplete_warning: bool,
}

/// Combine the current value of every parameter into one quality score.
///
/// Parameters unknown to the catalog are noted and skipped rather than
/// aborting the computation.
pub fn compute_index(snapshot: &QualitySnapshot, catalog: &ParameterCatalog) -> IndexResult {
    let mut contributions = Vec::with_capacity(snapshot.len());
    let mut recognized = 0usize;
    for (parameter, value) in snapshot.iter() {
        let contribution = match catalog.get(parameter) {
            Some(definition) => {
                recognized += 1;
                let range = definition.ideal_range;
                Contribution {
                    parameter: parameter.to_string(),
                    value,
                    status: Some(range.classify(value)),
                    score: range.score(value),
                    weight: definition.weight,
                }
            }
            None => {
                debug!("index: skipping unrecognized parameter '{}'", parameter);
                Contribution {
                    parameter: parameter.to_string(),
                    value,
                    status: None,
                    score: 0.0,
                    weight: 0.0,
                }
            }
        };
        contributions.push(contribution);
    }

    let score: f64 = contributions.iter().map(Contribution::weighted).sum();
    let notes = contributions.iter().map(Contribution::note).collect();
    IndexResult {
        score,
        tier: Tier::from_score(score),
        notes,
        contributions,
        incomplete_warning: recognized < catalog.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wqm_core::parameter::{IdealRange, ParameterDefinition};

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
    fn test_tier_thresholds() {
        assert_eq!(Tier::from_score(100.0), Tier::Excellent);
        assert_eq!(Tier::from_score(91.0), Tier::Excellent);
        assert_eq!(Tier::from_score(90.99), Tier::Good);
        assert_eq!(Tier::from_score(71.0), Tier::Good);
        assert_eq!(Tier::from_score(51.0), Tier::Acceptable);
        assert_eq!(Tier::from_score(50.9), Tier::Poor);
        assert_eq!(Tier::from_score(26.0), Tier::Poor);
        assert_eq!(Tier::from_score(25.9), Tier::VeryPoor);
        assert_eq!(Tier::from_score(0.0), Tier::VeryPoor);
    }

    #[test]
    fn test_complete_snapshot_within_range_is_excellent() {
        let catalog = ParameterCatalog::standard().unwrap();
        let snapshot: QualitySnapshot = catalog
            .all()
            .iter()
            .map(|d| (d.name.clone(), (d.ideal_range.min + d.ideal_range.max) / 2.0))
            .collect();
        let result = compute_index(&snapshot, &catalog);
        assert!((result.score - 100.0).abs() < 1e-9);
        assert_eq!(result.tier, Tier::Excellent);
        assert!(!result.incomplete_warning);
        assert_eq!(result.notes.len(), 10);
        assert_eq!(result.notes[0], "pH: within range");
    }

    #[test]
    fn test_partial_snapshot_scales_by_present_weights() {
        let catalog = ParameterCatalog::standard().unwrap();
        let snapshot: QualitySnapshot = vec![("pH", 7.0), ("Dissolved Oxygen", 8.0)]
            .into_iter()
            .collect();
        let result = compute_index(&snapshot, &catalog);
        // 100 * (0.11 + 0.17)
        assert!((result.score - 28.0).abs() < 1e-9);
        assert_eq!(result.tier, Tier::Poor);
        assert!(result.incomplete_warning);
    }

    #[test]
    fn test_far_out_of_range_scores_zero() {
        let catalog = ParameterCatalog::from_definitions(vec![definition("Lead", 0.0, 5.0, 1.0)]).unwrap();
        let snapshot: QualitySnapshot = vec![("Lead", 15.0)].into_iter().collect();
        let result = compute_index(&snapshot, &catalog);
        assert_eq!(result.contributions[0].score, 0.0);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.tier, Tier::VeryPoor);
        assert_eq!(result.notes[0], "Lead: out of range (score 0.0)");
        assert!(!result.incomplete_warning);
    }

    #[test]
    fn test_unknown_parameters_become_notes() {
        let catalog = ParameterCatalog::from_definitions(vec![
            definition("pH", 6.5, 8.5, 0.5),
            definition("Nitrates", 0.0, 10.0, 0.5),
        ])
        .unwrap();
        let snapshot: QualitySnapshot = vec![("Mercury", 0.3), ("pH", 9.0), ("Nitrates", 4.0)]
            .into_iter()
            .collect();
        let result = compute_index(&snapshot, &catalog);
        assert_eq!(result.notes[0], "Mercury: not recognized for index");
        assert_eq!(result.contributions[0].status, None);
        // pH 9.0: excess max(2.5, 0.5) = 2.5 -> 75; 75 * 0.5 + 100 * 0.5
        assert_eq!(result.contributions[1].status, Some(RangeStatus::Above));
        assert!((result.score - 87.5).abs() < 1e-9);
        assert_eq!(result.tier, Tier::Good);
        assert!(!result.incomplete_warning);
    }

    #[test]
    fn test_empty_snapshot() {
        let catalog = ParameterCatalog::standard().unwrap();
        let result = compute_index(&QualitySnapshot::new(), &catalog);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.tier, Tier::VeryPoor);
        assert!(result.notes.is_empty());
        assert!(result.incomplete_warning);
    }
}
