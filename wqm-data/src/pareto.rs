//! Pareto ranking of parameters by negative impact on water quality.

use log::debug;
use serde::Serialize;
use std::cmp::Ordering;
use wqm_core::parameter::ParameterCatalog;
use wqm_core::water_body::QualitySnapshot;

/// Cumulative share of total impact the cutoff prefix must reach.
pub const PARETO_THRESHOLD: f64 = 80.0;

const PERCENT_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Impact {
    pub parameter: String,
    /// `100 - per-parameter score`
    pub impact: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParetoRanking {
    /// Sorted by impact, largest first
    pub impacts: Vec<Impact>,
    /// Running share of total impact for each prefix, in percent
    pub cumulative_percent: Vec<f64>,
    /// Length of the shortest prefix reaching the threshold
    pub cutoff_index: usize,
}

impl ParetoRanking {
    /// Parameters in the cutoff prefix: the few responsible for most of the impact.
    pub fn vital_few(&self) -> &[Impact] {
        &self.impacts[..self.cutoff_index]
    }

    pub fn total_impact(&self) -> f64 {
        self.impacts.iter().map(|i| i.impact).sum()
    }
}

/// Rank the snapshot's parameters by impact and find the shortest prefix
/// covering 80% of the total.
///
/// Equal impacts are ordered by name so the ranking does not depend on the
/// snapshot's order. When every parameter is within range the total impact
/// is zero; every cumulative share is then 0 and the cutoff covers the
/// whole list.
pub fn rank(snapshot: &QualitySnapshot, catalog: &ParameterCatalog) -> ParetoRanking {
    let mut impacts: Vec<Impact> = snapshot
        .iter()
        .filter_map(|(parameter, value)| match catalog.get(parameter) {
            Some(definition) => Some(Impact {
                parameter: parameter.to_string(),
                impact: 100.0 - definition.ideal_range.score(value),
            }),
            None => {
                debug!("pareto: skipping unrecognized parameter '{}'", parameter);
                None
            }
        })
        .collect();
    impacts.sort_by(|a, b| match b.impact.total_cmp(&a.impact) {
        Ordering::Equal => a.parameter.cmp(&b.parameter),
        other => other,
    });

    let total: f64 = impacts.iter().map(|i| i.impact).sum();
    let mut running = 0.0;
    let cumulative_percent: Vec<f64> = impacts
        .iter()
        .map(|i| {
            running += i.impact;
            if total > 0.0 {
                running / total * 100.0
            } else {
                0.0
            }
        })
        .collect();

    let cutoff_index = cumulative_percent
        .iter()
        .position(|p| *p >= PARETO_THRESHOLD - PERCENT_EPSILON)
        .map(|i| i + 1)
        .unwrap_or(impacts.len());

    ParetoRanking {
        impacts,
        cumulative_percent,
        cutoff_index,
    }
}
