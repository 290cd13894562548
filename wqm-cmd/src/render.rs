//! Plain-text rendering of series and analysis results.

use std::fmt::Write;
use wqm_core::parameter::{ParameterDefinition, RangeStatus};
use wqm_core::series::Series;
use wqm_data::evaluation::{EvaluationResult, Trend};
use wqm_data::forecast::{ForecastPoint, LinearModel, TimeUnit};
use wqm_data::index::IndexResult;
use wqm_data::pareto::ParetoRanking;
use wqm_utils::dates::{format_date, format_display_date};

const RULE_WIDTH: usize = 40;

fn heading(out: &mut String, title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    let _ = writeln!(out, "{}\n  {}\n{}", rule, title, rule);
}

fn status_text(status: RangeStatus) -> &'static str {
    match status {
        RangeStatus::Below => "BELOW the ideal range",
        RangeStatus::Within => "WITHIN the ideal range",
        RangeStatus::Above => "ABOVE the ideal range",
    }
}

fn trend_text(trend: Trend) -> &'static str {
    match trend {
        Trend::Up => "rising",
        Trend::Down => "falling",
        Trend::Flat => "unchanged",
        Trend::Unknown => "unknown (single reading)",
    }
}

/// Stored readings in date order, with the parameter's unit and range if known.
pub fn render_series(series: &Series, definition: Option<&ParameterDefinition>) -> String {
    let mut out = String::new();
    heading(&mut out, &format!("DATA FOR {}", series.parameter().to_uppercase()));
    let unit = definition.map(|d| d.unit.as_str()).unwrap_or("");
    let _ = writeln!(out, "{:<10} {:>12}", "Date", "Value");
    for reading in series.chronological() {
        let _ = writeln!(
            out,
            "{:<10} {:>12} {}",
            format_date(&reading.date),
            reading.value,
            unit
        );
    }
    let _ = writeln!(out, "\nTotal readings: {}", series.len());
    if let Some(definition) = definition {
        let _ = writeln!(
            out,
            "Ideal range: {} - {} {}",
            definition.ideal_range.min, definition.ideal_range.max, definition.unit
        );
    }
    out
}

pub fn render_evaluation(result: &EvaluationResult) -> String {
    let mut out = String::new();
    heading(&mut out, &format!("EVALUATION OF {}", result.parameter.to_uppercase()));
    let _ = writeln!(out, "Latest reading: {}", format_date(&result.current_date));
    let _ = writeln!(out, "Current value: {} {}", result.current_value, result.unit);
    let _ = writeln!(
        out,
        "Ideal range: {} - {} {}",
        result.ideal_range.min, result.ideal_range.max, result.unit
    );
    let _ = writeln!(out, "\nResult: value {}", status_text(result.range_status));
    match result.previous_value {
        Some(previous) => {
            let _ = writeln!(
                out,
                "Trend: {} (previous reading {})",
                trend_text(result.trend),
                previous
            );
        }
        None => {
            let _ = writeln!(out, "Trend: {}", trend_text(result.trend));
        }
    }
    if let Some(remediation) = &result.remediation {
        let _ = writeln!(out, "Suggested action: {}", remediation);
    }
    out
}

pub fn render_index(body: &str, result: &IndexResult) -> String {
    let mut out = String::new();
    heading(&mut out, &format!("QUALITY INDEX OF {}", body.to_uppercase()));
    let _ = writeln!(out, "Score: {:.1} / 100", result.score);
    let _ = writeln!(out, "Tier: {}", result.tier);
    if result.incomplete_warning {
        let _ = writeln!(
            out,
            "Warning: not every catalog parameter has data; the score is lower than a complete survey would give."
        );
    }
    let _ = writeln!(out);
    for note in &result.notes {
        let _ = writeln!(out, "- {}", note);
    }
    out
}

pub fn render_forecast(
    series: &Series,
    model: &LinearModel,
    unit: TimeUnit,
    points: &[ForecastPoint],
) -> String {
    let mut out = String::new();
    heading(&mut out, &format!("FORECAST OF {}", series.parameter().to_uppercase()));
    let _ = writeln!(out, "Last recorded date: {}", format_display_date(&model.last_date));
    if let Ok(latest) = series.latest() {
        let _ = writeln!(out, "Last recorded value: {:.2}", latest.value);
    }
    let _ = writeln!(
        out,
        "Trend: {:+.4} per day (R² {:.3}, {} readings)",
        model.slope, model.r_squared, model.n_observations
    );
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    for point in points {
        let _ = writeln!(
            out,
            "{} {}: {} -> {:.2}",
            point.offset_index,
            unit.plural(),
            format_display_date(&point.target_date),
            point.predicted_value
        );
    }
    out
}

pub fn render_pareto(body: &str, ranking: &ParetoRanking) -> String {
    let mut out = String::new();
    heading(&mut out, &format!("MAIN CAUSES IN {}", body.to_uppercase()));
    if ranking.impacts.is_empty() {
        let _ = writeln!(out, "No recognized parameters with data.");
        return out;
    }
    let _ = writeln!(out, "{:<4} {:<34} {:>8} {:>8}", "#", "Parameter", "Impact", "Cum. %");
    for (position, (impact, cumulative)) in ranking
        .impacts
        .iter()
        .zip(&ranking.cumulative_percent)
        .enumerate()
    {
        let marker = if position < ranking.cutoff_index { "*" } else { " " };
        let _ = writeln!(
            out,
            "{:<4} {:<34} {:>8.1} {:>8.1} {}",
            position + 1,
            impact.parameter,
            impact.impact,
            cumulative,
            marker
        );
    }
    if ranking.total_impact() > 0.0 {
        let names: Vec<&str> = ranking
            .vital_few()
            .iter()
            .map(|i| i.parameter.as_str())
            .collect();
        let _ = writeln!(
            out,
            "\n{} of {} parameters account for 80% of the impact: {}",
            ranking.cutoff_index,
            ranking.impacts.len(),
            names.join(", ")
        );
    } else {
        let _ = writeln!(out, "\nAll parameters are within their ideal ranges.");
    }
    out
}

/// Combined text report for a whole water body.
pub fn render_summary(
    body: &str,
    evaluations: &[EvaluationResult],
    index: &IndexResult,
    ranking: &ParetoRanking,
) -> String {
    let mut out = String::new();
    for evaluation in evaluations {
        out.push_str(&render_evaluation(evaluation));
        out.push('\n');
    }
    out.push_str(&render_index(body, index));
    out.push('\n');
    out.push_str(&render_pareto(body, ranking));
    out
}
