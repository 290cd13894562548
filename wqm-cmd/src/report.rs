//! Report commands: free-text notes and generated summaries.

use clap::Subcommand;
use log::{info, warn};
use wqm_core::parameter::ParameterCatalog;
use wqm_core::water_body::WaterBody;
use wqm_data::evaluation::{evaluate_with, EvaluationResult, TiePolicy};
use wqm_data::index::compute_index;
use wqm_data::pareto::rank;
use wqm_store::WaterBodyContext;

use crate::analysis::tie_policy;
use crate::render::render_summary;

#[derive(Subcommand)]
pub enum ReportAction {
    /// Write a report from the given text
    New {
        #[arg(short = 't', long)]
        title: String,

        /// Report body
        text: String,
    },

    /// List stored reports
    List,

    /// Print a stored report
    Show {
        /// Report file name as printed by `list`
        name: String,
    },

    /// Delete a stored report
    Delete {
        name: String,
    },

    /// Evaluate every parameter and save the result as a report
    Generate {
        #[arg(short = 't', long)]
        title: String,

        #[arg(long)]
        legacy_trend: bool,
    },
}

pub fn run_report(
    context: &WaterBodyContext,
    catalog: &ParameterCatalog,
    action: ReportAction,
) -> anyhow::Result<()> {
    match action {
        ReportAction::New { title, text } => {
            let path = context.create_report(&title, &text)?;
            println!("Report saved to {}", path.display());
        }
        ReportAction::List => {
            let names = context.list_reports()?;
            if names.is_empty() {
                println!("No reports for '{}'", context.name);
            }
            for name in names {
                println!("{}", name);
            }
        }
        ReportAction::Show { name } => {
            println!("{}", context.read_report(&name)?);
        }
        ReportAction::Delete { name } => {
            context.delete_report(&name)?;
            println!("Report {} deleted", name);
        }
        ReportAction::Generate {
            title,
            legacy_trend,
        } => {
            let text = summarize(context, catalog, tie_policy(legacy_trend))?;
            let path = context.create_report(&title, &text)?;
            println!("Report saved to {}", path.display());
        }
    }
    Ok(())
}

/// Full text summary of a water body: every catalog parameter's evaluation,
/// then the quality index and the Pareto ranking.
pub fn summarize(
    context: &WaterBodyContext,
    catalog: &ParameterCatalog,
    policy: TiePolicy,
) -> anyhow::Result<String> {
    let body = context.load_water_body(catalog)?;
    let evaluations = evaluate_all(&body, catalog, policy);
    let snapshot = body.snapshot();
    let index = compute_index(&snapshot, catalog);
    let ranking = rank(&snapshot, catalog);
    info!(
        "cmd: summarized '{}' ({} parameters, index {:.1})",
        context.name,
        evaluations.len(),
        index.score
    );
    Ok(render_summary(&context.name, &evaluations, &index, &ranking))
}

fn evaluate_all(
    body: &WaterBody,
    catalog: &ParameterCatalog,
    policy: TiePolicy,
) -> Vec<EvaluationResult> {
    let mut results = Vec::new();
    for series in body.series() {
        let Some(definition) = catalog.get(series.parameter()) else {
            warn!("cmd: no definition for '{}', not evaluated", series.parameter());
            continue;
        };
        match evaluate_with(series, definition, policy) {
            Ok(result) => results.push(result),
            Err(e) => warn!("cmd: {}", e),
        }
    }
    results
}
