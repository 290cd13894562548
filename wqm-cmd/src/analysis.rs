//! Evaluation, quality index, forecast and Pareto commands.

use log::info;
use serde::Serialize;
use wqm_core::parameter::ParameterCatalog;
use wqm_data::evaluation::{evaluate_with, TiePolicy};
use wqm_data::forecast::{fit, project, ForecastPoint, LinearModel, TimeUnit};
use wqm_data::index::compute_index;
use wqm_data::pareto::rank;
use wqm_store::WaterBodyContext;

use crate::render::{render_evaluation, render_forecast, render_index, render_pareto};

pub(crate) fn tie_policy(legacy_trend: bool) -> TiePolicy {
    if legacy_trend {
        TiePolicy::Legacy
    } else {
        TiePolicy::Flat
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn run_evaluate(
    context: &WaterBodyContext,
    catalog: &ParameterCatalog,
    parameter: &str,
    legacy_trend: bool,
    json: bool,
) -> anyhow::Result<()> {
    let definition = catalog.lookup(parameter)?;
    let series = context.load_series(&definition.name)?;
    let result = evaluate_with(&series, definition, tie_policy(legacy_trend))?;
    info!(
        "cmd: evaluated {} in '{}': {:?}",
        result.parameter, context.name, result.range_status
    );
    if json {
        return print_json(&result);
    }
    print!("{}", render_evaluation(&result));
    Ok(())
}

pub fn run_index(
    context: &WaterBodyContext,
    catalog: &ParameterCatalog,
    json: bool,
) -> anyhow::Result<()> {
    let body = context.load_water_body(catalog)?;
    let result = compute_index(&body.snapshot(), catalog);
    if json {
        return print_json(&result);
    }
    print!("{}", render_index(&context.name, &result));
    Ok(())
}

#[derive(Serialize)]
struct ForecastOutput<'a> {
    parameter: &'a str,
    unit: TimeUnit,
    model: &'a LinearModel,
    points: &'a [ForecastPoint],
}

pub fn run_forecast(
    context: &WaterBodyContext,
    parameter: &str,
    unit: &str,
    count: i64,
    json: bool,
) -> anyhow::Result<()> {
    let unit: TimeUnit = unit.parse()?;
    let series = context.load_series(parameter)?;
    let model = fit(&series)?;
    let points = project(&model, model.last_date, model.last_elapsed_days, unit, count)?;
    info!(
        "cmd: projected {} {} of {} from {} readings",
        points.len(),
        unit.plural(),
        series.parameter(),
        model.n_observations
    );
    if json {
        return print_json(&ForecastOutput {
            parameter: series.parameter(),
            unit,
            model: &model,
            points: &points,
        });
    }
    print!("{}", render_forecast(&series, &model, unit, &points));
    Ok(())
}

pub fn run_pareto(
    context: &WaterBodyContext,
    catalog: &ParameterCatalog,
    json: bool,
) -> anyhow::Result<()> {
    let body = context.load_water_body(catalog)?;
    let ranking = rank(&body.snapshot(), catalog);
    if json {
        return print_json(&ranking);
    }
    print!("{}", render_pareto(&context.name, &ranking));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{add_readings, test_support::scratch_layout};

    #[test]
    fn test_legacy_flag_selects_policy() {
        assert_eq!(tie_policy(false), TiePolicy::Flat);
        assert_eq!(tie_policy(true), TiePolicy::Legacy);
    }

    #[test]
    fn test_commands_run_against_stored_data() {
        let layout = scratch_layout("analysis_commands");
        let lake = layout.create_water_body("Lake A").unwrap();
        let catalog = ParameterCatalog::standard().unwrap();
        add_readings(
            &lake,
            &catalog,
            "Nitrates",
            &["01/01/24=8".to_string(), "11/01/24=13".to_string()],
        )
        .unwrap();

        run_evaluate(&lake, &catalog, "Nitrates", false, false).unwrap();
        run_evaluate(&lake, &catalog, "Nitrates", true, true).unwrap();
        run_index(&lake, &catalog, true).unwrap();
        run_pareto(&lake, &catalog, false).unwrap();
        run_forecast(&lake, "Nitrates", "week", 3, true).unwrap();

        assert!(run_evaluate(&lake, &catalog, "pH", false, false).is_err());
        assert!(run_forecast(&lake, "Nitrates", "fortnight", 3, false).is_err());
        assert!(run_forecast(&lake, "Nitrates", "day", 0, false).is_err());
        std::fs::remove_dir_all(&layout.root).unwrap();
    }

    #[test]
    fn test_forecast_needs_two_readings() {
        let layout = scratch_layout("analysis_forecast_single");
        let lake = layout.create_water_body("Lake A").unwrap();
        let catalog = ParameterCatalog::standard().unwrap();
        add_readings(&lake, &catalog, "pH", &["01/01/24=7".to_string()]).unwrap();
        assert!(run_forecast(&lake, "pH", "day", 2, false).is_err());
        std::fs::remove_dir_all(&layout.root).unwrap();
    }
}
