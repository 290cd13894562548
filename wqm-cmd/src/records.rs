//! Water bodies, the parameter catalog, and recording readings.

use anyhow::Context;
use log::info;
use wqm_core::parameter::ParameterCatalog;
use wqm_core::series::{Reading, Series};
use wqm_store::{StorageLayout, WaterBodyContext};

use crate::render::render_series;

pub fn create_body(layout: &StorageLayout, name: &str) -> anyhow::Result<()> {
    let context = layout.create_water_body(name)?;
    println!(
        "Water body '{}' created at {}",
        context.name,
        context.body_dir().display()
    );
    Ok(())
}

pub fn list_bodies(layout: &StorageLayout) -> anyhow::Result<()> {
    let names = layout.list_water_bodies()?;
    if names.is_empty() {
        println!("No water bodies under {}", layout.root.display());
        return Ok(());
    }
    for name in names {
        println!("{}", name);
    }
    Ok(())
}

pub fn list_parameters(catalog: &ParameterCatalog) -> anyhow::Result<()> {
    println!(
        "{:<34} {:<10} {:>16} {:>7}",
        "Parameter", "Unit", "Ideal range", "Weight"
    );
    for definition in catalog.all() {
        let range = format!(
            "{} - {}",
            definition.ideal_range.min, definition.ideal_range.max
        );
        println!(
            "{:<34} {:<10} {:>16} {:>7.2}",
            definition.name, definition.unit, range, definition.weight
        );
    }
    Ok(())
}

/// Parse a `dd/mm/yy=value` command-line reading.
pub fn parse_reading_arg(arg: &str) -> anyhow::Result<Reading> {
    let (date, value) = arg
        .split_once('=')
        .with_context(|| format!("expected dd/mm/yy=value, got '{}'", arg))?;
    Reading::parse(date, value).with_context(|| format!("invalid reading '{}'", arg))
}

/// Record readings for a catalog parameter. Every argument is parsed before
/// anything is written, so one bad reading stores nothing.
pub fn add_readings(
    context: &WaterBodyContext,
    catalog: &ParameterCatalog,
    parameter: &str,
    readings: &[String],
) -> anyhow::Result<()> {
    let definition = catalog.lookup(parameter)?;
    let parsed = readings
        .iter()
        .map(|arg| parse_reading_arg(arg))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let additions = Series::with_readings(definition.name.clone(), parsed);

    let total = if context.series_path(&definition.name).exists() {
        context.append_series(&additions, &definition.unit)?.len()
    } else {
        context.create_series(&additions, &definition.unit)?;
        additions.len()
    };
    info!(
        "cmd: recorded {} readings of {} in '{}'",
        additions.len(),
        definition.name,
        context.name
    );
    println!(
        "Stored {} readings of {} in '{}' ({} in total)",
        additions.len(),
        definition.name,
        context.name,
        total
    );
    Ok(())
}

pub fn show_series(
    context: &WaterBodyContext,
    catalog: &ParameterCatalog,
    parameter: &str,
) -> anyhow::Result<()> {
    let series = context.load_series(parameter)?;
    print!("{}", render_series(&series, catalog.get(series.parameter())));
    Ok(())
}
