//! Command implementations for the WQM CLI.
//!
//! Provides subcommands for managing water bodies and their parameter
//! readings, evaluating and forecasting series, and producing quality
//! index, Pareto and text reports.

use clap::Subcommand;
use wqm_core::parameter::ParameterCatalog;
use wqm_store::StorageLayout;

pub mod analysis;
pub mod records;
pub mod render;
pub mod report;

#[derive(Subcommand)]
pub enum Command {
    /// Create a new water body
    CreateBody {
        /// Name of the water body (e.g. "Lake Chapala")
        name: String,
    },

    /// List existing water bodies
    ListBodies,

    /// List the known water-quality parameters with units and ideal ranges
    Parameters,

    /// Record readings for a parameter, creating its data file if needed
    Add {
        /// Water body to record into
        #[arg(short = 'b', long)]
        body: String,

        /// Parameter name as listed by `parameters`
        #[arg(short = 'p', long)]
        parameter: String,

        /// Readings as dd/mm/yy=value, e.g. 01/02/24=7.3
        #[arg(required = true)]
        readings: Vec<String>,
    },

    /// Show the stored readings of a parameter
    Show {
        #[arg(short = 'b', long)]
        body: String,

        #[arg(short = 'p', long)]
        parameter: String,
    },

    /// Evaluate the latest reading of a parameter against its ideal range
    Evaluate {
        #[arg(short = 'b', long)]
        body: String,

        #[arg(short = 'p', long)]
        parameter: String,

        /// Report unchanged values as falling, like legacy reports
        #[arg(long)]
        legacy_trend: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute the composite quality index of a water body
    Index {
        #[arg(short = 'b', long)]
        body: String,

        #[arg(long)]
        json: bool,
    },

    /// Project a parameter forward with a linear trend
    Forecast {
        #[arg(short = 'b', long)]
        body: String,

        #[arg(short = 'p', long)]
        parameter: String,

        /// Step size: day, week, month (30 days) or year (365 days)
        #[arg(short = 'u', long, default_value = "day")]
        unit: String,

        /// Number of steps to project
        #[arg(short = 'n', long, allow_negative_numbers = true)]
        count: i64,

        #[arg(long)]
        json: bool,
    },

    /// Rank parameters by their impact on quality (Pareto 80%)
    Pareto {
        #[arg(short = 'b', long)]
        body: String,

        #[arg(long)]
        json: bool,
    },

    /// Manage text reports of a water body
    Report {
        #[arg(short = 'b', long)]
        body: String,

        #[command(subcommand)]
        action: report::ReportAction,
    },
}

pub fn run(layout: StorageLayout, command: Command) -> anyhow::Result<()> {
    let catalog = ParameterCatalog::standard()?;
    match command {
        Command::CreateBody { name } => records::create_body(&layout, &name),
        Command::ListBodies => records::list_bodies(&layout),
        Command::Parameters => records::list_parameters(&catalog),
        Command::Add {
            body,
            parameter,
            readings,
        } => {
            let context = layout.open_water_body(&body)?;
            records::add_readings(&context, &catalog, &parameter, &readings)
        }
        Command::Show { body, parameter } => {
            let context = layout.open_water_body(&body)?;
            records::show_series(&context, &catalog, &parameter)
        }
        Command::Evaluate {
            body,
            parameter,
            legacy_trend,
            json,
        } => {
            let context = layout.open_water_body(&body)?;
            analysis::run_evaluate(&context, &catalog, &parameter, legacy_trend, json)
        }
        Command::Index { body, json } => {
            let context = layout.open_water_body(&body)?;
            analysis::run_index(&context, &catalog, json)
        }
        Command::Forecast {
            body,
            parameter,
            unit,
            count,
            json,
        } => {
            let context = layout.open_water_body(&body)?;
            analysis::run_forecast(&context, &parameter, &unit, count, json)
        }
        Command::Pareto { body, json } => {
            let context = layout.open_water_body(&body)?;
            analysis::run_pareto(&context, &catalog, json)
        }
        Command::Report { body, action } => {
            let context = layout.open_water_body(&body)?;
            report::run_report(&context, &catalog, action)
        }
    }
}
