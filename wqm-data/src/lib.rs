//! Analysis of water-quality series.
//!
//! This crate turns stored readings into derived results:
//!
//! - [`evaluation`] compares a series' current reading to its ideal range
//!   and reports the direction of change.
//! - [`index`] folds the current value of every parameter into a weighted
//!   quality score and tier.
//! - [`pareto`] ranks parameters by how much they pull the score down.
//! - [`forecast`] fits a least-squares line over elapsed days and projects
//!   it forward.
//!
//! # Usage
//!
//! ```rust
//! use wqm_core::parameter::ParameterCatalog;
//! use wqm_core::series::Series;
//! use wqm_data::evaluation::{evaluate, Trend};
//! use wqm_data::forecast::{forecast, TimeUnit};
//!
//! let catalog = ParameterCatalog::standard().unwrap();
//! let series = Series::new("pH")
//!     .append("01/01/24", 7.0)
//!     .and_then(|s| s.append("02/01/24", 7.2))
//!     .unwrap();
//!
//! let result = evaluate(&series, catalog.lookup("pH").unwrap()).unwrap();
//! assert_eq!(result.trend, Trend::Up);
//!
//! let points = forecast(&series, TimeUnit::Day, 3).unwrap();
//! assert_eq!(points.len(), 3);
//! ```

pub mod evaluation;
pub mod forecast;
pub mod index;
pub mod pareto;
