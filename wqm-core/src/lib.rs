//! Core types for water-quality monitoring.
//!
//! Holds the parameter catalog (reference ranges and index weights), the
//! validated reading series kept per parameter, and the water body that
//! owns them.
//!
//! # Usage
//!
//! ```rust
//! use wqm_core::parameter::{ParameterCatalog, RangeStatus};
//! use wqm_core::series::Series;
//!
//! let catalog = ParameterCatalog::standard().unwrap();
//! let ph = catalog.lookup("pH").unwrap();
//!
//! let series = Series::new("pH")
//!     .append("01/01/24", 7.0)
//!     .and_then(|s| s.append("02/01/24", 9.1))
//!     .unwrap();
//! let latest = series.latest().unwrap();
//! assert_eq!(ph.ideal_range.classify(latest.value), RangeStatus::Above);
//! ```

pub mod error;
pub mod parameter;
pub mod series;
pub mod water_body;

pub use error::{QualityError, Result};
