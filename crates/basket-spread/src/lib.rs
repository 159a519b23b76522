//! Robust spread and threshold estimation
//!
//! This crate provides:
//! - [`Mad`] and [`StandardizedMad`]: median absolute deviation estimators
//! - [`FilterBounds`]: `median ± k·σ` acceptance bounds built on the
//!   standardized MAD
//! - [`RobustThresholdEstimator`]: deflation, log-scale outlier rejection
//!   and quantile-based poverty line in one pass
//!
//! # Overview
//!
//! Household expenditure is heavily right-skewed, so outliers are rejected
//! on the log scale. The MAD has a 50% breakdown point: half the sample can
//! be contaminated before the bounds move arbitrarily, which is what makes a
//! single non-iterative filtering pass sufficient.
//!
//! # Example
//!
//! ```rust
//! use basket_core::{aggregate, ExpenseRecord};
//! use basket_spread::RobustThresholdEstimator;
//!
//! let records: Vec<ExpenseRecord> = (1..=20)
//!     .map(|i| ExpenseRecord::new(format!("h{i}"), 26, 1_100_101, "Rice", 100.0 + i as f64))
//!     .collect();
//! let table = aggregate(&records).unwrap();
//!
//! let estimator = RobustThresholdEstimator::new(0.94, 0.35).unwrap();
//! let estimate = estimator.estimate(table.households()).unwrap();
//! assert_eq!(estimate.retained.len(), 20);
//! assert!(estimate.poverty_line.value > 100.0);
//! ```

pub mod bounds;
pub mod mad;
pub mod threshold;
pub mod traits;

pub use bounds::FilterBounds;
pub use mad::{mad, Mad, StandardizedMad, MAD_CONSISTENCY};
pub use threshold::{DeflatedHousehold, PovertyLine, RobustThresholdEstimator, ThresholdEstimate};
pub use traits::SpreadEstimator;
