//! Consumption-basket pipeline
//!
//! Runs the raw and refined basket computations and derives the
//! comparative tables a report needs:
//!
//! - [`BasketPipeline`]: one parameterized pipeline invoked per
//!   [`BasketVariant`](basket_core::BasketVariant)
//! - [`weights`]: category ranking, sub-item breakdown, raw-vs-refined join
//! - [`sensitivity`]: headcount ratios on deflated vs nominal expenditure
//! - [`composition`]: basket of the households at or below the line
//!
//! # Example
//!
//! ```rust
//! use basket_core::{ExclusionSet, ExpenseRecord};
//! use basket_pipeline::{BasketConfig, BasketPipeline};
//!
//! let records: Vec<ExpenseRecord> = (0..30)
//!     .flat_map(|i| {
//!         let id = format!("h{i}");
//!         [
//!             ExpenseRecord::new(id.clone(), 26, 1_100_101, "Rice", 80.0 + i as f64),
//!             ExpenseRecord::new(id, 26, 3_101_002, "House purchase", 900.0),
//!         ]
//!     })
//!     .collect();
//!
//! let config = BasketConfig::default().with_exclusion(ExclusionSet::new([3_101_002]));
//! let report = BasketPipeline::new(config).unwrap().report(&records).unwrap();
//!
//! assert_eq!(report.excluded_records, 30);
//! assert!(report.refined.poverty_line().value < report.raw.poverty_line().value);
//! assert_eq!(report.sensitivity[2].label, "P35");
//! ```

pub mod composition;
pub mod config;
pub mod pipeline;
pub mod sensitivity;
pub mod weights;

pub use composition::{
    composition_below_line, BelowLineComposition, CategoryComposition, ItemComposition,
};
pub use config::{BandConfig, BasketConfig};
pub use pipeline::{BasketPipeline, BasketReport, BasketResult};
pub use sensitivity::{analyze, cumulative_band, headcount_ratio, BandPoint, SensitivityRow};
pub use weights::{
    category_weights, compare_weights, share_of, sub_item_breakdown, CategoryWeight,
    SubItemWeight, WeightComparison,
};
