//! Household consumption baskets and robust poverty lines
//!
//! Facade over the workspace crates:
//!
//! - [`records`]: expense records, classification, exclusion sets, aggregation
//! - [`quantile`]: linear quantile estimation
//! - [`spread`]: MAD outlier bounds and poverty-line estimation
//! - [`pipeline`]: raw vs refined baskets, sensitivity, below-line composition
//! - `frame` (feature `polars`): DataFrame and CSV interface
//!
//! ```rust
//! use consumption_basket::prelude::*;
//!
//! let records: Vec<ExpenseRecord> = (0..20)
//!     .map(|i| ExpenseRecord::new(format!("h{i}"), 26, 1_100_101, "Rice", 500.0 + i as f64))
//!     .collect();
//! let report = BasketPipeline::new(BasketConfig::default())?.report(&records)?;
//!
//! assert_eq!(report.refined.category_weights[0].category, Category::Food);
//! # Ok::<(), consumption_basket::prelude::Error>(())
//! ```

pub use basket_core as records;
pub use basket_pipeline as pipeline;
pub use basket_quantile as quantile;
pub use basket_spread as spread;

#[cfg(feature = "polars")]
pub use basket_polars as frame;

/// Commonly used types
pub mod prelude {
    pub use basket_core::{
        aggregate, classify, filter_region, BasketVariant, Category, Error, ExclusionSet,
        ExpenseRecord, HouseholdAggregate, Result, Stage,
    };
    pub use basket_pipeline::{
        BasketConfig, BasketPipeline, BasketReport, BasketResult, BandConfig,
    };
    pub use basket_spread::{PovertyLine, RobustThresholdEstimator};

    #[cfg(feature = "polars")]
    pub use basket_polars::{read_expense_csv, BasketFrameExt, ColumnNames, ToFrame};
}
