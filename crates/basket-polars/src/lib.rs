//! Polars integration for the consumption-basket pipeline
//!
//! Loads survey expense records from Polars DataFrames or CSV files and
//! turns every result table of the pipeline back into a DataFrame.
//!
//! # Example
//!
//! ```rust,ignore
//! use basket_pipeline::{BasketConfig, BasketPipeline};
//! use basket_polars::{read_expense_csv, ColumnNames, ToFrame};
//!
//! let records = read_expense_csv("despesas.csv", &ColumnNames::default(), Some(26))?;
//! let report = BasketPipeline::new(BasketConfig::default())?.report(&records)?;
//!
//! println!("{}", report.refined.category_weights.to_frame()?);
//! println!("{}", report.sensitivity.to_frame()?);
//! ```

mod config;
mod error;
mod methods;
mod traits;

pub use config::ColumnNames;
pub use error::{Error, Result};
pub use methods::read_expense_csv;
pub use traits::{BasketFrameExt, ToFrame};
