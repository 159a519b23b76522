//! Quantile estimation
//!
//! Provides the [`QuantileEstimator`] trait and the [`Linear`] estimator,
//! which interpolates linearly between order statistics (Hyndman & Fan
//! type 7, the default of most statistics packages).
//!
//! # Example
//!
//! ```rust
//! use basket_quantile::{Linear, QuantileEstimator};
//!
//! let mut data = vec![4.0, 1.0, 3.0, 2.0];
//! let median = Linear.quantile(&mut data, 0.5).unwrap();
//! assert_eq!(median, 2.5);
//! ```

pub mod error;
pub mod linear;
pub mod traits;

pub use error::{Error, Result};
pub use linear::{median, Linear};
pub use traits::QuantileEstimator;
