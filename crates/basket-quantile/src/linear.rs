//! Linear interpolation between order statistics
//!
//! For a sorted sample `x` of size `n` and probability `p`:
//!
//! ```text
//! h = (n - 1) * p
//! q = x[floor(h)] + (h - floor(h)) * (x[floor(h) + 1] - x[floor(h)])
//! ```

use crate::error::{Error, Result};
use crate::traits::QuantileEstimator;

/// Linear-interpolation quantile estimator (type 7)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Linear;

impl QuantileEstimator for Linear {
    fn quantile_sorted(&self, sorted_data: &[f64], p: f64) -> Result<f64> {
        Error::check_probability(p)?;
        Error::check_non_empty(sorted_data)?;

        let n = sorted_data.len();
        if n == 1 {
            return Ok(sorted_data[0]);
        }

        let h = (n - 1) as f64 * p;
        let lo = h.floor() as usize;
        if lo + 1 >= n {
            return Ok(sorted_data[n - 1]);
        }

        let fraction = h - lo as f64;
        let (a, b) = (sorted_data[lo], sorted_data[lo + 1]);
        if fraction == 0.0 {
            return Ok(a);
        }
        Ok(a + fraction * (b - a))
    }

    fn name(&self) -> &str {
        "linear"
    }
}

/// Median of unsorted data, leaving the input untouched
pub fn median(data: &[f64]) -> Result<f64> {
    let mut sorted = data.to_vec();
    Linear.quantile(&mut sorted, 0.5)
}
