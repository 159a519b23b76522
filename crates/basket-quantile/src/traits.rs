//! Core traits for quantile estimation

use crate::Result;

/// Main trait for quantile estimation
pub trait QuantileEstimator {
    /// Estimate a single quantile
    ///
    /// # Warning
    /// This method will sort the data in place! If you need to preserve the original
    /// order, use `quantile_sorted()` with pre-sorted data or make a copy first.
    fn quantile(&self, data: &mut [f64], p: f64) -> Result<f64> {
        data.sort_by(|a, b| a.total_cmp(b));
        self.quantile_sorted(data, p)
    }

    /// Estimate a single quantile from pre-sorted data
    fn quantile_sorted(&self, sorted_data: &[f64], p: f64) -> Result<f64>;

    /// Estimate multiple quantiles from pre-sorted data
    fn quantiles_sorted(&self, sorted_data: &[f64], ps: &[f64]) -> Result<Vec<f64>> {
        ps.iter().map(|&p| self.quantile_sorted(sorted_data, p)).collect()
    }

    /// Median of pre-sorted data
    fn median_sorted(&self, sorted_data: &[f64]) -> Result<f64> {
        self.quantile_sorted(sorted_data, 0.5)
    }

    /// Short name for logs
    fn name(&self) -> &str;
}
