//! Core traits for spread estimation

use basket_core::Result;
use basket_quantile::QuantileEstimator;

/// Spread/scale estimator parameterized by the quantile estimator it uses
pub trait SpreadEstimator<Q: QuantileEstimator> {
    /// Name of this spread estimator
    fn name(&self) -> &str;

    /// Estimate spread with provided quantile estimator
    ///
    /// # Warning
    /// Sorts `data` in place.
    fn estimate(&self, data: &mut [f64], quantile_est: &Q) -> Result<f64> {
        data.sort_by(|a, b| a.total_cmp(b));
        self.estimate_sorted(data, quantile_est)
    }

    /// Compute spread from pre-sorted data
    fn estimate_sorted(&self, sorted_data: &[f64], quantile_est: &Q) -> Result<f64>;
}
