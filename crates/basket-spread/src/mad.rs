//! Median Absolute Deviation (MAD) estimators

use crate::traits::SpreadEstimator;
use basket_core::Result;
use basket_quantile::{Linear, QuantileEstimator};

/// Consistency factor making the MAD comparable to the standard deviation
/// for normally distributed data
pub const MAD_CONSISTENCY: f64 = 1.4826;

/// Median Absolute Deviation (MAD) estimator
///
/// `median(|x - median(x)|)`, without scaling.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mad;

impl<Q: QuantileEstimator> SpreadEstimator<Q> for Mad {
    fn name(&self) -> &str {
        "MAD"
    }

    fn estimate_sorted(&self, sorted_data: &[f64], quantile_est: &Q) -> Result<f64> {
        let center = quantile_est.median_sorted(sorted_data)?;
        let mut deviations: Vec<f64> = sorted_data.iter().map(|&x| (x - center).abs()).collect();
        deviations.sort_by(|a, b| a.total_cmp(b));
        Ok(quantile_est.median_sorted(&deviations)?)
    }
}

/// Standardized MAD estimator (scaled by consistency factor)
#[derive(Debug, Clone, Copy)]
pub struct StandardizedMad {
    consistency_factor: f64,
}

impl StandardizedMad {
    /// Create with default consistency factor
    pub fn new() -> Self {
        Self {
            consistency_factor: MAD_CONSISTENCY,
        }
    }

    /// Create with custom consistency factor
    pub fn with_factor(consistency_factor: f64) -> Self {
        Self { consistency_factor }
    }

    pub fn consistency_factor(&self) -> f64 {
        self.consistency_factor
    }
}

impl Default for StandardizedMad {
    fn default() -> Self {
        Self::new()
    }
}

impl<Q: QuantileEstimator> SpreadEstimator<Q> for StandardizedMad {
    fn name(&self) -> &str {
        "Standardized MAD"
    }

    fn estimate_sorted(&self, sorted_data: &[f64], quantile_est: &Q) -> Result<f64> {
        let raw = SpreadEstimator::<Q>::estimate_sorted(&Mad, sorted_data, quantile_est)?;
        Ok(self.consistency_factor * raw)
    }
}

/// Compute the unscaled MAD of unsorted data with the linear estimator
pub fn mad(sample: &[f64]) -> Result<f64> {
    let mut data = sample.to_vec();
    Mad.estimate(&mut data, &Linear)
}
