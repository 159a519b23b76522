//! Outlier acceptance bounds

use crate::mad::{Mad, MAD_CONSISTENCY};
use crate::traits::SpreadEstimator;
use basket_core::{Error, Result, Stage};
use basket_quantile::QuantileEstimator;
use serde::{Deserialize, Serialize};

/// Default half-width of the acceptance interval, in standardized-MAD units
pub const DEFAULT_THRESHOLD: f64 = 3.0;

/// `median ± threshold·σ` bounds where `σ = 1.4826 · MAD`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterBounds {
    pub median: f64,
    /// Unscaled median absolute deviation
    pub mad: f64,
    /// Standardized MAD
    pub scale: f64,
    pub lower: f64,
    pub upper: f64,
}

impl FilterBounds {
    /// Compute bounds over an unsorted sample
    pub fn from_sample<Q: QuantileEstimator>(
        sample: &[f64],
        threshold: f64,
        quantile_est: &Q,
    ) -> Result<Self> {
        if sample.is_empty() {
            return Err(Error::empty(Stage::OutlierFilter, 0, 0));
        }
        let mut sorted = sample.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        Self::from_sorted(&sorted, threshold, quantile_est)
    }

    /// Compute bounds over a sorted sample
    pub fn from_sorted<Q: QuantileEstimator>(
        sorted: &[f64],
        threshold: f64,
        quantile_est: &Q,
    ) -> Result<Self> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "Outlier threshold {threshold} must be finite and non-negative"
            )));
        }
        if sorted.is_empty() {
            return Err(Error::empty(Stage::OutlierFilter, 0, 0));
        }

        let median = quantile_est.median_sorted(sorted)?;
        let mad = Mad.estimate_sorted(sorted, quantile_est)?;
        let scale = MAD_CONSISTENCY * mad;

        Ok(Self {
            median,
            mad,
            scale,
            lower: median - threshold * scale,
            upper: median + threshold * scale,
        })
    }

    /// Inclusive membership test
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// MAD of zero: the bounds collapse onto the median and only values equal
    /// to it are accepted
    pub fn is_degenerate(&self) -> bool {
        self.mad == 0.0
    }
}
