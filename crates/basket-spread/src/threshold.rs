//! Poverty-line estimation with robust outlier rejection
//!
//! Steps, in strict order:
//! 1. deflate each household's nominal total and take `ln(deflated + 1)`
//! 2. compute [`FilterBounds`] over the log values of *all* households
//! 3. keep households whose log value lies inside the bounds (single pass)
//! 4. take the configured quantile of the retained deflated totals

use crate::bounds::{FilterBounds, DEFAULT_THRESHOLD};
use basket_core::{Error, HouseholdAggregate, Result, Stage};
use basket_quantile::{Linear, QuantileEstimator};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Default poverty-line quantile
pub const DEFAULT_QUANTILE: f64 = 0.35;

/// A household aggregate with its deflated figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeflatedHousehold {
    pub aggregate: HouseholdAggregate,
    /// `nominal_total / deflation_factor`
    pub deflated_total: f64,
    /// `ln(deflated_total + 1)`
    pub log_deflated_total: f64,
}

impl DeflatedHousehold {
    pub fn new(aggregate: HouseholdAggregate, deflation_factor: f64) -> Self {
        let deflated_total = aggregate.nominal_total / deflation_factor;
        Self {
            aggregate,
            deflated_total,
            log_deflated_total: deflated_total.ln_1p(),
        }
    }

    pub fn household(&self) -> &str {
        &self.aggregate.household
    }

    pub fn nominal_total(&self) -> f64 {
        self.aggregate.nominal_total
    }
}

/// Poverty line of one basket variant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PovertyLine {
    /// Threshold in deflated currency
    pub value: f64,
    /// Quantile that defines the line
    pub quantile: f64,
    /// Number of households the quantile was taken over
    pub households: usize,
}

impl PovertyLine {
    /// Short label such as `P35`
    pub fn label(&self) -> String {
        format!("P{}", (self.quantile * 100.0).round() as i64)
    }
}

/// Output of [`RobustThresholdEstimator::estimate`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdEstimate {
    /// Households inside the bounds, in input order
    pub retained: Vec<DeflatedHousehold>,
    pub poverty_line: PovertyLine,
    pub bounds: FilterBounds,
    /// Number of households before filtering
    pub input_households: usize,
}

impl ThresholdEstimate {
    pub fn removed(&self) -> usize {
        self.input_households - self.retained.len()
    }
}

/// Deflation, MAD outlier filter and quantile poverty line
#[derive(Debug, Clone)]
pub struct RobustThresholdEstimator<Q: QuantileEstimator = Linear> {
    deflation_factor: f64,
    quantile: f64,
    threshold: f64,
    quantile_est: Q,
}

impl RobustThresholdEstimator<Linear> {
    /// Create with the linear quantile estimator and a 3σ threshold
    ///
    /// # Errors
    /// `InvalidConfiguration` if `deflation_factor` is not a positive finite
    /// number or `quantile` is outside [0, 1].
    pub fn new(deflation_factor: f64, quantile: f64) -> Result<Self> {
        Self::with_estimator(deflation_factor, quantile, Linear)
    }
}

impl<Q: QuantileEstimator> RobustThresholdEstimator<Q> {
    pub fn with_estimator(deflation_factor: f64, quantile: f64, quantile_est: Q) -> Result<Self> {
        if !deflation_factor.is_finite() || deflation_factor <= 0.0 {
            return Err(Error::invalid_deflation(deflation_factor));
        }
        if !(0.0..=1.0).contains(&quantile) {
            return Err(Error::invalid_quantile(quantile));
        }
        Ok(Self {
            deflation_factor,
            quantile,
            threshold: DEFAULT_THRESHOLD,
            quantile_est,
        })
    }

    /// Override the bound half-width in standardized-MAD units
    pub fn with_threshold(mut self, threshold: f64) -> Result<Self> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "Outlier threshold {threshold} must be finite and non-negative"
            )));
        }
        self.threshold = threshold;
        Ok(self)
    }

    pub fn deflation_factor(&self) -> f64 {
        self.deflation_factor
    }

    pub fn quantile(&self) -> f64 {
        self.quantile
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Run deflation, filtering and quantile estimation
    ///
    /// # Errors
    /// `EmptyInput` if `aggregates` is empty (stage `Deflation`) or every
    /// household is rejected (stage `OutlierFilter`). Errors report the
    /// household count; callers that know the record count should attach it
    /// with [`Error::with_record_count`].
    #[instrument(skip(self, aggregates), fields(households = aggregates.len(), deflation = self.deflation_factor))]
    pub fn estimate(&self, aggregates: &[HouseholdAggregate]) -> Result<ThresholdEstimate> {
        if aggregates.is_empty() {
            return Err(Error::empty(Stage::Deflation, 0, 0));
        }

        let deflated: Vec<DeflatedHousehold> = aggregates
            .iter()
            .cloned()
            .map(|a| DeflatedHousehold::new(a, self.deflation_factor))
            .collect();

        let logs: Vec<f64> = deflated.iter().map(|h| h.log_deflated_total).collect();
        let bounds = FilterBounds::from_sample(&logs, self.threshold, &self.quantile_est)?;
        if bounds.is_degenerate() {
            warn!(
                median = bounds.median,
                "MAD is zero; only households at the median log expenditure are retained"
            );
        }

        let input_households = deflated.len();
        let retained: Vec<DeflatedHousehold> = deflated
            .into_iter()
            .filter(|h| bounds.contains(h.log_deflated_total))
            .collect();

        if retained.is_empty() {
            return Err(Error::empty(Stage::OutlierFilter, 0, input_households));
        }

        let mut values: Vec<f64> = retained.iter().map(|h| h.deflated_total).collect();
        let value = self
            .quantile_est
            .quantile(&mut values, self.quantile)
            .map_err(|e| match e {
                basket_quantile::Error::EmptyData => {
                    Error::empty(Stage::Quantile, 0, input_households)
                }
                other => other.into(),
            })?;

        let poverty_line = PovertyLine {
            value,
            quantile: self.quantile,
            households: retained.len(),
        };

        info!(
            retained = retained.len(),
            removed = input_households - retained.len(),
            lower = bounds.lower,
            upper = bounds.upper,
            poverty_line = value,
            "estimated poverty line"
        );

        Ok(ThresholdEstimate {
            retained,
            poverty_line,
            bounds,
            input_households,
        })
    }
}
