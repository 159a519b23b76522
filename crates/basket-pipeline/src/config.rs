//! Pipeline configuration

use basket_core::{Error, ExclusionSet, Result};
use serde::{Deserialize, Serialize};

/// Band of evenly spaced thresholds around the poverty line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandConfig {
    /// Relative half-width: values span `line × (1 ± width)`
    pub width: f64,
    /// Number of evaluation points, endpoints included
    pub points: usize,
}

impl Default for BandConfig {
    fn default() -> Self {
        Self {
            width: 0.20,
            points: 11,
        }
    }
}

impl BandConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.width.is_finite() || self.width < 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "Band width {} must be finite and non-negative",
                self.width
            )));
        }
        if self.points < 2 {
            return Err(Error::InvalidConfiguration(format!(
                "Band needs at least 2 points, got {}",
                self.points
            )));
        }
        Ok(())
    }
}

/// Static configuration of a basket comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasketConfig {
    /// Divisor turning nominal into real expenditure
    pub deflation_factor: f64,
    /// Quantile of filtered deflated expenditure defining the poverty line
    pub poverty_quantile: f64,
    /// Half-width of the outlier bounds in standardized-MAD units
    pub outlier_threshold: f64,
    /// Items removed from the refined basket
    pub exclusion: ExclusionSet,
    /// Relative poverty-line perturbations, in reporting order
    pub perturbations: Vec<f64>,
    pub band: BandConfig,
}

impl Default for BasketConfig {
    fn default() -> Self {
        Self {
            deflation_factor: 0.94,
            poverty_quantile: 0.35,
            outlier_threshold: 3.0,
            exclusion: ExclusionSet::standard_refinement(),
            perturbations: vec![0.10, 0.05, 0.0, -0.05, -0.10],
            band: BandConfig::default(),
        }
    }
}

impl BasketConfig {
    /// Parse a JSON document; absent fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::InvalidConfiguration(format!("Malformed configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.deflation_factor.is_finite() || self.deflation_factor <= 0.0 {
            return Err(Error::invalid_deflation(self.deflation_factor));
        }
        if !(0.0..=1.0).contains(&self.poverty_quantile) {
            return Err(Error::invalid_quantile(self.poverty_quantile));
        }
        if !self.outlier_threshold.is_finite() || self.outlier_threshold < 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "Outlier threshold {} must be finite and non-negative",
                self.outlier_threshold
            )));
        }
        if let Some(p) = self.perturbations.iter().find(|p| !p.is_finite() || **p <= -1.0) {
            return Err(Error::InvalidConfiguration(format!(
                "Perturbation {p} must be finite and greater than -1"
            )));
        }
        self.band.validate()
    }

    pub fn with_deflation_factor(mut self, deflation_factor: f64) -> Self {
        self.deflation_factor = deflation_factor;
        self
    }

    pub fn with_poverty_quantile(mut self, poverty_quantile: f64) -> Self {
        self.poverty_quantile = poverty_quantile;
        self
    }

    pub fn with_outlier_threshold(mut self, outlier_threshold: f64) -> Self {
        self.outlier_threshold = outlier_threshold;
        self
    }

    pub fn with_exclusion(mut self, exclusion: ExclusionSet) -> Self {
        self.exclusion = exclusion;
        self
    }

    pub fn with_perturbations(mut self, perturbations: Vec<f64>) -> Self {
        self.perturbations = perturbations;
        self
    }

    pub fn with_band(mut self, band: BandConfig) -> Self {
        self.band = band;
        self
    }
}
