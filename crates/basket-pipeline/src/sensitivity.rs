//! Headcount sensitivity around the poverty line
//!
//! Compares the headcount ratio measured on deflated expenditure with the
//! one measured on nominal expenditure, at the poverty line and at
//! perturbed thresholds.

use basket_core::{Error, Result, Stage};
use basket_spread::{DeflatedHousehold, PovertyLine};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::BandConfig;

/// One row of the sensitivity table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityRow {
    /// `P35` for the unperturbed line, otherwise e.g. `+10%` / `-5%`
    pub label: String,
    pub perturbation: f64,
    pub adjusted_line: f64,
    /// Percentage of households with deflated total at or below the line
    pub headcount_deflated: f64,
    /// Percentage of households with nominal total at or below the line
    pub headcount_nominal: f64,
    /// `headcount_deflated - headcount_nominal`, in percentage points
    pub difference: f64,
}

/// Cumulative shares at one threshold of the band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandPoint {
    pub value: f64,
    pub deflated_share: f64,
    pub nominal_share: f64,
    pub difference: f64,
}

/// Percentage of households whose `measure` is at or below `threshold`
pub fn headcount_ratio<F>(households: &[DeflatedHousehold], threshold: f64, measure: F) -> f64
where
    F: Fn(&DeflatedHousehold) -> f64,
{
    if households.is_empty() {
        return 0.0;
    }
    let poor = households.iter().filter(|h| measure(h) <= threshold).count();
    100.0 * poor as f64 / households.len() as f64
}

/// Label of a perturbation row
pub fn perturbation_label(perturbation: f64, line: &PovertyLine) -> String {
    if perturbation == 0.0 {
        line.label()
    } else {
        format!("{:+}%", (perturbation * 100.0).round() as i64)
    }
}

/// Headcount ratios at `line × (1 + p)` for each perturbation, in order
///
/// # Errors
/// `EmptyInput` if `filtered` is empty, `InvalidConfiguration` for a
/// non-finite perturbation.
#[instrument(skip(filtered, line), fields(households = filtered.len(), line = line.value))]
pub fn analyze(
    filtered: &[DeflatedHousehold],
    line: &PovertyLine,
    perturbations: &[f64],
) -> Result<Vec<SensitivityRow>> {
    if filtered.is_empty() {
        return Err(Error::empty(Stage::Sensitivity, 0, 0));
    }

    perturbations
        .iter()
        .map(|&p| {
            if !p.is_finite() {
                return Err(Error::InvalidConfiguration(format!(
                    "Perturbation {p} must be finite"
                )));
            }
            let adjusted_line = line.value * (1.0 + p);
            let headcount_deflated = headcount_ratio(filtered, adjusted_line, |h| h.deflated_total);
            let headcount_nominal = headcount_ratio(filtered, adjusted_line, |h| h.nominal_total());
            debug!(perturbation = p, headcount_deflated, headcount_nominal, "sensitivity row");
            Ok(SensitivityRow {
                label: perturbation_label(p, line),
                perturbation: p,
                adjusted_line,
                headcount_deflated,
                headcount_nominal,
                difference: headcount_deflated - headcount_nominal,
            })
        })
        .collect()
}

/// Cumulative deflated and nominal shares over evenly spaced thresholds
/// spanning `line × (1 ± band.width)`
pub fn cumulative_band(
    filtered: &[DeflatedHousehold],
    line: &PovertyLine,
    band: &BandConfig,
) -> Result<Vec<BandPoint>> {
    band.validate()?;
    if filtered.is_empty() {
        return Err(Error::empty(Stage::Sensitivity, 0, 0));
    }

    let start = line.value * (1.0 - band.width);
    let stop = line.value * (1.0 + band.width);
    let step = (stop - start) / (band.points - 1) as f64;

    Ok((0..band.points)
        .map(|i| {
            let value = if i == band.points - 1 {
                stop
            } else {
                start + step * i as f64
            };
            let deflated_share = headcount_ratio(filtered, value, |h| h.deflated_total);
            let nominal_share = headcount_ratio(filtered, value, |h| h.nominal_total());
            BandPoint {
                value,
                deflated_share,
                nominal_share,
                difference: deflated_share - nominal_share,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use basket_core::{Category, CategoryAmounts, HouseholdAggregate};

    fn households(nominal: &[f64], factor: f64) -> Vec<DeflatedHousehold> {
        nominal
            .iter()
            .enumerate()
            .map(|(i, &n)| {
                let mut amounts = CategoryAmounts::default();
                amounts.set(Category::Food, n);
                DeflatedHousehold::new(
                    HouseholdAggregate {
                        household: format!("h{i}"),
                        region: 26,
                        amounts,
                        nominal_total: n,
                    },
                    factor,
                )
            })
            .collect()
    }

    fn line(value: f64) -> PovertyLine {
        PovertyLine {
            value,
            quantile: 0.35,
            households: 0,
        }
    }

    #[test]
    fn test_labels() {
        let l = line(1.0);
        assert_eq!(perturbation_label(0.10, &l), "+10%");
        assert_eq!(perturbation_label(0.05, &l), "+5%");
        assert_eq!(perturbation_label(0.0, &l), "P35");
        assert_eq!(perturbation_label(-0.05, &l), "-5%");
        assert_eq!(perturbation_label(-0.10, &l), "-10%");
    }

    #[test]
    fn test_analyze_rows() {
        // nominal 90..=100 step 1; deflated = nominal / 0.9 = 100..=111.1
        let nominal: Vec<f64> = (90..=100).map(f64::from).collect();
        let filtered = households(&nominal, 0.9);
        let rows = analyze(&filtered, &line(100.0), &[0.10, 0.0, -0.10]).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].label, "+10%");
        assert_relative_eq!(rows[0].adjusted_line, 110.0);
        assert_eq!(rows[1].label, "P35");

        // At 100: deflated only the 90 household (100.0), nominal all 11
        assert_relative_eq!(rows[1].headcount_deflated, 100.0 / 11.0);
        assert_relative_eq!(rows[1].headcount_nominal, 100.0);
        assert_relative_eq!(rows[1].difference, 100.0 / 11.0 - 100.0);

        // At 90: nothing deflated, only the 90 household nominal
        assert_eq!(rows[2].headcount_deflated, 0.0);
        assert_relative_eq!(rows[2].headcount_nominal, 100.0 / 11.0);
    }

    #[test]
    fn test_analyze_empty() {
        let err = analyze(&[], &line(1.0), &[0.0]).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Sensitivity));
    }

    #[test]
    fn test_analyze_rejects_nan_perturbation() {
        let filtered = households(&[1.0], 1.0);
        assert!(analyze(&filtered, &line(1.0), &[f64::NAN]).is_err());
    }

    #[test]
    fn test_cumulative_band_spacing() {
        let nominal: Vec<f64> = (1..=100).map(f64::from).collect();
        let filtered = households(&nominal, 1.0);
        let points = cumulative_band(&filtered, &line(50.0), &BandConfig::default()).unwrap();

        assert_eq!(points.len(), 11);
        assert_relative_eq!(points[0].value, 40.0);
        assert_relative_eq!(points[5].value, 50.0);
        assert_eq!(points[10].value, 60.0);
        assert_relative_eq!(points[0].deflated_share, 40.0);
        assert_relative_eq!(points[10].deflated_share, 60.0);
        // Deflation factor 1.0: both measures agree
        assert!(points.iter().all(|p| p.difference == 0.0));
    }
}
