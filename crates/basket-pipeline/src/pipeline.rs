//! Raw and refined basket pipeline
//!
//! One parameterized pipeline, run once per [`BasketVariant`]:
//! records → classification/aggregation → deflation, outlier filter and
//! poverty line → category weights and sub-item breakdown. Variants share no
//! mutable state; a failure in one is reported with its variant and never
//! alters the other's result.

use basket_core::{
    aggregate, BasketVariant, Category, Error, ExpenseRecord, Result, Stage,
};
use basket_spread::{
    DeflatedHousehold, FilterBounds, PovertyLine, RobustThresholdEstimator, ThresholdEstimate,
};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeSet;
use tracing::{info, instrument};

use crate::composition::{composition_below_line, BelowLineComposition};
use crate::config::BasketConfig;
use crate::sensitivity::{analyze, cumulative_band, BandPoint, SensitivityRow};
use crate::weights::{
    category_weights, compare_weights, sub_item_breakdown, CategoryWeight, SubItemWeight,
    WeightComparison,
};

/// Output of one basket variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasketResult {
    pub variant: BasketVariant,
    /// Records that entered aggregation
    pub record_count: usize,
    /// Categories with at least one record
    pub observed: BTreeSet<Category>,
    pub estimate: ThresholdEstimate,
    /// Observed categories ranked by share of filtered expenditure
    pub category_weights: Vec<CategoryWeight>,
    /// Item shares within each category, over all of the variant's records
    pub sub_items: Vec<SubItemWeight>,
}

impl BasketResult {
    /// Households retained by the outlier filter
    pub fn filtered(&self) -> &[DeflatedHousehold] {
        &self.estimate.retained
    }

    pub fn poverty_line(&self) -> &PovertyLine {
        &self.estimate.poverty_line
    }

    pub fn bounds(&self) -> &FilterBounds {
        &self.estimate.bounds
    }

    /// Households before outlier filtering
    pub fn household_count(&self) -> usize {
        self.estimate.input_households
    }
}

/// Both variants plus the comparative and below-line tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasketReport {
    pub raw: BasketResult,
    pub refined: BasketResult,
    /// Raw records whose item code is in the exclusion set
    pub excluded_records: usize,
    pub weight_comparison: Vec<WeightComparison>,
    /// Headcount sensitivity on the refined basket
    pub sensitivity: Vec<SensitivityRow>,
    /// Cumulative band around the refined poverty line
    pub band: Vec<BandPoint>,
    /// Refined-basket composition at or below the refined poverty line
    pub composition: BelowLineComposition,
}

/// Two-variant consumption-basket pipeline
#[derive(Debug, Clone)]
pub struct BasketPipeline {
    config: BasketConfig,
    estimator: RobustThresholdEstimator,
}

impl BasketPipeline {
    /// Validate `config` and build the pipeline
    pub fn new(config: BasketConfig) -> Result<Self> {
        config.validate()?;
        let estimator =
            RobustThresholdEstimator::new(config.deflation_factor, config.poverty_quantile)?
                .with_threshold(config.outlier_threshold)?;
        Ok(Self { config, estimator })
    }

    pub fn config(&self) -> &BasketConfig {
        &self.config
    }

    /// The record set a variant works on
    ///
    /// The refined variant never sees an excluded item code.
    pub fn variant_records<'a>(
        &self,
        variant: BasketVariant,
        records: &'a [ExpenseRecord],
    ) -> Cow<'a, [ExpenseRecord]> {
        match variant {
            BasketVariant::Raw => Cow::Borrowed(records),
            BasketVariant::Refined => Cow::Owned(self.config.exclusion.retain(records)),
        }
    }

    /// Run one variant end to end
    ///
    /// Every error is attributed to `variant`.
    #[instrument(skip(self, records), fields(variant = %variant, records = records.len()))]
    pub fn run_variant(
        &self,
        variant: BasketVariant,
        records: &[ExpenseRecord],
    ) -> Result<BasketResult> {
        self.run_variant_inner(variant, records)
            .map_err(|e| e.within(variant))
    }

    fn run_variant_inner(
        &self,
        variant: BasketVariant,
        records: &[ExpenseRecord],
    ) -> Result<BasketResult> {
        let variant_records = self.variant_records(variant, records);
        if variant == BasketVariant::Refined {
            info!(
                removed = records.len() - variant_records.len(),
                kept = variant_records.len(),
                "applied exclusion set"
            );
            if variant_records.is_empty() {
                return Err(Error::empty(Stage::Exclusion, records.len(), 0));
            }
        }

        let table = aggregate(&variant_records)?;
        let estimate = self
            .estimator
            .estimate(table.households())
            .map_err(|e| e.with_record_count(table.record_count()))?;

        let weights = category_weights(&estimate.retained, table.observed());
        let sub_items = sub_item_breakdown(&variant_records, &weights);

        info!(
            households = table.len(),
            retained = estimate.retained.len(),
            poverty_line = estimate.poverty_line.value,
            "basket variant complete"
        );

        Ok(BasketResult {
            variant,
            record_count: table.record_count(),
            observed: table.observed().clone(),
            estimate,
            category_weights: weights,
            sub_items,
        })
    }

    /// Run both variants independently, returning each outcome
    pub fn run_each(
        &self,
        records: &[ExpenseRecord],
    ) -> (Result<BasketResult>, Result<BasketResult>) {
        #[cfg(feature = "parallel")]
        {
            rayon::join(
                || self.run_variant(BasketVariant::Raw, records),
                || self.run_variant(BasketVariant::Refined, records),
            )
        }
        #[cfg(not(feature = "parallel"))]
        {
            (
                self.run_variant(BasketVariant::Raw, records),
                self.run_variant(BasketVariant::Refined, records),
            )
        }
    }

    /// Run both variants; fails with the first variant error
    pub fn run(&self, records: &[ExpenseRecord]) -> Result<(BasketResult, BasketResult)> {
        let (raw, refined) = self.run_each(records);
        Ok((raw?, refined?))
    }

    /// Run both variants and derive the comparative and below-line tables
    #[instrument(skip(self, records), fields(records = records.len()))]
    pub fn report(&self, records: &[ExpenseRecord]) -> Result<BasketReport> {
        let (raw, refined) = self.run(records)?;
        let excluded_records = raw.record_count - refined.record_count;
        info!(excluded_records, "compared raw and refined baskets");

        let weight_comparison = compare_weights(&raw.category_weights, &refined.category_weights);

        let line = *refined.poverty_line();
        let sensitivity = analyze(refined.filtered(), &line, &self.config.perturbations)
            .map_err(|e| e.within(BasketVariant::Refined))?;
        let band = cumulative_band(refined.filtered(), &line, &self.config.band)
            .map_err(|e| e.within(BasketVariant::Refined))?;

        let refined_records = self.variant_records(BasketVariant::Refined, records);
        let composition =
            composition_below_line(refined.filtered(), &line, &refined.observed, &refined_records)
                .map_err(|e| e.within(BasketVariant::Refined))?;

        Ok(BasketReport {
            raw,
            refined,
            excluded_records,
            weight_comparison,
            sensitivity,
            band,
            composition,
        })
    }
}
