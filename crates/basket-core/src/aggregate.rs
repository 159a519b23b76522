//! Long-to-wide aggregation of expense records
//!
//! Turns per-line [`ExpenseRecord`]s into one [`HouseholdAggregate`] per
//! household holding a total for every [`Category`]. Aggregation is purely
//! additive; deflation and outlier handling happen later.

use crate::category::Category;
use crate::classifier::classify;
use crate::error::{Error, Result};
use crate::record::ExpenseRecord;
use crate::types::Stage;
use crate::utils::ordered_sum;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, instrument};

/// Expenditure per category, with every category always present
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryAmounts([f64; Category::COUNT]);

impl CategoryAmounts {
    pub fn get(&self, category: Category) -> f64 {
        self.0[category.index()]
    }

    pub fn set(&mut self, category: Category, amount: f64) {
        self.0[category.index()] = amount;
    }

    /// Sum over categories in declaration order
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.iter().map(move |&c| (c, self.get(c)))
    }
}

/// One household's aggregated expenditure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdAggregate {
    pub household: String,
    pub region: u32,
    pub amounts: CategoryAmounts,
    /// Sum of `amounts`
    pub nominal_total: f64,
}

/// Aggregated households plus the categories seen in the input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdTable {
    households: Vec<HouseholdAggregate>,
    observed: BTreeSet<Category>,
    record_count: usize,
}

impl HouseholdTable {
    /// Households ordered by identifier, then region
    pub fn households(&self) -> &[HouseholdAggregate] {
        &self.households
    }

    pub fn into_households(self) -> Vec<HouseholdAggregate> {
        self.households
    }

    /// Categories with at least one record in the input
    ///
    /// A category absent here has zero spend in every household.
    pub fn observed(&self) -> &BTreeSet<Category> {
        &self.observed
    }

    /// Number of records that were aggregated
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    pub fn len(&self) -> usize {
        self.households.len()
    }

    pub fn is_empty(&self) -> bool {
        self.households.is_empty()
    }

    pub fn get(&self, household: &str) -> Option<&HouseholdAggregate> {
        self.households.iter().find(|h| h.household == household)
    }
}

/// Aggregate expense records into one row per household
///
/// Households are keyed by (identifier, region). Amounts within each
/// (household, category) cell are summed in sorted order, so the output is
/// bit-identical for any permutation of `records`.
///
/// # Errors
///
/// `EmptyInput` when `records` is empty, `InvalidRecord` for a negative or
/// non-finite amount.
#[instrument(skip(records), fields(records = records.len()))]
pub fn aggregate(records: &[ExpenseRecord]) -> Result<HouseholdTable> {
    if records.is_empty() {
        return Err(Error::empty(Stage::Aggregation, 0, 0));
    }

    let mut cells: BTreeMap<(&str, u32), [Vec<f64>; Category::COUNT]> = BTreeMap::new();
    let mut observed = BTreeSet::new();

    for record in records {
        record.validate()?;
        let category = classify(record.item_code);
        observed.insert(category);
        cells
            .entry((record.household.as_str(), record.region))
            .or_insert_with(|| std::array::from_fn(|_| Vec::new()))[category.index()]
        .push(record.amount);
    }

    let households: Vec<HouseholdAggregate> = cells
        .into_iter()
        .map(|((household, region), cell)| {
            let mut amounts = CategoryAmounts::default();
            for category in Category::ALL {
                amounts.set(category, ordered_sum(&cell[category.index()]));
            }
            HouseholdAggregate {
                household: household.to_string(),
                region,
                amounts,
                nominal_total: amounts.total(),
            }
        })
        .collect();

    debug!(
        households = households.len(),
        categories = observed.len(),
        "aggregated expense records"
    );

    Ok(HouseholdTable {
        households,
        observed,
        record_count: records.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn record(household: &str, code: i64, amount: f64) -> ExpenseRecord {
        ExpenseRecord::new(household, 26, code, format!("item {code}"), amount)
    }

    #[test]
    fn test_aggregate_basic() {
        let records = vec![
            record("a", 1_100_101, 10.0),
            record("a", 1_100_102, 5.0),
            record("a", 5_101_001, 2.0),
            record("b", 3_101_002, 100.0),
        ];
        let table = aggregate(&records).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.record_count(), 4);

        let a = table.get("a").unwrap();
        assert_eq!(a.amounts.get(Category::Food), 15.0);
        assert_eq!(a.amounts.get(Category::Transport), 2.0);
        assert_eq!(a.amounts.get(Category::Housing), 0.0);
        assert_eq!(a.nominal_total, 17.0);

        let b = table.get("b").unwrap();
        assert_eq!(b.nominal_total, 100.0);

        let observed: Vec<_> = table.observed().iter().copied().collect();
        assert_eq!(
            observed,
            vec![Category::Food, Category::Housing, Category::Transport]
        );
    }

    #[test]
    fn test_zero_spend_household_is_kept() {
        let records = vec![record("a", 1_100_101, 10.0), record("z", 1_100_101, 0.0)];
        let table = aggregate(&records).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("z").unwrap().nominal_total, 0.0);
    }

    #[test]
    fn test_empty_records() {
        let err = aggregate(&[]).unwrap_err();
        assert!(matches!(
            err,
            Error::EmptyInput {
                stage: Stage::Aggregation,
                ..
            }
        ));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let err = aggregate(&[record("a", 1_100_101, -1.0)]).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord(_)));
    }

    #[test]
    fn test_households_ordered_by_id() {
        let records = vec![record("c", 1, 1.0), record("a", 1, 1.0), record("b", 1, 1.0)];
        let table = aggregate(&records).unwrap();
        let ids: Vec<_> = table.households().iter().map(|h| h.household.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    fn arb_records() -> impl Strategy<Value = Vec<ExpenseRecord>> {
        prop::collection::vec(
            (0u8..6, 1_000_000i64..9_999_999, 0.0f64..5_000.0),
            1..80,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .map(|(h, code, amount)| record(&format!("h{h}"), code, amount))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_category_totals_sum_exactly_to_nominal(records in arb_records()) {
            let table = aggregate(&records).unwrap();
            for h in table.households() {
                let sum: f64 = h.amounts.iter().map(|(_, v)| v).sum();
                prop_assert_eq!(sum.to_bits(), h.nominal_total.to_bits());
                prop_assert!(h.amounts.iter().all(|(_, v)| v >= 0.0));
            }
        }

        #[test]
        fn prop_nominal_matches_record_sum(records in arb_records()) {
            let table = aggregate(&records).unwrap();
            for h in table.households() {
                let expected: f64 = records
                    .iter()
                    .filter(|r| r.household == h.household)
                    .map(|r| r.amount)
                    .sum();
                assert_relative_eq!(h.nominal_total, expected, max_relative = 1e-9, epsilon = 1e-9);
            }
        }

        #[test]
        fn prop_order_independent(
            (records, shuffled) in arb_records()
                .prop_flat_map(|records| (Just(records.clone()), Just(records).prop_shuffle()))
        ) {
            let a = aggregate(&records).unwrap();
            let b = aggregate(&shuffled).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
