//! Basket composition weights
//!
//! Category weights are taken over the outlier-filtered households. The
//! sub-item breakdown is taken over every record of the variant, filtered or
//! not, so it reflects item importance across the whole population.

use basket_core::utils::{ordered_sum, share};
use basket_core::{classify, Category, ExpenseRecord};
use basket_spread::DeflatedHousehold;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Share of one category in total expenditure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeight {
    pub category: Category,
    /// Category expenditure summed over households
    pub total: f64,
    /// Fraction of overall expenditure, in [0, 1]
    pub share: f64,
}

/// Share of one item within its category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubItemWeight {
    pub category: Category,
    pub item_code: i64,
    pub item_name: String,
    pub total: f64,
    /// Fraction of the category's expenditure, in [0, 1]
    pub share: f64,
}

/// One category's share in both basket variants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightComparison {
    pub category: Category,
    pub raw_share: f64,
    pub refined_share: f64,
}

/// Descending order of shares
fn by_share_desc(a_share: f64, b_share: f64) -> Ordering {
    b_share.total_cmp(&a_share)
}

/// Rank observed categories by their share of filtered expenditure
pub fn category_weights(
    filtered: &[DeflatedHousehold],
    observed: &BTreeSet<Category>,
) -> Vec<CategoryWeight> {
    let totals: Vec<(Category, f64)> = observed
        .iter()
        .map(|&c| {
            let total: f64 = filtered.iter().map(|h| h.aggregate.amounts.get(c)).sum();
            (c, total)
        })
        .collect();
    let grand_total: f64 = totals.iter().map(|(_, t)| t).sum();

    let mut weights: Vec<CategoryWeight> = totals
        .into_iter()
        .map(|(category, total)| CategoryWeight {
            category,
            total,
            share: share(total, grand_total),
        })
        .collect();
    weights.sort_by(|a, b| by_share_desc(a.share, b.share).then(a.category.cmp(&b.category)));
    weights
}

/// Share of `category` in a ranking; absent categories weigh zero
pub fn share_of(weights: &[CategoryWeight], category: Category) -> f64 {
    weights
        .iter()
        .find(|w| w.category == category)
        .map(|w| w.share)
        .unwrap_or(0.0)
}

/// Per-item shares within each ranked category
///
/// Categories appear in `ranking` order; items within a category are sorted
/// by share descending, then item code. An item code recorded under several
/// names is reported under the lexicographically smallest one.
pub fn sub_item_breakdown(
    records: &[ExpenseRecord],
    ranking: &[CategoryWeight],
) -> Vec<SubItemWeight> {
    let mut items: BTreeMap<Category, BTreeMap<i64, (&str, Vec<f64>)>> = BTreeMap::new();
    for record in records {
        let entry = items
            .entry(classify(record.item_code))
            .or_default()
            .entry(record.item_code)
            .or_insert_with(|| (record.item_name.as_str(), Vec::new()));
        entry.0 = entry.0.min(record.item_name.as_str());
        entry.1.push(record.amount);
    }

    let mut breakdown = Vec::new();
    for weight in ranking {
        let Some(category_items) = items.get(&weight.category) else {
            continue;
        };

        let item_totals: Vec<(i64, &str, f64)> = category_items
            .iter()
            .map(|(&code, (name, amounts))| (code, *name, ordered_sum(amounts)))
            .collect();
        let category_total = ordered_sum(
            &item_totals.iter().map(|(_, _, t)| *t).collect::<Vec<_>>(),
        );

        let mut rows: Vec<SubItemWeight> = item_totals
            .into_iter()
            .map(|(item_code, name, total)| SubItemWeight {
                category: weight.category,
                item_code,
                item_name: name.to_string(),
                total,
                share: share(total, category_total),
            })
            .collect();
        rows.sort_by(|a, b| by_share_desc(a.share, b.share).then(a.item_code.cmp(&b.item_code)));
        breakdown.extend(rows);
    }
    breakdown
}

/// Join raw and refined rankings over the union of their categories
///
/// Ordered by refined share descending, then raw share descending.
pub fn compare_weights(raw: &[CategoryWeight], refined: &[CategoryWeight]) -> Vec<WeightComparison> {
    let categories: BTreeSet<Category> = raw
        .iter()
        .chain(refined.iter())
        .map(|w| w.category)
        .collect();

    let mut rows: Vec<WeightComparison> = categories
        .into_iter()
        .map(|category| WeightComparison {
            category,
            raw_share: share_of(raw, category),
            refined_share: share_of(refined, category),
        })
        .collect();
    rows.sort_by(|a, b| {
        by_share_desc(a.refined_share, b.refined_share)
            .then(by_share_desc(a.raw_share, b.raw_share))
            .then(a.category.cmp(&b.category))
    });
    rows
}
