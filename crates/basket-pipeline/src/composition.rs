//! Basket composition of households at or below the poverty line
//!
//! Category means are taken over the poor households of the filtered set.
//! Item means are taken over the expense lines of those same households,
//! drawn from the variant's full record set.

use basket_core::utils::{mean, share};
use basket_core::{classify, Category, Error, ExpenseRecord, Result, Stage};
use basket_spread::{DeflatedHousehold, PovertyLine};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::{debug, instrument};

/// Mean spend of one category among poor households
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryComposition {
    pub category: Category,
    pub mean_spend: f64,
    /// Fraction of the summed category means
    pub share: f64,
}

/// Mean spend of one item among poor households' expense lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemComposition {
    pub category: Category,
    pub item_code: i64,
    pub item_name: String,
    /// Mean over matching expense lines; 0.0 when no poor household bought it
    pub mean_spend: f64,
    pub share_of_category: f64,
    pub share_of_total: f64,
}

/// Composition tables for the households at or below the line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BelowLineComposition {
    /// Number of households at or below the line
    pub households: usize,
    /// Sum of the category means
    pub total_mean: f64,
    pub categories: Vec<CategoryComposition>,
    pub items: Vec<ItemComposition>,
}

/// Compose the basket of households whose deflated total is at or below
/// `line`
///
/// `observed` limits the categories reported; `records` must be the record
/// set of the same basket variant that produced `filtered`. An item code
/// recorded under several names is reported under the smallest one.
#[instrument(skip_all, fields(households = filtered.len(), line = line.value))]
pub fn composition_below_line(
    filtered: &[DeflatedHousehold],
    line: &PovertyLine,
    observed: &BTreeSet<Category>,
    records: &[ExpenseRecord],
) -> Result<BelowLineComposition> {
    let poor: Vec<&DeflatedHousehold> = filtered
        .iter()
        .filter(|h| h.deflated_total <= line.value)
        .collect();
    if poor.is_empty() {
        return Err(Error::empty(Stage::Composition, records.len(), 0));
    }

    let category_means: Vec<(Category, f64)> = observed
        .iter()
        .map(|&c| {
            let spend: Vec<f64> = poor.iter().map(|h| h.aggregate.amounts.get(c)).collect();
            (c, mean(&spend))
        })
        .collect();
    let total_mean: f64 = category_means.iter().map(|(_, m)| m).sum();

    let categories: Vec<CategoryComposition> = category_means
        .iter()
        .map(|&(category, mean_spend)| CategoryComposition {
            category,
            mean_spend,
            share: share(mean_spend, total_mean),
        })
        .collect();

    let poor_ids: HashSet<&str> = poor.iter().map(|h| h.household()).collect();
    let mut lines: BTreeMap<(Category, i64), (&str, Vec<f64>)> = BTreeMap::new();
    for record in records {
        let category = classify(record.item_code);
        if !observed.contains(&category) {
            continue;
        }
        let entry = lines
            .entry((category, record.item_code))
            .or_insert_with(|| (record.item_name.as_str(), Vec::new()));
        entry.0 = entry.0.min(record.item_name.as_str());
        if poor_ids.contains(record.household.as_str()) {
            entry.1.push(record.amount);
        }
    }

    let category_mean: BTreeMap<Category, f64> = category_means.into_iter().collect();
    let items: Vec<ItemComposition> = lines
        .into_iter()
        .map(|((category, item_code), (name, amounts))| {
            let mean_spend = mean(&amounts);
            let in_category = category_mean.get(&category).copied().unwrap_or(0.0);
            ItemComposition {
                category,
                item_code,
                item_name: name.to_string(),
                mean_spend,
                share_of_category: share(mean_spend, in_category),
                share_of_total: share(mean_spend, total_mean),
            }
        })
        .collect();

    debug!(
        poor = poor.len(),
        categories = categories.len(),
        items = items.len(),
        "composed below-line basket"
    );

    Ok(BelowLineComposition {
        households: poor.len(),
        total_mean,
        categories,
        items,
    })
}
