//! Expense records

use crate::error::{Error, Result};
use crate::types::Stage;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One observed expense line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Household identifier
    pub household: String,
    /// Region identifier
    pub region: u32,
    /// Seven-digit item code
    pub item_code: i64,
    /// Item display name
    pub item_name: String,
    /// Expenditure in local currency
    pub amount: f64,
}

impl ExpenseRecord {
    pub fn new(
        household: impl Into<String>,
        region: u32,
        item_code: i64,
        item_name: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            household: household.into(),
            region,
            item_code,
            item_name: item_name.into(),
            amount,
        }
    }

    /// Check that the amount is a finite, non-negative value
    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(Error::InvalidRecord(format!(
                "household {} item {} has amount {}; expected a finite non-negative value",
                self.household, self.item_code, self.amount
            )));
        }
        Ok(())
    }
}

/// Keep only the records of one region
///
/// Fails with `EmptyInput` when no record belongs to `region`.
pub fn filter_region(records: &[ExpenseRecord], region: u32) -> Result<Vec<ExpenseRecord>> {
    let kept: Vec<ExpenseRecord> = records
        .iter()
        .filter(|r| r.region == region)
        .cloned()
        .collect();

    debug!(
        region,
        input = records.len(),
        kept = kept.len(),
        "filtered records by region"
    );

    if kept.is_empty() {
        return Err(Error::empty(Stage::RegionFilter, records.len(), 0));
    }
    Ok(kept)
}
