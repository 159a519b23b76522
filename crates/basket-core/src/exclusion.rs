//! Item exclusion sets for the refined basket

use crate::record::ExpenseRecord;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

lazy_static! {
    /// Items removed by the standard basket refinement: durable goods,
    /// property purchases, financial charges and other spending that
    /// distorts a consumption-based poverty line.
    static ref STANDARD_REFINEMENT: BTreeSet<i64> = [
        1_201_009, 3_101_002, 3_101_003, 3_101_015, 3_101_016, 3_101_017, 3_201_001, 3_201_002,
        3_201_006, 3_201_013, 3_201_021, 3_201_050, 3_202_001, 3_202_003, 3_202_028, 2_103_039,
        2_103_040, 2_103_042, 2_103_048, 2_103_055, 6_202_004, 5_102_053, 7_201_010, 7_201_019,
        7_201_095, 1_201_048, 1_201_061, 1_201_003, 1_201_001, 1_201_007, 7_101_034, 7_101_036,
        7_201_063, 7_201_090, 2_103_005, 2_103_049, 3_301_022, 5_102_004, 5_102_011, 5_102_051,
        5_101_010, 5_102_037, 5_102_010, 4_301_002, 4_301_004, 3_102_007, 3_102_009, 3_102_010,
    ]
    .into_iter()
    .collect();
}

/// Fixed set of item codes excluded from the refined basket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExclusionSet(BTreeSet<i64>);

impl ExclusionSet {
    pub fn new(codes: impl IntoIterator<Item = i64>) -> Self {
        Self(codes.into_iter().collect())
    }

    /// The standard refinement list
    pub fn standard_refinement() -> Self {
        Self(STANDARD_REFINEMENT.clone())
    }

    pub fn contains(&self, item_code: i64) -> bool {
        self.0.contains(&item_code)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.iter().copied()
    }

    /// Records whose item code is not excluded, in input order
    pub fn retain(&self, records: &[ExpenseRecord]) -> Vec<ExpenseRecord> {
        records
            .iter()
            .filter(|r| !self.contains(r.item_code))
            .cloned()
            .collect()
    }
}

impl FromIterator<i64> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self::new(iter)
    }
}
