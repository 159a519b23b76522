//! Extension traits between basket types and Polars DataFrames

use crate::{ColumnNames, Result};
use basket_core::ExpenseRecord;
use polars::prelude::*;

/// Extension trait turning a survey DataFrame into expense records
pub trait BasketFrameExt {
    /// Extract expense records
    ///
    /// # Arguments
    /// * `columns` - Mapping from record fields to column names
    /// * `region` - Keep only rows of this region, if given
    ///
    /// # Errors
    /// `InvalidColumn` for a missing column, `TypeMismatch` for a column that
    /// cannot be cast, `InvalidInput` for null cells, and a core
    /// `EmptyInput` when the region filter leaves nothing.
    fn expense_records(
        &self,
        columns: &ColumnNames,
        region: Option<u32>,
    ) -> Result<Vec<ExpenseRecord>>;
}

/// Conversion of a result table into a DataFrame
pub trait ToFrame {
    fn to_frame(&self) -> Result<DataFrame>;
}
