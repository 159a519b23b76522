//! DataFrame and CSV ingestion of expense records

use crate::{BasketFrameExt, ColumnNames, Error, Result};
use basket_core::{ExpenseRecord, Stage};
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Fetch a column cast to `dtype`, naming the column on failure
fn typed_column(frame: &DataFrame, name: &str, dtype: &DataType) -> Result<Column> {
    let column = frame
        .column(name)
        .map_err(|_| Error::InvalidColumn(name.to_string()))?;
    column.cast(dtype).map_err(|_| Error::TypeMismatch {
        column: name.to_string(),
        expected: dtype.to_string(),
        got: column.dtype().to_string(),
    })
}

fn null_cell(column: &str, row: usize) -> Error {
    Error::InvalidInput(format!("Null value in column {column} at row {row}"))
}

impl BasketFrameExt for DataFrame {
    #[instrument(skip(self, columns), fields(rows = self.height()))]
    fn expense_records(
        &self,
        columns: &ColumnNames,
        region: Option<u32>,
    ) -> Result<Vec<ExpenseRecord>> {
        for name in columns.all() {
            if self.column(name).is_err() {
                return Err(Error::InvalidColumn(name.to_string()));
            }
        }

        let frame = match region {
            Some(region) => {
                let filtered = self
                    .clone()
                    .lazy()
                    .filter(
                        col(columns.region.as_str())
                            .cast(DataType::Int64)
                            .eq(lit(i64::from(region))),
                    )
                    .collect()?;
                debug!(region, kept = filtered.height(), "applied region filter");
                if filtered.height() == 0 {
                    return Err(basket_core::Error::empty(Stage::RegionFilter, self.height(), 0).into());
                }
                filtered
            }
            None => self.clone(),
        };

        let households = typed_column(&frame, &columns.household, &DataType::String)?;
        let regions = typed_column(&frame, &columns.region, &DataType::UInt32)?;
        let codes = typed_column(&frame, &columns.item_code, &DataType::Int64)?;
        let names = typed_column(&frame, &columns.item_name, &DataType::String)?;
        let amounts = typed_column(&frame, &columns.amount, &DataType::Float64)?;

        let rows = households
            .str()?
            .into_iter()
            .zip(regions.u32()?)
            .zip(codes.i64()?)
            .zip(names.str()?)
            .zip(amounts.f64()?)
            .enumerate();

        let mut records = Vec::with_capacity(frame.height());
        for (row, ((((household, region), code), name), amount)) in rows {
            let record = ExpenseRecord::new(
                household.ok_or_else(|| null_cell(&columns.household, row))?,
                region.ok_or_else(|| null_cell(&columns.region, row))?,
                code.ok_or_else(|| null_cell(&columns.item_code, row))?,
                name.unwrap_or_default(),
                amount.ok_or_else(|| null_cell(&columns.amount, row))?,
            );
            record.validate()?;
            records.push(record);
        }

        info!(records = records.len(), "extracted expense records");
        Ok(records)
    }
}

/// Read expense records from a CSV file with a header row
///
/// Columns are located by name through `columns`; other columns are
/// ignored.
pub fn read_expense_csv(
    path: impl AsRef<Path>,
    columns: &ColumnNames,
    region: Option<u32>,
) -> Result<Vec<ExpenseRecord>> {
    let path = path.as_ref();
    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    debug!(path = %path.display(), rows = frame.height(), "read expense csv");
    frame.expense_records(columns, region)
}
