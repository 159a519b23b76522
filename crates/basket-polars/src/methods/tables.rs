//! Result tables as DataFrames
//!
//! Categories are written with their display labels. Shares are written as
//! percentages in `*_pct` columns, matching the headcount tables.

use crate::{Result, ToFrame};
use basket_core::Category;
use basket_pipeline::{
    BandPoint, BasketReport, CategoryComposition, CategoryWeight, ItemComposition,
    SensitivityRow, SubItemWeight, WeightComparison,
};
use basket_spread::DeflatedHousehold;
use polars::prelude::*;

fn frame(columns: Vec<Series>) -> Result<DataFrame> {
    Ok(DataFrame::new(columns.into_iter().map(Column::from).collect())?)
}

fn percent(values: impl Iterator<Item = f64>) -> Vec<f64> {
    values.map(|v| 100.0 * v).collect()
}

fn labels<'a>(categories: impl Iterator<Item = &'a Category>) -> Vec<&'static str> {
    categories.map(|c| c.label()).collect()
}

impl ToFrame for [CategoryWeight] {
    fn to_frame(&self) -> Result<DataFrame> {
        frame(vec![
            Series::new("category".into(), labels(self.iter().map(|w| &w.category))),
            Series::new("total".into(), self.iter().map(|w| w.total).collect::<Vec<_>>()),
            Series::new("share_pct".into(), percent(self.iter().map(|w| w.share))),
        ])
    }
}

impl ToFrame for [SubItemWeight] {
    fn to_frame(&self) -> Result<DataFrame> {
        frame(vec![
            Series::new("category".into(), labels(self.iter().map(|w| &w.category))),
            Series::new(
                "item_code".into(),
                self.iter().map(|w| w.item_code).collect::<Vec<_>>(),
            ),
            Series::new(
                "item_name".into(),
                self.iter().map(|w| w.item_name.as_str()).collect::<Vec<_>>(),
            ),
            Series::new("total".into(), self.iter().map(|w| w.total).collect::<Vec<_>>()),
            Series::new("share_pct".into(), percent(self.iter().map(|w| w.share))),
        ])
    }
}

impl ToFrame for [WeightComparison] {
    fn to_frame(&self) -> Result<DataFrame> {
        frame(vec![
            Series::new("category".into(), labels(self.iter().map(|w| &w.category))),
            Series::new(
                "raw_share_pct".into(),
                percent(self.iter().map(|w| w.raw_share)),
            ),
            Series::new(
                "refined_share_pct".into(),
                percent(self.iter().map(|w| w.refined_share)),
            ),
        ])
    }
}

impl ToFrame for [SensitivityRow] {
    fn to_frame(&self) -> Result<DataFrame> {
        frame(vec![
            Series::new(
                "label".into(),
                self.iter().map(|r| r.label.as_str()).collect::<Vec<_>>(),
            ),
            Series::new(
                "perturbation".into(),
                self.iter().map(|r| r.perturbation).collect::<Vec<_>>(),
            ),
            Series::new(
                "adjusted_line".into(),
                self.iter().map(|r| r.adjusted_line).collect::<Vec<_>>(),
            ),
            Series::new(
                "headcount_deflated".into(),
                self.iter().map(|r| r.headcount_deflated).collect::<Vec<_>>(),
            ),
            Series::new(
                "headcount_nominal".into(),
                self.iter().map(|r| r.headcount_nominal).collect::<Vec<_>>(),
            ),
            Series::new(
                "difference".into(),
                self.iter().map(|r| r.difference).collect::<Vec<_>>(),
            ),
        ])
    }
}

impl ToFrame for [BandPoint] {
    fn to_frame(&self) -> Result<DataFrame> {
        frame(vec![
            Series::new("value".into(), self.iter().map(|p| p.value).collect::<Vec<_>>()),
            Series::new(
                "deflated_share".into(),
                self.iter().map(|p| p.deflated_share).collect::<Vec<_>>(),
            ),
            Series::new(
                "nominal_share".into(),
                self.iter().map(|p| p.nominal_share).collect::<Vec<_>>(),
            ),
            Series::new(
                "difference".into(),
                self.iter().map(|p| p.difference).collect::<Vec<_>>(),
            ),
        ])
    }
}

impl ToFrame for [CategoryComposition] {
    fn to_frame(&self) -> Result<DataFrame> {
        frame(vec![
            Series::new("category".into(), labels(self.iter().map(|c| &c.category))),
            Series::new(
                "mean_spend".into(),
                self.iter().map(|c| c.mean_spend).collect::<Vec<_>>(),
            ),
            Series::new("share_pct".into(), percent(self.iter().map(|c| c.share))),
        ])
    }
}

impl ToFrame for [ItemComposition] {
    fn to_frame(&self) -> Result<DataFrame> {
        frame(vec![
            Series::new("category".into(), labels(self.iter().map(|i| &i.category))),
            Series::new(
                "item_code".into(),
                self.iter().map(|i| i.item_code).collect::<Vec<_>>(),
            ),
            Series::new(
                "item_name".into(),
                self.iter().map(|i| i.item_name.as_str()).collect::<Vec<_>>(),
            ),
            Series::new(
                "mean_spend".into(),
                self.iter().map(|i| i.mean_spend).collect::<Vec<_>>(),
            ),
            Series::new(
                "share_of_category_pct".into(),
                percent(self.iter().map(|i| i.share_of_category)),
            ),
            Series::new(
                "share_of_total_pct".into(),
                percent(self.iter().map(|i| i.share_of_total)),
            ),
        ])
    }
}

/// One row per household with its category amounts and totals
impl ToFrame for [DeflatedHousehold] {
    fn to_frame(&self) -> Result<DataFrame> {
        let mut columns = vec![
            Series::new(
                "household".into(),
                self.iter().map(|h| h.household()).collect::<Vec<_>>(),
            ),
            Series::new(
                "region".into(),
                self.iter().map(|h| h.aggregate.region).collect::<Vec<_>>(),
            ),
        ];
        for category in Category::ALL {
            columns.push(Series::new(
                category.label().into(),
                self.iter()
                    .map(|h| h.aggregate.amounts.get(category))
                    .collect::<Vec<_>>(),
            ));
        }
        columns.extend([
            Series::new(
                "nominal_total".into(),
                self.iter().map(|h| h.nominal_total()).collect::<Vec<_>>(),
            ),
            Series::new(
                "deflated_total".into(),
                self.iter().map(|h| h.deflated_total).collect::<Vec<_>>(),
            ),
            Series::new(
                "log_deflated_total".into(),
                self.iter().map(|h| h.log_deflated_total).collect::<Vec<_>>(),
            ),
        ]);
        frame(columns)
    }
}

/// Per-variant summary: record, household and retained counts plus the line
impl ToFrame for BasketReport {
    fn to_frame(&self) -> Result<DataFrame> {
        let variants = [&self.raw, &self.refined];
        frame(vec![
            Series::new(
                "variant".into(),
                variants.iter().map(|v| v.variant.name()).collect::<Vec<_>>(),
            ),
            Series::new(
                "records".into(),
                variants.iter().map(|v| v.record_count as u64).collect::<Vec<_>>(),
            ),
            Series::new(
                "households".into(),
                variants
                    .iter()
                    .map(|v| v.household_count() as u64)
                    .collect::<Vec<_>>(),
            ),
            Series::new(
                "retained".into(),
                variants
                    .iter()
                    .map(|v| v.filtered().len() as u64)
                    .collect::<Vec<_>>(),
            ),
            Series::new(
                "poverty_line".into(),
                variants
                    .iter()
                    .map(|v| v.poverty_line().value)
                    .collect::<Vec<_>>(),
            ),
        ])
    }
}
