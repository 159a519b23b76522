//! End-to-end tests for the two-variant basket pipeline

mod common;

use approx::assert_relative_eq;
use basket_core::{BasketVariant, Category, ExclusionSet, Stage};
use basket_pipeline::{BasketConfig, BasketPipeline};
use common::*;

#[test]
fn test_single_category_weighs_everything() -> anyhow::Result<()> {
    init_tracing();
    let records = food_only(30);
    let pipeline = BasketPipeline::new(BasketConfig::default())?;
    let (raw, refined) = pipeline.run(&records)?;

    for result in [&raw, &refined] {
        assert_eq!(result.category_weights.len(), 1);
        assert_eq!(result.category_weights[0].category, Category::Food);
        assert_relative_eq!(result.category_weights[0].share, 1.0);
        assert_eq!(result.sub_items.len(), 1);
        assert_relative_eq!(result.sub_items[0].share, 1.0);
    }
    assert_eq!(raw.poverty_line(), refined.poverty_line());
    Ok(())
}

#[test]
fn test_refined_record_count() -> anyhow::Result<()> {
    let records = mixed_basket(40);
    let excluded = records
        .iter()
        .filter(|r| r.item_code == HOUSE_PURCHASE)
        .count();

    let report = BasketPipeline::new(BasketConfig::default())?.report(&records)?;

    assert_eq!(excluded, 10);
    assert_eq!(report.excluded_records, excluded);
    assert_eq!(report.raw.record_count, records.len());
    assert_eq!(report.refined.record_count, records.len() - excluded);
    assert!(report
        .refined
        .sub_items
        .iter()
        .all(|s| s.item_code != HOUSE_PURCHASE));
    Ok(())
}

#[test]
fn test_refinement_lowers_housing_weight() -> anyhow::Result<()> {
    let report = BasketPipeline::new(BasketConfig::default())?.report(&mixed_basket(40))?;

    let housing = report
        .weight_comparison
        .iter()
        .find(|w| w.category == Category::Housing)
        .ok_or_else(|| anyhow::anyhow!("housing missing from comparison"))?;
    assert!(housing.refined_share < housing.raw_share);

    let total: f64 = report.weight_comparison.iter().map(|w| w.refined_share).sum();
    assert_relative_eq!(total, 1.0, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_headcount_at_line_matches_quantile() -> anyhow::Result<()> {
    let report = BasketPipeline::new(BasketConfig::default())?.report(&food_only(100))?;

    assert_eq!(report.refined.filtered().len(), 100);
    // P35 of 1000..1990 in steps of 10, deflated by 0.94
    assert_relative_eq!(
        report.refined.poverty_line().value,
        1346.5 / 0.94,
        epsilon = 1e-9
    );

    let at_line = report
        .sensitivity
        .iter()
        .find(|row| row.perturbation == 0.0)
        .ok_or_else(|| anyhow::anyhow!("unperturbed row missing"))?;
    assert_eq!(at_line.label, "P35");
    assert_relative_eq!(at_line.headcount_deflated, 35.0);
    assert_relative_eq!(at_line.headcount_nominal, 44.0);
    // Nominal totals sit below their deflated counterparts
    assert!(at_line.headcount_nominal >= at_line.headcount_deflated);
    assert_relative_eq!(
        at_line.difference,
        at_line.headcount_deflated - at_line.headcount_nominal
    );
    Ok(())
}

#[test]
fn test_sensitivity_rows_follow_configuration() -> anyhow::Result<()> {
    let report = BasketPipeline::new(BasketConfig::default())?.report(&food_only(100))?;

    let labels: Vec<&str> = report.sensitivity.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, ["+10%", "+5%", "P35", "-5%", "-10%"]);

    let headcounts: Vec<f64> = report
        .sensitivity
        .iter()
        .map(|r| r.headcount_deflated)
        .collect();
    assert!(headcounts.windows(2).all(|w| w[0] >= w[1]));

    assert_eq!(report.band.len(), 11);
    let line = report.refined.poverty_line().value;
    assert_relative_eq!(report.band[0].value, line * 0.8, epsilon = 1e-9);
    assert_relative_eq!(report.band[10].value, line * 1.2, epsilon = 1e-9);
    Ok(())
}

#[test]
fn test_composition_below_line() -> anyhow::Result<()> {
    let report = BasketPipeline::new(BasketConfig::default())?.report(&mixed_basket(40))?;
    let composition = &report.composition;

    let line = report.refined.poverty_line().value;
    let expected = report
        .refined
        .filtered()
        .iter()
        .filter(|h| h.deflated_total <= line)
        .count();
    assert_eq!(composition.households, expected);

    let shares: f64 = composition.categories.iter().map(|c| c.share).sum();
    assert_relative_eq!(shares, 1.0, epsilon = 1e-12);
    assert!(composition
        .items
        .iter()
        .all(|i| i.item_code != HOUSE_PURCHASE));
    Ok(())
}

#[test]
fn test_report_is_deterministic() -> anyhow::Result<()> {
    let records = mixed_basket(40);
    let pipeline = BasketPipeline::new(BasketConfig::default())?;

    let first = pipeline.report(&records)?;
    let mut reversed = records.clone();
    reversed.reverse();
    let second = pipeline.report(&reversed)?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_item_name_does_not_depend_on_record_order() -> anyhow::Result<()> {
    let mut records = food_only(10);
    records[6].item_name = "Arroz".to_string();
    let mut reversed = records.clone();
    reversed.reverse();

    let pipeline = BasketPipeline::new(BasketConfig::default())?;
    let first = pipeline.report(&records)?;
    let second = pipeline.report(&reversed)?;

    assert_eq!(first, second);
    assert_eq!(first.refined.sub_items[0].item_name, "Arroz");
    assert_eq!(first.composition.items[0].item_name, "Arroz");
    Ok(())
}

#[test]
fn test_sub_items_include_outlier_households() -> anyhow::Result<()> {
    let mut records = food_only(30);
    records.push(record("h999", CAVIAR, 1_000_000.0));
    let rice_total: f64 = records
        .iter()
        .filter(|r| r.item_code == RICE)
        .map(|r| r.amount)
        .sum();

    let (_, refined) = BasketPipeline::new(BasketConfig::default())?.run(&records)?;

    // The outlier is filtered before the poverty line and category weights
    assert_eq!(refined.household_count(), 31);
    assert_eq!(refined.filtered().len(), 30);
    assert!(refined.filtered().iter().all(|h| h.household() != "h999"));
    assert_eq!(refined.category_weights.len(), 1);
    assert_relative_eq!(refined.category_weights[0].total, rice_total);

    // but still weighs in the sub-item breakdown
    let codes: Vec<i64> = refined.sub_items.iter().map(|s| s.item_code).collect();
    assert_eq!(codes, [CAVIAR, RICE]);
    assert_relative_eq!(refined.sub_items[0].total, 1_000_000.0);
    assert_relative_eq!(
        refined.sub_items[0].share,
        1_000_000.0 / (1_000_000.0 + rice_total),
        epsilon = 1e-12
    );
    Ok(())
}

#[test]
fn test_failed_variant_is_named() -> anyhow::Result<()> {
    let records: Vec<_> = (0..10)
        .map(|i| record(&format!("h{i}"), CAR_PURCHASE, 1000.0 + i as f64))
        .collect();
    let pipeline = BasketPipeline::new(BasketConfig::default())?;

    let (raw, refined) = pipeline.run_each(&records);
    let raw = raw?;
    assert_eq!(raw.variant, BasketVariant::Raw);
    assert_eq!(raw.household_count(), 10);

    let err = refined.expect_err("refined basket has no records");
    assert_eq!(err.variant(), Some(BasketVariant::Refined));
    assert_eq!(err.stage(), Some(Stage::Exclusion));
    assert!(err.to_string().starts_with("refined basket failed"));
    Ok(())
}

#[test]
fn test_empty_input_fails_raw_variant() {
    let pipeline = BasketPipeline::new(BasketConfig::default()).unwrap();
    let err = pipeline.run(&[]).unwrap_err();

    assert_eq!(err.variant(), Some(BasketVariant::Raw));
    assert_eq!(err.stage(), Some(Stage::Aggregation));
}

#[test]
fn test_custom_exclusion_from_json() -> anyhow::Result<()> {
    let config = BasketConfig::from_json_str(r#"{ "exclusion": [2201001] }"#)?;
    assert_eq!(config.exclusion, ExclusionSet::new([ELECTRICITY]));

    let report = BasketPipeline::new(config)?.report(&mixed_basket(20))?;
    assert_eq!(report.excluded_records, 20);
    Ok(())
}
