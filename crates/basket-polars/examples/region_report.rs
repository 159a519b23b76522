//! Prints the raw vs refined basket report for one region of a survey CSV
//!
//! Run with:
//! `RUST_LOG=info cargo run -p basket-polars --example region_report -- despesas.csv 26 [config.json]`

use anyhow::Context;
use basket_pipeline::{BasketConfig, BasketPipeline};
use basket_polars::{read_expense_csv, ColumnNames, ToFrame};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .context("usage: region_report <expenses.csv> [region] [config.json]")?;
    let region = args
        .next()
        .map(|r| r.parse::<u32>())
        .transpose()
        .context("region must be an unsigned integer")?;
    let config = match args.next() {
        Some(config_path) => {
            let json = std::fs::read_to_string(&config_path)
                .with_context(|| format!("reading {config_path}"))?;
            BasketConfig::from_json_str(&json)?
        }
        None => BasketConfig::default(),
    };

    let records = read_expense_csv(&path, &ColumnNames::default(), region)?;
    let report = BasketPipeline::new(config)?.report(&records)?;

    println!("=== Summary ===");
    println!("{}", report.to_frame()?);
    println!("Records removed by refinement: {}", report.excluded_records);

    for result in [&report.raw, &report.refined] {
        println!("\n=== {} basket: category weights ===", result.variant);
        println!("{}", result.category_weights.to_frame()?);
        println!("\n=== {} basket: sub-items ===", result.variant);
        println!("{}", result.sub_items.to_frame()?);
    }

    println!("\n=== Weight comparison ===");
    println!("{}", report.weight_comparison.to_frame()?);

    println!("\n=== Headcount sensitivity ({}) ===", report.refined.poverty_line().label());
    println!("{}", report.sensitivity.to_frame()?);
    println!("{}", report.band.to_frame()?);

    println!(
        "\n=== Below the line: {} households ===",
        report.composition.households
    );
    println!("{}", report.composition.categories.to_frame()?);
    println!("{}", report.composition.items.to_frame()?);

    Ok(())
}
