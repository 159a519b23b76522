//! Common test utilities for basket-polars tests

use polars::prelude::*;
use std::path::PathBuf;

/// Survey frame with two regions; region 26 has ten households
pub fn survey_frame() -> DataFrame {
    let mut households = Vec::new();
    let mut regions = Vec::new();
    let mut codes = Vec::new();
    let mut names = Vec::new();
    let mut amounts = Vec::new();

    for i in 0..10i64 {
        let x = i as f64;
        for (code, name, amount) in [
            (1_100_101i64, "Arroz", 300.0 + 10.0 * x),
            (2_201_001, "Energia eletrica", 90.0 + 3.0 * x),
            (3_101_002, "Aquisicao de imovel", 800.0),
        ] {
            households.push(1000 + i);
            regions.push(26i64);
            codes.push(code);
            names.push(name);
            amounts.push(amount);
        }
    }
    for i in 0..3i64 {
        households.push(2000 + i);
        regions.push(35);
        codes.push(1_100_101);
        names.push("Arroz");
        amounts.push(500.0);
    }

    df![
        "domicilio" => households,
        "uf" => regions,
        "cod_subitem" => codes,
        "subitem" => names,
        "gasto" => amounts,
    ]
    .unwrap()
}

/// Path of a scratch file unique to this process and `name`
pub fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("basket-polars-{}-{name}", std::process::id()))
}

/// Extract a single f64 value from a result DataFrame
pub fn extract_value(df: &DataFrame, col_name: &str, row: usize) -> f64 {
    df.column(col_name)
        .unwrap()
        .f64()
        .unwrap()
        .get(row)
        .unwrap()
}
