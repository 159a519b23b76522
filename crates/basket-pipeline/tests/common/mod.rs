//! Common test utilities for basket-pipeline tests

use basket_core::ExpenseRecord;

pub const REGION: u32 = 26;

/// Rice: food, never excluded
pub const RICE: i64 = 1_100_101;
/// Electricity: housing, never excluded
pub const ELECTRICITY: i64 = 2_201_001;
/// Bus fare: transport, never excluded
pub const BUS_FARE: i64 = 5_101_001;
/// House purchase: in the standard refinement set
pub const HOUSE_PURCHASE: i64 = 3_101_002;
/// Car purchase: in the standard refinement set
pub const CAR_PURCHASE: i64 = 5_102_004;
/// Caviar: food, never excluded
pub const CAVIAR: i64 = 1_100_102;

pub fn record(household: &str, item_code: i64, amount: f64) -> ExpenseRecord {
    let name = match item_code {
        RICE => "Rice",
        ELECTRICITY => "Electricity",
        BUS_FARE => "Bus fare",
        HOUSE_PURCHASE => "House purchase",
        CAR_PURCHASE => "Car purchase",
        CAVIAR => "Caviar",
        _ => "Other",
    };
    ExpenseRecord::new(household, REGION, item_code, name, amount)
}

/// `n` households with a single food record each, totals `1000, 1010, ...`
pub fn food_only(n: usize) -> Vec<ExpenseRecord> {
    (0..n)
        .map(|i| record(&format!("h{i:03}"), RICE, 1000.0 + 10.0 * i as f64))
        .collect()
}

/// Households with a mixed basket; every fourth one also buys a house
pub fn mixed_basket(n: usize) -> Vec<ExpenseRecord> {
    let mut records = Vec::new();
    for i in 0..n {
        let id = format!("h{i:03}");
        let x = i as f64;
        records.push(record(&id, RICE, 200.0 + 4.0 * x));
        records.push(record(&id, ELECTRICITY, 80.0 + 2.0 * x));
        records.push(record(&id, BUS_FARE, 30.0 + x));
        if i % 4 == 0 {
            records.push(record(&id, HOUSE_PURCHASE, 500.0 + 10.0 * x));
        }
    }
    records
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
