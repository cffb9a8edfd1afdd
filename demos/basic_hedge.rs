//! Basic hedge pricing example.
//!
//! Prices a small client book and prints the trades the bank must execute.

use chrono::NaiveDate;
use fx_hedge::prelude::*;
use fx_hedge::report::presenter::render_text;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn main() {
    println!("╔══════════════════════════════════════╗");
    println!("║  fx-hedge: Basic Hedge Example       ║");
    println!("╚══════════════════════════════════════╝\n");

    // --- Scenario 1: two expiries, weighted 1:3 ---
    println!("━━━ Scenario 1: Two-expiry book ━━━\n");

    let book: ExposureSet = [
        ExposureRow::new(date(2024, 1, 31), dec!(100), dec!(0.0010), "Sell EUR"),
        ExposureRow::new(date(2024, 2, 29), dec!(300), dec!(0.0020), "Buy EUR"),
    ]
    .into_iter()
    .collect();

    match HedgeCalculator::compute(book.rows(), SpotRate::new(dec!(1.1000))) {
        Ok(result) => {
            println!("{}", result);
            println!("{}", render_text(&result));
        }
        Err(e) => println!("Calculation error: {}", e),
    }

    // --- Scenario 2: offsetting book ---
    println!("━━━ Scenario 2: Offsetting book ━━━\n");

    let offsetting = [
        ExposureRow::new(date(2024, 3, 28), dec!(5_000_000), dec!(0.0031), "Sell EUR vs USD"),
        ExposureRow::new(date(2024, 6, 27), dec!(-5_000_000), dec!(0.0058), "Buy EUR"),
    ];

    match HedgeCalculator::compute(&offsetting, SpotRate::default()) {
        Ok(result) => println!("{}", result),
        Err(e) => println!("Calculation error: {}", e),
    }
}
