//! Random exposure books for benchmarks, demos and the `generate` command.

use crate::core::direction::{BUY_EUR, SELL_EUR};
use crate::core::exposure::{ExposureRow, ExposureSet};
use crate::ingest::csv_loader::REQUIRED_COLUMNS;
use chrono::{Days, NaiveDate};
use rand::Rng;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::io;

/// Configuration for generating a random exposure book.
#[derive(Debug, Clone)]
pub struct ExposureConfig {
    /// Number of exposure lines.
    pub row_count: usize,
    /// Expiry of the first line; later lines roll forward roughly monthly.
    pub start_date: NaiveDate,
    /// Smallest notional, in whole currency units.
    pub min_notional: u64,
    /// Largest notional, in whole currency units.
    pub max_notional: u64,
    /// Forward points are drawn from `[-max_forward_pts, max_forward_pts]`.
    pub max_forward_pts: Decimal,
}

impl Default for ExposureConfig {
    fn default() -> Self {
        Self {
            row_count: 12,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap_or_default(),
            min_notional: 100_000,
            max_notional: 10_000_000,
            max_forward_pts: Decimal::new(50, 4),
        }
    }
}

/// Generate a random exposure book.
///
/// Notionals are positive so the total can never be zero.
pub fn generate_random_exposures(config: &ExposureConfig) -> ExposureSet {
    let mut rng = rand::thread_rng();
    let mut set = ExposureSet::new();

    // forward points in 1e-6 steps
    let pts_scale = 6;
    let max_pts_micros = (config.max_forward_pts.abs() * Decimal::from(1_000_000))
        .trunc()
        .to_i64()
        .unwrap_or(0);

    let (lo, hi) = if config.min_notional <= config.max_notional {
        (config.min_notional, config.max_notional)
    } else {
        (config.max_notional, config.min_notional)
    };

    for i in 0..config.row_count {
        let expiry = config
            .start_date
            .checked_add_days(Days::new(30 * i as u64))
            .unwrap_or(config.start_date);
        let notional = Decimal::from(rng.gen_range(lo.max(1)..=hi.max(1)));
        let pts = rng.gen_range(-max_pts_micros..=max_pts_micros);
        let direction = if rng.gen_bool(0.5) { SELL_EUR } else { BUY_EUR };

        set.add(ExposureRow::new(
            expiry,
            notional,
            Decimal::new(pts, pts_scale),
            direction,
        ));
    }

    set
}

/// Write an exposure book as CSV in the ingestion layout.
pub fn write_exposures_csv<W: io::Write>(set: &ExposureSet, writer: W) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(REQUIRED_COLUMNS)?;
    for row in set {
        wtr.write_record([
            row.expiry().format("%Y-%m-%d").to_string(),
            row.notional().to_string(),
            row.forward_pts().to_string(),
            row.client_direction().to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
