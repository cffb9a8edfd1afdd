use crate::core::direction::TradeDirection;
use crate::core::exposure::ExposureRow;
use crate::core::spot::{format_rate, SpotRate};
use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors arising from the hedge computation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HedgeError {
    #[error("Total notional is zero. Enter at least one positive Notional.")]
    ZeroNotional,
    /// An intermediate left the representable decimal range. `row` is the
    /// 1-based position of the exposure in the submitted batch.
    #[error("arithmetic overflow computing {field} for exposure row {row}")]
    Overflow { row: usize, field: &'static str },
}

/// An exposure row with its derived hedge fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedExposureRow {
    pub exposure: ExposureRow,
    /// `spot + forward_pts`.
    pub outright: Decimal,
    /// `notional / total_notional`.
    pub weight: Decimal,
    /// `outright * weight`.
    pub contribution: Decimal,
    /// Bank side, the inverse of the client direction.
    pub trade_direction: TradeDirection,
}

impl EnrichedExposureRow {
    pub fn expiry(&self) -> NaiveDate {
        self.exposure.expiry()
    }

    pub fn notional(&self) -> Decimal {
        self.exposure.notional()
    }

    pub fn forward_pts(&self) -> Decimal {
        self.exposure.forward_pts()
    }

    pub fn client_direction(&self) -> &str {
        self.exposure.client_direction()
    }
}

/// Outcome of a hedge computation over one exposure batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HedgeResult {
    /// Notional-weighted sum of outrights.
    blended_price: Decimal,
    /// Spot used for every outright.
    spot: SpotRate,
    /// Sum of notionals the weights were normalised by.
    total_notional: Decimal,
    /// Enriched rows, in input order.
    rows: Vec<EnrichedExposureRow>,
}

impl HedgeResult {
    pub fn blended_price(&self) -> Decimal {
        self.blended_price
    }

    pub fn spot(&self) -> SpotRate {
        self.spot
    }

    pub fn total_notional(&self) -> Decimal {
        self.total_notional
    }

    pub fn rows(&self) -> &[EnrichedExposureRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of weights. One, up to decimal rounding of each division.
    pub fn weight_sum(&self) -> Decimal {
        self.rows.iter().map(|r| r.weight).sum()
    }
}

impl std::fmt::Display for HedgeResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Hedge Result ===")?;
        writeln!(f, "Spot:            {}", self.spot)?;
        writeln!(f, "Total Notional:  {}", self.total_notional)?;
        writeln!(f, "Exposures:       {}", self.rows.len())?;
        writeln!(f, "Blended Price:   {}", format_rate(self.blended_price))
    }
}

/// The hedge calculator.
///
/// Stateless: every call derives its result from its arguments alone and
/// never mutates them, so it can be called from any host without setup.
pub struct HedgeCalculator;

impl HedgeCalculator {
    /// Compute the blended forward price and the bank trade side per row.
    ///
    /// 1. `outright = spot + forward_pts` per row.
    /// 2. `total = sum(notional)`; exactly zero fails with [`HedgeError::ZeroNotional`].
    /// 3. `weight = notional / total`, `contribution = outright * weight`.
    /// 4. `blended = sum(contribution)` in row order.
    ///
    /// The zero guard is exact: offsetting notionals whose sum is tiny but
    /// nonzero pass through and can produce very large weights.
    ///
    /// # Examples
    ///
    /// ```
    /// use fx_hedge::prelude::*;
    /// use chrono::NaiveDate;
    /// use rust_decimal_macros::dec;
    ///
    /// let rows = vec![
    ///     ExposureRow::new(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(), dec!(100), dec!(0.0010), "Sell EUR"),
    ///     ExposureRow::new(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(), dec!(300), dec!(0.0020), "Buy EUR"),
    /// ];
    ///
    /// let result = HedgeCalculator::compute(&rows, SpotRate::new(dec!(1.1000))).unwrap();
    /// assert_eq!(result.blended_price(), dec!(1.10175));
    /// ```
    pub fn compute(rows: &[ExposureRow], spot: SpotRate) -> Result<HedgeResult, HedgeError> {
        let spot_value = spot.value();

        let outrights = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                spot_value
                    .checked_add(row.forward_pts())
                    .ok_or(HedgeError::Overflow { row: i + 1, field: "outright" })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let total_notional = rows
            .iter()
            .enumerate()
            .try_fold(Decimal::ZERO, |acc, (i, row)| {
                acc.checked_add(row.notional())
                    .ok_or(HedgeError::Overflow { row: i + 1, field: "total notional" })
            })?;

        if total_notional.is_zero() {
            warn!("rejecting {} exposures: total notional is zero", rows.len());
            return Err(HedgeError::ZeroNotional);
        }

        let mut enriched = Vec::with_capacity(rows.len());
        let mut blended_price = Decimal::ZERO;

        for (i, (row, outright)) in rows.iter().zip(outrights).enumerate() {
            let weight = row
                .notional()
                .checked_div(total_notional)
                .ok_or(HedgeError::Overflow { row: i + 1, field: "weight" })?;
            let contribution = outright
                .checked_mul(weight)
                .ok_or(HedgeError::Overflow { row: i + 1, field: "contribution" })?;
            blended_price = blended_price
                .checked_add(contribution)
                .ok_or(HedgeError::Overflow { row: i + 1, field: "blended price" })?;

            enriched.push(EnrichedExposureRow {
                exposure: row.clone(),
                outright,
                weight,
                contribution,
                trade_direction: TradeDirection::from_client_direction(row.client_direction()),
            });
        }

        debug!(
            "hedged {} exposures, total notional {}, blended {}",
            enriched.len(),
            total_notional,
            blended_price
        );

        Ok(HedgeResult {
            blended_price,
            spot,
            total_notional,
            rows: enriched,
        })
    }
}
