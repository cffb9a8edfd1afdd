use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Decimal places used when entering and displaying rates.
pub const RATE_DISPLAY_DP: u32 = 6;

/// Format a rate or price with [`RATE_DISPLAY_DP`] decimals, rounding half away from zero.
pub fn format_rate(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(RATE_DISPLAY_DP, RoundingStrategy::MidpointAwayFromZero);
    // pad by hand: a precision format overflows for values near Decimal::MAX
    let mut text = rounded.to_string();
    let decimals = match text.find('.') {
        Some(point) => text.len() - point - 1,
        None => {
            text.push('.');
            0
        }
    };
    for _ in decimals..RATE_DISPLAY_DP as usize {
        text.push('0');
    }
    text
}

/// Errors arising from operator-supplied spot text.
#[derive(Debug, Error)]
pub enum SpotRateError {
    #[error("spot rate must be a number, got '{0}'")]
    NotANumber(String),
}

/// The current spot exchange rate for the single currency pair in use.
///
/// Defaults to `1.000000` when the operator has not set a value.
///
/// # Examples
///
/// ```
/// use fx_hedge::core::spot::SpotRate;
///
/// let spot: SpotRate = "1.1".parse().unwrap();
/// assert_eq!(spot.to_string(), "1.100000");
/// assert_eq!(SpotRate::default().to_string(), "1.000000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpotRate(Decimal);

impl SpotRate {
    pub fn new(rate: Decimal) -> Self {
        Self(rate)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl Default for SpotRate {
    fn default() -> Self {
        Self(Decimal::ONE)
    }
}

impl From<Decimal> for SpotRate {
    fn from(rate: Decimal) -> Self {
        Self::new(rate)
    }
}

impl FromStr for SpotRate {
    type Err = SpotRateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map(Self)
            .map_err(|_| SpotRateError::NotANumber(s.to_string()))
    }
}

impl fmt::Display for SpotRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_rate(self.0))
    }
}
