use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker text in a client direction that identifies a client selling EUR.
pub const SELL_EUR: &str = "Sell EUR";

/// Label for the opposite side.
pub const BUY_EUR: &str = "Buy EUR";

/// The side the bank takes to hedge a client exposure.
///
/// The bank always trades the inverse of the client. Classification is a
/// plain two-branch substring test: a client direction containing
/// `"Sell EUR"` (case-sensitive) makes the bank buy EUR, and any other text,
/// including malformed or unexpected labels, makes the bank sell EUR.
///
/// # Examples
///
/// ```
/// use fx_hedge::core::direction::TradeDirection;
///
/// assert_eq!(
///     TradeDirection::from_client_direction("Sell EUR vs USD"),
///     TradeDirection::BuyEur,
/// );
/// assert_eq!(
///     TradeDirection::from_client_direction("Buy EUR"),
///     TradeDirection::SellEur,
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeDirection {
    #[serde(rename = "Buy EUR")]
    BuyEur,
    #[serde(rename = "Sell EUR")]
    SellEur,
}

impl TradeDirection {
    /// Invert a free-text client direction into the bank's trade side.
    pub fn from_client_direction(client_direction: &str) -> Self {
        if client_direction.contains(SELL_EUR) {
            TradeDirection::BuyEur
        } else {
            TradeDirection::SellEur
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TradeDirection::BuyEur => BUY_EUR,
            TradeDirection::SellEur => SELL_EUR,
        }
    }
}

impl fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
