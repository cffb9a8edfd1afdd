use crate::core::direction::TradeDirection;
use crate::hedge::calculator::HedgeResult;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Client-facing line: what the client asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientExposureLine {
    #[serde(rename = "Expiry")]
    pub expiry: NaiveDate,
    #[serde(rename = "ClientDirection")]
    pub client_direction: String,
    #[serde(rename = "Notional")]
    pub notional: Decimal,
    #[serde(rename = "ForwardPts")]
    pub forward_pts: Decimal,
}

/// Bank-facing trade instruction: the hedge the desk executes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeInstruction {
    #[serde(rename = "Expiry")]
    pub expiry: NaiveDate,
    #[serde(rename = "Direction")]
    pub direction: TradeDirection,
    #[serde(rename = "Notional")]
    pub notional: Decimal,
    /// Outright forward rate for the expiry.
    #[serde(rename = "Rate")]
    pub rate: Decimal,
}

/// One bar of the per-expiry contribution chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionPoint {
    #[serde(rename = "Expiry")]
    pub expiry: NaiveDate,
    #[serde(rename = "Contribution")]
    pub contribution: Decimal,
}

impl HedgeResult {
    /// `Expiry, ClientDirection, Notional, ForwardPts` in input order.
    pub fn client_view(&self) -> Vec<ClientExposureLine> {
        self.rows()
            .iter()
            .map(|r| ClientExposureLine {
                expiry: r.expiry(),
                client_direction: r.client_direction().to_string(),
                notional: r.notional(),
                forward_pts: r.forward_pts(),
            })
            .collect()
    }

    /// `Expiry, Direction, Notional, Rate` in input order.
    pub fn trade_instructions(&self) -> Vec<TradeInstruction> {
        self.rows()
            .iter()
            .map(|r| TradeInstruction {
                expiry: r.expiry(),
                direction: r.trade_direction,
                notional: r.notional(),
                rate: r.outright,
            })
            .collect()
    }

    /// Contribution series keyed by expiry. Duplicate expiries stay separate.
    pub fn contributions(&self) -> Vec<ContributionPoint> {
        self.rows()
            .iter()
            .map(|r| ContributionPoint {
                expiry: r.expiry(),
                contribution: r.contribution,
            })
            .collect()
    }
}
