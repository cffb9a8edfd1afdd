//! Rendering of hedge results for the desk.
//!
//! Three outputs are supported: a plain-text report (metric, client table,
//! trade table, contribution chart), a JSON document, and a CSV of the
//! trade instructions ready to hand to execution.

use crate::core::spot::format_rate;
use crate::hedge::calculator::HedgeResult;
use crate::report::views::{ClientExposureLine, ContributionPoint, TradeInstruction};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt::Write as _;
use std::io;

/// Widest bar in the contribution chart, in characters.
pub const CHART_WIDTH: usize = 40;

/// Output format selector for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!("unknown format '{}': expected text, json or csv", other)),
        }
    }
}

/// JSON output schema for a hedge run.
#[derive(Debug, Clone, Serialize)]
pub struct HedgeReport {
    pub blended_price: String,
    pub spot: String,
    pub total_notional: Decimal,
    pub client_exposures: Vec<ClientExposureLine>,
    pub trade_instructions: Vec<TradeInstruction>,
    pub contributions: Vec<ContributionPoint>,
}

impl From<&HedgeResult> for HedgeReport {
    fn from(result: &HedgeResult) -> Self {
        Self {
            blended_price: format_rate(result.blended_price()),
            spot: result.spot().to_string(),
            total_notional: result.total_notional(),
            client_exposures: result.client_view(),
            trade_instructions: result.trade_instructions(),
            contributions: result.contributions(),
        }
    }
}

/// Pretty-printed JSON report.
pub fn render_json(result: &HedgeResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&HedgeReport::from(result))
}

/// Write the trade instructions as CSV with header `Expiry,Direction,Notional,Rate`.
pub fn render_trades_csv<W: io::Write>(result: &HedgeResult, writer: W) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for trade in result.trade_instructions() {
        wtr.serialize(trade)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Plain-text report.
pub fn render_text(result: &HedgeResult) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_text(&mut out, result);
    out
}

fn write_text(out: &mut String, result: &HedgeResult) -> std::fmt::Result {
    writeln!(out, "Blended Hedge Price: {}", format_rate(result.blended_price()))?;
    writeln!(out, "Spot Rate:           {}", result.spot())?;

    writeln!(out, "\n#### Client Exposures\n")?;
    writeln!(
        out,
        "  {:<12} {:<20} {:>18} {:>12}",
        "Expiry", "ClientDirection", "Notional", "ForwardPts"
    )?;
    for line in result.client_view() {
        writeln!(
            out,
            "  {:<12} {:<20} {:>18} {:>12}",
            line.expiry.to_string(),
            line.client_direction,
            line.notional.to_string(),
            line.forward_pts.to_string()
        )?;
    }

    writeln!(out, "\n#### Trade Instructions\n")?;
    writeln!(
        out,
        "  {:<12} {:<10} {:>18} {:>12}",
        "Expiry", "Direction", "Notional", "Rate"
    )?;
    for trade in result.trade_instructions() {
        writeln!(
            out,
            "  {:<12} {:<10} {:>18} {:>12}",
            trade.expiry.to_string(),
            trade.direction.as_str(),
            trade.notional.to_string(),
            format_rate(trade.rate)
        )?;
    }

    writeln!(out, "\n#### Per-expiry Contributions\n")?;
    let points = result.contributions();
    let max_abs = points
        .iter()
        .map(|p| p.contribution.abs())
        .max()
        .unwrap_or(Decimal::ZERO);
    for point in &points {
        writeln!(
            out,
            "  {:<12} {:>12} {}",
            point.expiry.to_string(),
            format_rate(point.contribution),
            bar(point.contribution, max_abs)
        )?;
    }
    Ok(())
}

/// A horizontal bar scaled against the largest absolute contribution.
/// Negative contributions are drawn with `-` instead of `#`.
pub fn bar(value: Decimal, max_abs: Decimal) -> String {
    if max_abs.is_zero() {
        return String::new();
    }
    // ratio first so contributions near Decimal::MAX cannot overflow
    let len = value
        .abs()
        .checked_div(max_abs)
        .and_then(|ratio| ratio.checked_mul(Decimal::from(CHART_WIDTH)))
        .and_then(|scaled| scaled.round().to_usize())
        .unwrap_or(0)
        .min(CHART_WIDTH);
    let glyph = if value.is_sign_negative() { "-" } else { "#" };
    glyph.repeat(len)
}
