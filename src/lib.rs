//! # fx-hedge
//!
//! Blended forward FX hedge pricing for a treasury desk.
//!
//! Given a batch of client forward exposures and a spot rate, this crate
//! computes the notional-weighted blended forward price the bank hedges at,
//! and the per-line trades the bank executes on the opposite side of each
//! client.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: exposure rows, spot rate, trade direction
//! - **hedge** — The blended-price calculator
//! - **ingest** — CSV ingestion into typed exposure rows
//! - **report** — Client and trade views, text / JSON / CSV rendering
//! - **simulation** — Random exposure books for testing and benchmarks

pub mod core;
pub mod hedge;
pub mod ingest;
pub mod report;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::direction::TradeDirection;
    pub use crate::core::exposure::{ExposureRow, ExposureSet};
    pub use crate::core::spot::SpotRate;
    pub use crate::hedge::calculator::{EnrichedExposureRow, HedgeCalculator, HedgeError, HedgeResult};
    pub use crate::ingest::csv_loader::{CsvOptions, IngestionError};
    pub use crate::report::views::{ClientExposureLine, ContributionPoint, TradeInstruction};
}
