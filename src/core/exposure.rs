use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One client forward-FX exposure line.
///
/// Rows are produced by ingestion with every field already coerced to its
/// declared type; the hedge calculator never sees a missing or malformed value.
///
/// # Examples
///
/// ```
/// use fx_hedge::core::exposure::ExposureRow;
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let row = ExposureRow::new(
///     NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
///     dec!(1_000_000),
///     dec!(0.0012),
///     "Sell EUR",
/// );
///
/// assert_eq!(row.notional(), dec!(1_000_000));
/// assert_eq!(row.client_direction(), "Sell EUR");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExposureRow {
    /// Forward settlement date.
    expiry: NaiveDate,
    /// Face amount. May be negative.
    notional: Decimal,
    /// Forward points, on the same scale as spot.
    forward_pts: Decimal,
    /// The client's stated intent, as free text.
    client_direction: String,
}

impl ExposureRow {
    pub fn new(
        expiry: NaiveDate,
        notional: Decimal,
        forward_pts: Decimal,
        client_direction: impl Into<String>,
    ) -> Self {
        Self {
            expiry,
            notional,
            forward_pts,
            client_direction: client_direction.into(),
        }
    }

    pub fn expiry(&self) -> NaiveDate {
        self.expiry
    }

    pub fn notional(&self) -> Decimal {
        self.notional
    }

    pub fn forward_pts(&self) -> Decimal {
        self.forward_pts
    }

    pub fn client_direction(&self) -> &str {
        &self.client_direction
    }
}

/// An ordered batch of exposures submitted for one hedge computation.
///
/// Order is significant: results are reported in the same order and the
/// blended price is summed in it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExposureSet {
    rows: Vec<ExposureRow>,
}

impl ExposureSet {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add(&mut self, row: ExposureRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[ExposureRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of all notionals, in row order.
    pub fn total_notional(&self) -> Decimal {
        self.rows.iter().map(|r| r.notional()).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExposureRow> {
        self.rows.iter()
    }
}

impl FromIterator<ExposureRow> for ExposureSet {
    fn from_iter<T: IntoIterator<Item = ExposureRow>>(iter: T) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ExposureSet {
    type Item = &'a ExposureRow;
    type IntoIter = std::slice::Iter<'a, ExposureRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
