use crate::core::exposure::{ExposureRow, ExposureSet};
use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use log::{debug, info};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

pub const COL_EXPIRY: &str = "Expiry";
pub const COL_NOTIONAL: &str = "Notional";
pub const COL_FORWARD_PTS: &str = "ForwardPts";
pub const COL_CLIENT_DIRECTION: &str = "ClientDirection";

/// Columns every exposure file must carry, in reporting order.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    COL_EXPIRY,
    COL_NOTIONAL,
    COL_FORWARD_PTS,
    COL_CLIENT_DIRECTION,
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Errors arising while turning an uploaded file into exposure rows.
///
/// Any of these means the dataset is rejected as a whole; the hedge
/// calculator is never invoked on a partial set.
#[derive(Debug, Error)]
pub enum IngestionError {
    #[error("Error reading CSV: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error reading CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("Invalid {column} '{value}' on line {line}: {reason}")]
    InvalidField {
        line: usize,
        column: &'static str,
        value: String,
        reason: String,
    },
}

/// Reader settings for exposure files.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Trim surrounding whitespace from headers and fields.
    pub trim: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
        }
    }
}

/// Load exposures from a CSV file on disk.
pub fn load_exposures_from_path(
    path: impl AsRef<Path>,
    options: &CsvOptions,
) -> Result<ExposureSet, IngestionError> {
    let path = path.as_ref();
    info!("loading exposures from {}", path.display());
    let file = File::open(path)?;
    load_exposures_from_reader(file, options)
}

/// Load exposures from any CSV byte source.
///
/// The header row must name `Expiry`, `Notional`, `ForwardPts` and
/// `ClientDirection`; other columns are ignored. Rows keep file order.
///
/// # Examples
///
/// ```
/// use fx_hedge::ingest::csv_loader::{load_exposures_from_reader, CsvOptions};
///
/// let data = "Expiry,Notional,ForwardPts,ClientDirection\n2024-01-31,100,0.0010,Sell EUR\n";
/// let set = load_exposures_from_reader(data.as_bytes(), &CsvOptions::default()).unwrap();
/// assert_eq!(set.len(), 1);
/// ```
pub fn load_exposures_from_reader<R: Read>(
    reader: R,
    options: &CsvOptions,
) -> Result<ExposureSet, IngestionError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .trim(if options.trim {
            csv::Trim::All
        } else {
            csv::Trim::None
        })
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let columns = ColumnIndex::resolve(&headers)?;

    let mut set = ExposureSet::new();
    for (idx, result) in reader.records().enumerate() {
        // records() starts after the header; lines are 1-based
        let line = idx + 2;
        let record = result?;
        set.add(columns.parse_row(&record, line)?);
    }

    debug!("ingested {} exposure rows", set.len());
    Ok(set)
}

/// Positions of the required columns within a header row.
struct ColumnIndex {
    expiry: usize,
    notional: usize,
    forward_pts: usize,
    client_direction: usize,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord) -> Result<Self, IngestionError> {
        let names: Vec<&str> = headers.iter().map(normalize_header_name).collect();
        let find = |name: &str| names.iter().position(|h| *h == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| find(**c).is_none())
            .map(|c| c.to_string())
            .collect();

        match (
            find(COL_EXPIRY),
            find(COL_NOTIONAL),
            find(COL_FORWARD_PTS),
            find(COL_CLIENT_DIRECTION),
        ) {
            (Some(expiry), Some(notional), Some(forward_pts), Some(client_direction)) => Ok(Self {
                expiry,
                notional,
                forward_pts,
                client_direction,
            }),
            _ => Err(IngestionError::MissingColumns(missing)),
        }
    }

    fn parse_row(&self, record: &StringRecord, line: usize) -> Result<ExposureRow, IngestionError> {
        let expiry_raw = required_field(record, self.expiry, COL_EXPIRY, line)?;
        let expiry = parse_expiry(expiry_raw).ok_or_else(|| IngestionError::InvalidField {
            line,
            column: COL_EXPIRY,
            value: expiry_raw.to_string(),
            reason: "expected a date such as 2024-01-31".to_string(),
        })?;

        let notional = parse_number(
            required_field(record, self.notional, COL_NOTIONAL, line)?,
            COL_NOTIONAL,
            line,
        )?;
        let forward_pts = parse_number(
            required_field(record, self.forward_pts, COL_FORWARD_PTS, line)?,
            COL_FORWARD_PTS,
            line,
        )?;
        let client_direction =
            required_field(record, self.client_direction, COL_CLIENT_DIRECTION, line)?;

        Ok(ExposureRow::new(expiry, notional, forward_pts, client_direction))
    }
}

fn required_field<'r>(
    record: &'r StringRecord,
    idx: usize,
    column: &'static str,
    line: usize,
) -> Result<&'r str, IngestionError> {
    match record.get(idx) {
        Some(v) if !v.trim().is_empty() => Ok(v),
        other => Err(IngestionError::InvalidField {
            line,
            column,
            value: other.unwrap_or_default().to_string(),
            reason: "value is missing".to_string(),
        }),
    }
}

fn normalize_header_name(name: &str) -> &str {
    // spreadsheet exports often prefix the first header with a UTF-8 BOM
    name.trim().trim_start_matches('\u{feff}')
}

/// Parse an expiry in any of the accepted date or datetime layouts.
pub fn parse_expiry(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}

fn parse_number(raw: &str, column: &'static str, line: usize) -> Result<Decimal, IngestionError> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|e| IngestionError::InvalidField {
            line,
            column,
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn load(data: &str) -> Result<ExposureSet, IngestionError> {
        load_exposures_from_reader(data.as_bytes(), &CsvOptions::default())
    }

    #[test]
    fn test_load_basic() {
        let set = load(
            "Expiry,Notional,ForwardPts,ClientDirection\n\
             2024-01-31,100,0.0010,Sell EUR\n\
             2024-02-29,300,0.0020,Buy EUR\n",
        )
        .unwrap();

        assert_eq!(set.len(), 2);
        let first = &set.rows()[0];
        assert_eq!(first.expiry(), NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        assert_eq!(first.notional(), dec!(100));
        assert_eq!(first.forward_pts(), dec!(0.0010));
        assert_eq!(first.client_direction(), "Sell EUR");
    }

    #[test]
    fn test_columns_in_any_order_with_extras() {
        let set = load(
            "Trader,ClientDirection,ForwardPts,Expiry,Notional\n\
             jd,Sell EUR vs USD,-0.0005,2024-06-28,-2500000\n",
        )
        .unwrap();

        let row = &set.rows()[0];
        assert_eq!(row.notional(), dec!(-2500000));
        assert_eq!(row.forward_pts(), dec!(-0.0005));
        assert_eq!(row.client_direction(), "Sell EUR vs USD");
    }

    #[test]
    fn test_missing_columns_listed() {
        let err = load("Expiry,Notional\n2024-01-31,100\n").unwrap_err();
        match &err {
            IngestionError::MissingColumns(cols) => {
                assert_eq!(cols, &vec!["ForwardPts".to_string(), "ClientDirection".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(err.to_string(), "Missing columns: ForwardPts, ClientDirection");
    }

    #[test]
    fn test_header_names_are_case_sensitive() {
        let err = load("expiry,Notional,ForwardPts,ClientDirection\n").unwrap_err();
        assert!(matches!(err, IngestionError::MissingColumns(ref c) if c == &vec!["Expiry".to_string()]));
    }

    #[test]
    fn test_bom_header_accepted() {
        let set = load("\u{feff}Expiry,Notional,ForwardPts,ClientDirection\n2024-01-31,1,0,Buy EUR\n")
            .unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_header_only_is_empty_set() {
        let set = load("Expiry,Notional,ForwardPts,ClientDirection\n").unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_bad_notional_rejected() {
        let err = load(
            "Expiry,Notional,ForwardPts,ClientDirection\n\
             2024-01-31,100,0.001,Sell EUR\n\
             2024-02-29,lots,0.002,Buy EUR\n",
        )
        .unwrap_err();
        match err {
            IngestionError::InvalidField { line, column, value, .. } => {
                assert_eq!(line, 3);
                assert_eq!(column, "Notional");
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_field_rejected() {
        let err = load(
            "Expiry,Notional,ForwardPts,ClientDirection\n\
             2024-01-31,100,,Sell EUR\n",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            IngestionError::InvalidField { column: "ForwardPts", line: 2, .. }
        ));
    }

    #[test]
    fn test_bad_date_rejected() {
        let err = load(
            "Expiry,Notional,ForwardPts,ClientDirection\n\
             2024-02-30,100,0.001,Sell EUR\n",
        )
        .unwrap_err();
        assert!(matches!(err, IngestionError::InvalidField { column: "Expiry", .. }));
    }

    #[test]
    fn test_ragged_row_is_csv_error() {
        let err = load(
            "Expiry,Notional,ForwardPts,ClientDirection\n\
             2024-01-31,100\n",
        )
        .unwrap_err();
        assert!(matches!(err, IngestionError::Csv(_)));
        assert!(err.to_string().starts_with("Error reading CSV:"));
    }

    #[test]
    fn test_parse_expiry_layouts() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        for raw in [
            "2024-01-31",
            "2024/01/31",
            "01/31/2024",
            "2024-01-31 00:00:00",
            "2024-01-31T17:30:00",
        ] {
            assert_eq!(parse_expiry(raw), Some(expected), "{raw}");
        }
        assert_eq!(parse_expiry("31 Jan"), None);
    }

    #[test]
    fn test_scientific_notional() {
        let set = load(
            "Expiry,Notional,ForwardPts,ClientDirection\n\
             2024-01-31,1.5e6,2.5e-3,Buy EUR\n",
        )
        .unwrap();
        assert_eq!(set.rows()[0].notional(), dec!(1500000));
        assert_eq!(set.rows()[0].forward_pts(), dec!(0.0025));
    }

    #[test]
    fn test_semicolon_delimiter() {
        let options = CsvOptions {
            delimiter: b';',
            ..Default::default()
        };
        let data = "Expiry;Notional;ForwardPts;ClientDirection\n2024-01-31;100;0.001;Sell EUR\n";
        let set = load_exposures_from_reader(data.as_bytes(), &options).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let err = load_exposures_from_path("/nonexistent/exposures.csv", &CsvOptions::default())
            .unwrap_err();
        assert!(matches!(err, IngestionError::Io(_)));
    }
}
