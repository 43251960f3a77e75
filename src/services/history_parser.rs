use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use chrono::NaiveDateTime;
use csv::ReaderBuilder;
use regex::Regex;
use tracing::{debug, warn};

use crate::errors::AppError;

pub const HISTORY_FILE_SUFFIX: &str = "_D1.csv";

const TIMESTAMP_FORMAT: &str = "%Y.%m.%d %H:%M:%S";
// chrono accepts unpadded fields and a leading sign, so the shape is checked first.
const TIMESTAMP_SHAPE: &str = r"^[0-9]{4}\.[0-9]{2}\.[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}$";
const HEADER_MARKER: &str = "Time";
const MIN_FIELDS: usize = 8;
const TIMESTAMP_FIELD: usize = 0;
const CLOSE_FIELD: usize = 4;
const REAL_VOLUME_FIELD: usize = 7;

/// A validated row from a history file, before timezone normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawBar {
    pub timestamp: NaiveDateTime,
    pub close: f64,
    pub volume: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    TooFewFields(usize),
    InvalidTimestamp,
    /// Unparsable, non-finite or negative close price.
    InvalidPrice,
    /// The CSV reader could not decode the row (e.g. invalid UTF-8).
    Unreadable,
}

/// What happened to a single row.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    Header,
    Parsed { bar: RawBar, volume_defaulted: bool },
    Dropped(DropReason),
}

/// Per-file counters for rows that were skipped or patched.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DropStats {
    pub too_few_fields: usize,
    pub invalid_timestamp: usize,
    pub invalid_price: usize,
    pub unreadable: usize,
    pub defaulted_volume: usize,
}

impl DropStats {
    fn record(&mut self, reason: DropReason) {
        match reason {
            DropReason::TooFewFields(_) => self.too_few_fields += 1,
            DropReason::InvalidTimestamp => self.invalid_timestamp += 1,
            DropReason::InvalidPrice => self.invalid_price += 1,
            DropReason::Unreadable => self.unreadable += 1,
        }
    }

    pub fn dropped(&self) -> usize {
        self.too_few_fields + self.invalid_timestamp + self.invalid_price + self.unreadable
    }
}

/// A dropped row and the 1-based file line it started on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DroppedLine {
    pub line: Option<u64>,
    pub reason: DropReason,
}

#[derive(Debug, Default)]
pub struct ParsedHistory {
    pub bars: Vec<RawBar>,
    pub stats: DropStats,
    pub dropped: Vec<DroppedLine>,
}

/// `<data_dir>/<ticker>_D1.csv`, or `None` if the ticker could escape `data_dir`.
pub fn history_path(data_dir: &Path, ticker: &str) -> Option<PathBuf> {
    if ticker.is_empty() || ticker.contains(|c: char| c == '/' || c == '\\') || ticker.contains("..") {
        return None;
    }
    Some(data_dir.join(format!("{}{}", ticker, HISTORY_FILE_SUFFIX)))
}

/// Reads and validates a ticker's daily bar file.
///
/// Bad rows are dropped (or, for volume, patched to 0) and counted; only a
/// missing file or an I/O failure is an error.
pub async fn parse(data_dir: &Path, ticker: &str) -> Result<ParsedHistory, AppError> {
    let not_found = || AppError::NotFound(format!("price history file not found for ticker {}", ticker));

    let path = history_path(data_dir, ticker).ok_or_else(not_found)?;

    // Read whole file; the handle is closed before parsing starts.
    let contents = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(not_found()),
        Err(e) => {
            return Err(AppError::source_unavailable(
                format!("error opening price history file for ticker {}", ticker),
                e,
            ))
        }
    };

    let parsed = parse_records(contents.as_slice()).map_err(|e| {
        AppError::source_unavailable(format!("error reading CSV file for ticker {}", ticker), e)
    })?;

    let stats = &parsed.stats;
    if stats.dropped() > 0 || stats.defaulted_volume > 0 {
        warn!(
            ticker,
            kept = parsed.bars.len(),
            too_few_fields = stats.too_few_fields,
            invalid_timestamp = stats.invalid_timestamp,
            invalid_price = stats.invalid_price,
            unreadable = stats.unreadable,
            defaulted_volume = stats.defaulted_volume,
            "Skipped malformed rows in {}",
            path.display()
        );
    }

    Ok(parsed)
}

/// Parses history rows from any reader. Fails only on reader I/O errors.
pub fn parse_records<R: Read>(reader: R) -> Result<ParsedHistory, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut parsed = ParsedHistory::default();

    for (index, result) in reader.records().enumerate() {
        let (line, outcome) = match result {
            Ok(record) => (
                record.position().map(|p| p.line()),
                classify_record(index == 0, &record),
            ),
            Err(e) if e.is_io_error() => return Err(e),
            Err(e) => {
                let line = e.position().map(|p| p.line());
                debug!("Line {:?} unreadable: {}", line, e);
                (line, RecordOutcome::Dropped(DropReason::Unreadable))
            }
        };

        match outcome {
            RecordOutcome::Header => {}
            RecordOutcome::Parsed { bar, volume_defaulted } => {
                if volume_defaulted {
                    parsed.stats.defaulted_volume += 1;
                }
                parsed.bars.push(bar);
            }
            RecordOutcome::Dropped(reason) => {
                debug!("Dropping line {:?}: {:?}", line, reason);
                parsed.stats.record(reason);
                parsed.dropped.push(DroppedLine { line, reason });
            }
        }
    }

    Ok(parsed)
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    let shape = SHAPE.get_or_init(|| Regex::new(TIMESTAMP_SHAPE).expect("timestamp pattern is valid"));
    if !shape.is_match(raw) {
        return None;
    }
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).ok()
}

/// Validates one row. Price is required; volume falls back to 0.
pub fn classify_record(is_first: bool, record: &csv::StringRecord) -> RecordOutcome {
    let first_field = record.get(TIMESTAMP_FIELD).unwrap_or_default();
    if is_first && first_field.contains(HEADER_MARKER) {
        return RecordOutcome::Header;
    }

    if record.len() < MIN_FIELDS {
        return RecordOutcome::Dropped(DropReason::TooFewFields(record.len()));
    }

    let Some(timestamp) = parse_timestamp(first_field) else {
        return RecordOutcome::Dropped(DropReason::InvalidTimestamp);
    };

    let close = match record[CLOSE_FIELD].parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v,
        _ => return RecordOutcome::Dropped(DropReason::InvalidPrice),
    };

    let (volume, volume_defaulted) = match record[REAL_VOLUME_FIELD].parse::<u64>() {
        Ok(v) => (v, false),
        Err(_) => (0, true),
    };

    RecordOutcome::Parsed {
        bar: RawBar {
            timestamp,
            close,
            volume,
        },
        volume_defaulted,
    }
}
