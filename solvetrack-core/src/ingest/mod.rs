//! Ingestion layer: raw store records to canonical [`TaskRecord`]s
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐     ┌─────────────────┐
//! │  Record store   │ ──► │    normalize()   │ ──► │  TaskRecord[]   │
//! │ (JSON / JSONL)  │     │  alias resolution│     │ + skip report   │
//! └─────────────────┘     └──────────────────┘     └─────────────────┘
//! ```
//!
//! Malformed records never abort a batch. Each one is dropped, logged at
//! `warn`, and listed in [`NormalizeResult::skipped`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use solvetrack_core::ingest;
//! use std::path::Path;
//!
//! let result = ingest::load_and_normalize(Path::new("tasks.json"))?;
//! println!("{} records, {} skipped", result.records.len(), result.skipped_count());
//! # Ok::<(), solvetrack_core::Error>(())
//! ```

mod raw;

pub use raw::{RawId, RawTaskRecord};

use crate::error::Result;
use crate::types::{Difficulty, TaskRecord};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use std::path::Path;

/// Why a record was dropped during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    MissingDate,
    InvalidDate,
    MissingDifficulty,
    InvalidDifficulty,
    NegativeXp,
    /// Not a record object, or a field had the wrong JSON type
    Malformed,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            SkipReason::MissingDate => "missing date",
            SkipReason::InvalidDate => "invalid date",
            SkipReason::MissingDifficulty => "missing difficulty",
            SkipReason::InvalidDifficulty => "invalid difficulty",
            SkipReason::NegativeXp => "negative xp",
            SkipReason::Malformed => "malformed record",
        };
        f.write_str(text)
    }
}

/// A record that did not survive normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    /// Position in the input batch
    pub index: usize,
    /// Store id, when one could be read
    pub id: Option<String>,
    pub reason: SkipReason,
}

/// Output of a normalization pass.
#[derive(Debug, Default)]
pub struct NormalizeResult {
    /// Canonical records, in input order
    pub records: Vec<TaskRecord>,
    /// Dropped records, in input order
    pub skipped: Vec<SkippedRecord>,
}

impl NormalizeResult {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    fn push(&mut self, index: usize, id: Option<String>, outcome: std::result::Result<TaskRecord, SkipReason>) {
        match outcome {
            Ok(record) => self.records.push(record),
            Err(reason) => {
                tracing::warn!(index, id = ?id, %reason, "Skipping task record");
                self.skipped.push(SkippedRecord { index, id, reason });
            }
        }
    }
}

/// Normalize a batch of typed raw records.
pub fn normalize<I>(raws: I) -> NormalizeResult
where
    I: IntoIterator<Item = RawTaskRecord>,
{
    let mut result = NormalizeResult::default();
    for (index, raw) in raws.into_iter().enumerate() {
        let id = raw.id.as_ref().map(|id| id.to_string());
        result.push(index, id, normalize_record(index, raw));
    }
    tracing::debug!(
        records = result.records.len(),
        skipped = result.skipped.len(),
        "Normalized task records"
    );
    result
}

/// Normalize a batch of untyped JSON values.
///
/// Values that cannot be read as a record at all count as
/// [`SkipReason::Malformed`].
pub fn normalize_values<I>(values: I) -> NormalizeResult
where
    I: IntoIterator<Item = serde_json::Value>,
{
    let mut result = NormalizeResult::default();
    for (index, value) in values.into_iter().enumerate() {
        let id = value.get("id").and_then(|v| match v {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        });
        let outcome = serde_json::from_value::<RawTaskRecord>(value)
            .map_err(|_| SkipReason::Malformed)
            .and_then(|raw| normalize_record(index, raw));
        result.push(index, id, outcome);
    }
    tracing::debug!(
        records = result.records.len(),
        skipped = result.skipped.len(),
        "Normalized task records"
    );
    result
}

/// Resolve one raw record into its canonical form.
///
/// `index` is only used to synthesize an id when the store had none.
pub fn normalize_record(
    index: usize,
    raw: RawTaskRecord,
) -> std::result::Result<TaskRecord, SkipReason> {
    let date = match raw.date.as_deref() {
        None => return Err(SkipReason::MissingDate),
        Some(s) => parse_date(s).ok_or(SkipReason::InvalidDate)?,
    };

    let difficulty: Difficulty = match raw.difficulty.as_deref() {
        None => return Err(SkipReason::MissingDifficulty),
        Some(s) => s.parse().map_err(|_| SkipReason::InvalidDifficulty)?,
    };

    let xp = match raw.reward() {
        None => difficulty.default_xp(),
        Some(v) if v < 0 => return Err(SkipReason::NegativeXp),
        Some(v) => u32::try_from(v).map_err(|_| SkipReason::Malformed)?,
    };

    let time_spent_minutes = raw
        .elapsed_minutes()
        .and_then(|minutes| u32::try_from(minutes).ok());

    let solved_at = raw
        .solved_timestamp()
        .and_then(parse_timestamp)
        .unwrap_or_else(|| date.and_time(chrono::NaiveTime::MIN));

    let id = raw
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| format!("record-{}", index));

    Ok(TaskRecord {
        id,
        date,
        difficulty,
        xp,
        time_spent_minutes,
        solved_at,
        title: raw.title,
    })
}

/// Parse a calendar date from `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc).date_naive())
    })
}

/// Parse a solve timestamp. Offsets are converted to UTC.
fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(chrono::NaiveTime::MIN))
}

/// Read raw record values from a JSON or JSONL file.
///
/// Accepted layouts:
/// - a JSON array of records
/// - a JSON object with a `tasks` array
/// - JSONL, one record per line (blank lines ignored)
///
/// A JSONL line that is not valid JSON becomes `null`, which normalizes to a
/// [`SkipReason::Malformed`] entry so record indices stay aligned with lines.
/// A file whose first line is not a complete JSON value is parsed as one
/// document, and a syntax error there is returned as [`Error::Json`].
///
/// [`Error::Json`]: crate::error::Error::Json
pub fn load_records(path: &Path) -> Result<Vec<serde_json::Value>> {
    let content = std::fs::read_to_string(path)?;
    let trimmed = content.trim_start();

    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }

    if trimmed.starts_with('{') {
        // Either a wrapper object or the first line of a JSONL file
        match serde_json::from_str::<serde_json::Value>(trimmed) {
            Ok(serde_json::Value::Object(mut map)) => {
                if let Some(serde_json::Value::Array(tasks)) = map.remove("tasks") {
                    return Ok(tasks);
                }
                return Ok(vec![serde_json::Value::Object(map)]);
            }
            Ok(other) => return Ok(vec![other]),
            Err(e) => {
                // JSONL only if the first line is a complete value by itself
                let first_line = trimmed.lines().next().unwrap_or_default();
                if serde_json::from_str::<serde_json::Value>(first_line).is_err() {
                    return Err(e.into());
                }
            }
        }
    }

    let values = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(line_no, line)| {
            serde_json::from_str(line).unwrap_or_else(|e| {
                tracing::warn!(line = line_no + 1, error = %e, "Unparseable JSONL line");
                serde_json::Value::Null
            })
        })
        .collect();

    Ok(values)
}

/// Load a record file and normalize it in one step.
pub fn load_and_normalize(path: &Path) -> Result<NormalizeResult> {
    let values = load_records(path)?;
    tracing::info!(path = %path.display(), values = values.len(), "Loaded task records");
    Ok(normalize_values(values))
}
