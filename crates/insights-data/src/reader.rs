//! CSV loading for Content Insights.
//!
//! Reads the content-release file into a [`ContentTable`], normalizing the
//! hours column and parsing the release date. Any bad value fails the whole
//! load; there is no best-effort mode.

use std::borrow::Cow;
use std::fs::File;
use std::path::Path;
use std::sync::OnceLock;

use chrono::NaiveDate;
use insights_core::calendar;
use insights_core::models::{Column, ContentTable, Record};
use insights_core::{InsightsError, Result};
use regex::Regex;
use serde::Deserialize;
use tracing::debug;

// ── Raw row ───────────────────────────────────────────────────────────────────

/// The required columns exactly as they appear in the file.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Content Type")]
    content_type: String,
    #[serde(rename = "Language Indicator")]
    language_indicator: String,
    #[serde(rename = "Release Date")]
    release_date: String,
    #[serde(rename = "Hours Viewed")]
    hours_viewed: String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the content-release table at `path`.
///
/// Returns un-derived records, one per data row, in file order.
pub fn load_table(path: &Path) -> Result<ContentTable> {
    let file = File::open(path).map_err(|source| InsightsError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader.headers()?.clone();
    if let Some(column) = first_missing_column(&headers) {
        return Err(InsightsError::MissingColumn {
            column: column.header().to_string(),
            path: path.to_path_buf(),
        });
    }

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        // Physical line of the row start; the header is line 1.
        let line = row
            .position()
            .map(|p| p.line())
            .unwrap_or(records.len() as u64 + 2);
        let raw: RawRow = row.deserialize(Some(&headers))?;
        records.push(convert_row(raw, line)?);
    }

    debug!("Loaded {} records from {}", records.len(), path.display());

    Ok(ContentTable::new(records))
}

/// Remove thousands-grouping punctuation (`,` `_` `'` and whitespace).
///
/// Already clean input comes back unchanged, so applying it twice is the
/// same as applying it once.
pub fn strip_grouping(raw: &str) -> Cow<'_, str> {
    grouping_pattern().replace_all(raw, "")
}

/// Parse an hours-viewed cell: strip grouping, then require a finite,
/// non-negative float.
pub fn parse_hours(raw: &str) -> Option<f64> {
    let cleaned = strip_grouping(raw);
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn grouping_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[,_'\s]").expect("grouping pattern is valid"))
}

/// First required column not present in `headers`, in [`Column::REQUIRED`]
/// order.
fn first_missing_column(headers: &csv::StringRecord) -> Option<Column> {
    Column::REQUIRED
        .into_iter()
        .find(|column| !headers.iter().any(|h| h == column.header()))
}

fn convert_row(raw: RawRow, line: u64) -> Result<Record> {
    let hours_viewed =
        parse_hours(&raw.hours_viewed).ok_or_else(|| InsightsError::MalformedNumericField {
            line,
            column: Column::HoursViewed.header().to_string(),
            value: raw.hours_viewed.clone(),
        })?;

    let release_date: NaiveDate = calendar::parse_release_date(&raw.release_date)
        .ok_or_else(|| InsightsError::MalformedDateField {
            line,
            column: Column::ReleaseDate.header().to_string(),
            value: raw.release_date.clone(),
        })?;

    Ok(Record::new(
        raw.title,
        raw.content_type,
        raw.language_indicator,
        release_date,
        hours_viewed,
    ))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
