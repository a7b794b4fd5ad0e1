//! Normalization of raw trip rows into the typed, derived schema.
//!
//! Temporal features (hour, weekday, month) come from the mid-trip
//! instant, start + duration/2, not from the start or end timestamp.
//! Optional demographic fields collapse to explicit `Option` values:
//! `None` stands in for the source's "unknown" gender and birth-year-0
//! sentinels.

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDateTime, Timelike, Weekday};

use crate::loader::RawTrip;

/// Timestamp layout used by all regional trip logs.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One normalized trip. Raw timestamps are dropped after derivation;
/// nothing downstream needs them.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub region: String,
    pub duration_secs: f64,
    pub start_station: String,
    pub end_station: String,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
    pub hour: u32,
    pub weekday: Weekday,
    pub month: u32,
}

/// Normalizes the whole raw dataset. Fatal on the first unparsable
/// timestamp; the pipeline never operates on a partially normalized table.
#[tracing::instrument(skip(raw), fields(rows = raw.len()))]
pub fn normalize(raw: Vec<RawTrip>) -> Result<Vec<Trip>> {
    raw.into_iter().map(normalize_row).collect()
}

fn normalize_row(row: RawTrip) -> Result<Trip> {
    let start = parse_time(&row.start_time)
        .with_context(|| format!("unparsable start time for region {}", row.region))?;
    // Parsed only to reject structurally broken rows up front.
    parse_time(&row.end_time)
        .with_context(|| format!("unparsable end time for region {}", row.region))?;

    let mid = start + Duration::milliseconds((row.trip_duration * 500.0) as i64);

    Ok(Trip {
        region: row.region,
        duration_secs: row.trip_duration,
        start_station: row.start_station,
        end_station: row.end_station,
        user_type: clean_text(row.user_type),
        gender: clean_text(row.gender),
        birth_year: coerce_birth_year(row.birth_year.as_deref()),
        hour: mid.hour(),
        weekday: mid.weekday(),
        month: mid.month(),
    })
}

fn parse_time(text: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text.trim(), TIME_FORMAT)
        .with_context(|| format!("timestamp {text:?} does not match {TIME_FORMAT}"))
}

fn clean_text(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Coerces the source's mixed birth-year notation ("1992.0", blanks,
/// stray text) to a year. Anything non-numeric, and the literal 0
/// sentinel, becomes `None`.
fn coerce_birth_year(value: Option<&str>) -> Option<i32> {
    let text = value?.trim();
    let year = text.parse::<f64>().ok()? as i32;
    (year != 0).then_some(year)
}
