//! Output types produced by the aggregation views.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Label used for rows whose grouped column carries no value.
pub const NO_VALUE: &str = "No Value";

/// One chart bucket. `is_max` marks buckets carrying the group maximum,
/// used by the adapter for highlight coloring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub label: String,
    pub count: u64,
    pub is_max: bool,
}

impl Bucket {
    pub fn new(label: impl Into<String>, count: u64) -> Self {
        Self {
            label: label.into(),
            count,
            is_max: false,
        }
    }
}

/// A (start, end) station pair with its trip count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub start_station: String,
    pub end_station: String,
    pub count: u64,
}

/// Oldest and youngest birth years over the non-sentinel age
/// distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeRange {
    pub oldest_birth_year: i32,
    pub youngest_birth_year: i32,
}

/// Fixed-shape text-panel summary for one region. `None` fields mean the
/// region slice had no rows (stations/route) or no usable birth years
/// (age range), rendered as "No Data Available".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub total_travel_hours: i64,
    pub avg_travel_minutes: i64,
    pub top_start_station: Option<String>,
    pub top_end_station: Option<String>,
    pub top_route: Option<Route>,
    pub age_range: Option<AgeRange>,
}

/// Complete set of aggregation outputs for one region selection.
#[derive(Debug, Clone, Serialize)]
pub struct RegionReport {
    pub schema_version: u8,
    pub region: String,
    pub generated_at: DateTime<Utc>,
    pub total_trips: u64,
    pub hourly: Vec<Bucket>,
    pub daily: Vec<Bucket>,
    pub monthly: Vec<Bucket>,
    pub gender: Vec<Bucket>,
    pub user_type: Vec<Bucket>,
    pub age: Vec<Bucket>,
    pub summary: SummaryStats,
}
