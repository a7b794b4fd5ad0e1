//! Region-filtered aggregation views over the trip table.
//!
//! Seven independent reducers turn a region's rows into chart-ready
//! buckets and a text summary. Every reducer filters first, evaluates
//! fresh on each call, and never fails: an empty or degenerate region
//! slice resolves to a defined zero/empty/"no data" output.

pub mod counts;
pub mod splits;
pub mod summary;
pub mod types;
pub mod util;

use chrono::Utc;

use crate::table::TripTable;
use types::RegionReport;

/// Runs all seven aggregations for one region and bundles the results.
pub fn region_report(table: &TripTable, region: &str) -> RegionReport {
    RegionReport {
        schema_version: 1,
        region: region.to_string(),
        generated_at: Utc::now(),
        total_trips: table.region_len(region) as u64,
        hourly: counts::hourly_counts(table, region),
        daily: counts::daily_counts(table, region),
        monthly: counts::monthly_counts(table, region),
        gender: splits::gender_split(table, region),
        user_type: splits::user_type_split(table, region),
        age: counts::age_distribution(table, region),
        summary: summary::summary_stats(table, region),
    }
}
