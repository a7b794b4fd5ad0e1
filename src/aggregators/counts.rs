//! Bar-chart bucket counts: hourly, daily, monthly, and customer age.

use std::collections::BTreeMap;

use chrono::Weekday;

use crate::aggregators::types::Bucket;
use crate::aggregators::util::flag_max;
use crate::table::TripTable;

/// Fixed weekday presentation order for the daily chart.
const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn into_buckets<K: ToString>(groups: BTreeMap<K, u64>) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = groups
        .into_iter()
        .map(|(key, count)| Bucket::new(key.to_string(), count))
        .collect();
    flag_max(&mut buckets);
    buckets
}

/// Trip counts per hour of day (0-23). Only hours present in the data
/// appear; no zero-fill.
pub fn hourly_counts(table: &TripTable, region: &str) -> Vec<Bucket> {
    let mut groups: BTreeMap<u32, u64> = BTreeMap::new();
    for trip in table.region_rows(region) {
        *groups.entry(trip.hour).or_default() += 1;
    }
    into_buckets(groups)
}

/// Trip counts per weekday, always exactly 7 buckets Monday through
/// Sunday. Weekdays absent from the data appear with count 0.
pub fn daily_counts(table: &TripTable, region: &str) -> Vec<Bucket> {
    let mut counts = [0u64; 7];
    for trip in table.region_rows(region) {
        counts[trip.weekday.num_days_from_monday() as usize] += 1;
    }

    let mut buckets: Vec<Bucket> = WEEKDAYS
        .iter()
        .zip(counts)
        .map(|(day, count)| Bucket::new(weekday_label(*day), count))
        .collect();
    flag_max(&mut buckets);
    buckets
}

/// Trip counts per month (1-12), natural numeric order, months present
/// only.
pub fn monthly_counts(table: &TripTable, region: &str) -> Vec<Bucket> {
    let mut groups: BTreeMap<u32, u64> = BTreeMap::new();
    for trip in table.region_rows(region) {
        *groups.entry(trip.month).or_default() += 1;
    }
    into_buckets(groups)
}

/// Customer counts per birth year, ascending. Rows without a usable
/// birth year never contribute a bucket.
pub fn age_distribution(table: &TripTable, region: &str) -> Vec<Bucket> {
    let mut groups: BTreeMap<i32, u64> = BTreeMap::new();
    for trip in table.region_rows(region) {
        if let Some(year) = trip.birth_year {
            *groups.entry(year).or_default() += 1;
        }
    }
    into_buckets(groups)
}
