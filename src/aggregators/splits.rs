//! Pie-chart splits: gender and user type.
//!
//! Rows whose grouped column carries no value land in a "No Value"
//! bucket. A slice with no groupable value at all (empty region, or a
//! region whose source never had the column) resolves to a fixed
//! zero-count split over the conventional labels; this is a defined
//! degenerate-input policy, not an error.

use std::collections::BTreeMap;

use crate::aggregators::types::{Bucket, NO_VALUE};
use crate::aggregators::util::flag_max;
use crate::normalize::Trip;
use crate::table::TripTable;

const GENDER_LABELS: [&str; 2] = ["Female", "Male"];
const USER_TYPE_LABELS: [&str; 2] = ["Customer", "Subscriber"];

fn fallback_split(labels: &[&str], total: u64) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = labels.iter().map(|l| Bucket::new(*l, 0)).collect();
    buckets.push(Bucket::new(NO_VALUE, total));
    flag_max(&mut buckets);
    buckets
}

fn grouped_values<'a>(
    table: &'a TripTable,
    region: &'a str,
    field: impl Fn(&'a Trip) -> Option<&'a str>,
) -> (u64, BTreeMap<&'a str, u64>) {
    let mut total = 0u64;
    let mut groups: BTreeMap<&str, u64> = BTreeMap::new();

    for trip in table.region_rows(region) {
        total += 1;
        if let Some(value) = field(trip) {
            *groups.entry(value).or_default() += 1;
        }
    }

    (total, groups)
}

/// Trip counts per gender value, plus a "No Value" bucket for rows with
/// the unknown sentinel. The "No Value" bucket is always present, even
/// at count 0.
pub fn gender_split(table: &TripTable, region: &str) -> Vec<Bucket> {
    let (total, groups) = grouped_values(table, region, |t| t.gender.as_deref());
    if groups.is_empty() {
        return fallback_split(&GENDER_LABELS, total);
    }

    let grouped: u64 = groups.values().sum();
    let mut buckets: Vec<Bucket> = groups
        .into_iter()
        .map(|(label, count)| Bucket::new(label, count))
        .collect();
    buckets.push(Bucket::new(NO_VALUE, total - grouped));
    flag_max(&mut buckets);
    buckets
}

/// Trip counts per user-type value. Unlike the gender split, the
/// "No Value" bucket only appears when the shortfall is positive.
pub fn user_type_split(table: &TripTable, region: &str) -> Vec<Bucket> {
    let (total, groups) = grouped_values(table, region, |t| t.user_type.as_deref());
    if groups.is_empty() {
        return fallback_split(&USER_TYPE_LABELS, total);
    }

    let grouped: u64 = groups.values().sum();
    let mut buckets: Vec<Bucket> = groups
        .into_iter()
        .map(|(label, count)| Bucket::new(label, count))
        .collect();
    if total > grouped {
        buckets.push(Bucket::new(NO_VALUE, total - grouped));
    }
    flag_max(&mut buckets);
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::Trip;
    use chrono::Weekday;

    fn trip(gender: Option<&str>, user_type: Option<&str>) -> Trip {
        Trip {
            region: "testcity".to_string(),
            duration_secs: 300.0,
            start_station: "A".to_string(),
            end_station: "B".to_string(),
            user_type: user_type.map(str::to_string),
            gender: gender.map(str::to_string),
            birth_year: None,
            hour: 1,
            weekday: Weekday::Mon,
            month: 1,
        }
    }

    #[test]
    fn test_gender_split_counts_and_no_value_bucket() {
        let table = TripTable::from_trips(vec![
            trip(Some("Male"), None),
            trip(Some("Female"), None),
            trip(Some("Male"), None),
            trip(None, None),
        ]);
        let buckets = gender_split(&table, "testcity");

        assert_eq!(
            buckets,
            vec![
                Bucket { label: "Female".to_string(), count: 1, is_max: false },
                Bucket { label: "Male".to_string(), count: 2, is_max: true },
                Bucket { label: "No Value".to_string(), count: 1, is_max: false },
            ]
        );
    }

    #[test]
    fn test_gender_split_no_value_bucket_present_at_zero() {
        let table = TripTable::from_trips(vec![trip(Some("Female"), None)]);
        let buckets = gender_split(&table, "testcity");
        assert_eq!(buckets.last().unwrap().label, "No Value");
        assert_eq!(buckets.last().unwrap().count, 0);
    }

    #[test]
    fn test_gender_split_fallback_when_entirely_sentinel() {
        let table = TripTable::from_trips(vec![trip(None, None), trip(None, None)]);
        let buckets = gender_split(&table, "testcity");

        assert_eq!(
            buckets,
            vec![
                Bucket { label: "Female".to_string(), count: 0, is_max: false },
                Bucket { label: "Male".to_string(), count: 0, is_max: false },
                Bucket { label: "No Value".to_string(), count: 2, is_max: true },
            ]
        );
    }

    #[test]
    fn test_gender_split_empty_region_all_zero() {
        let table = TripTable::from_trips(vec![]);
        let buckets = gender_split(&table, "testcity");

        let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Female", "Male", "No Value"]);
        assert!(buckets.iter().all(|b| b.count == 0 && !b.is_max));
    }

    #[test]
    fn test_user_type_split_without_shortfall() {
        let table = TripTable::from_trips(vec![
            trip(None, Some("Subscriber")),
            trip(None, Some("Customer")),
            trip(None, Some("Subscriber")),
        ]);
        let buckets = user_type_split(&table, "testcity");

        let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Customer", "Subscriber"]);
        assert_eq!(buckets[1].count, 2);
        assert!(buckets[1].is_max);
    }

    #[test]
    fn test_user_type_split_with_shortfall() {
        let table = TripTable::from_trips(vec![
            trip(None, Some("Subscriber")),
            trip(None, None),
        ]);
        let buckets = user_type_split(&table, "testcity");

        assert_eq!(buckets.last().unwrap().label, "No Value");
        assert_eq!(buckets.last().unwrap().count, 1);
    }

    #[test]
    fn test_user_type_split_fallback() {
        let table = TripTable::from_trips(vec![trip(None, None)]);
        let buckets = user_type_split(&table, "testcity");

        assert_eq!(
            buckets,
            vec![
                Bucket { label: "Customer".to_string(), count: 0, is_max: false },
                Bucket { label: "Subscriber".to_string(), count: 0, is_max: false },
                Bucket { label: "No Value".to_string(), count: 1, is_max: true },
            ]
        );
    }
}
