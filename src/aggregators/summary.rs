//! Text-panel summary: travel-time totals, most frequent stations and
//! route, and the customer birth-year range.

use std::collections::HashMap;
use std::hash::Hash;

use crate::aggregators::types::{AgeRange, Route, SummaryStats};
use crate::aggregators::util::mean;
use crate::table::TripTable;

/// Picks the most frequent key in iteration order. Ties break to the key
/// whose first occurrence comes earliest; which equally-popular station
/// gets reported is a stability contract, not an accident.
fn most_frequent<K: Eq + Hash>(keys: impl IntoIterator<Item = K>) -> Option<(K, u64)> {
    let mut groups: HashMap<K, (u64, usize)> = HashMap::new();
    for (idx, key) in keys.into_iter().enumerate() {
        groups.entry(key).or_insert((0, idx)).0 += 1;
    }

    groups
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(key, (count, _))| (key, count))
}

/// Computes the summary panel over one region slice. Never fails: an
/// empty slice yields zero totals and `None` stations; a slice without
/// usable birth years yields `None` for the age range.
pub fn summary_stats(table: &TripTable, region: &str) -> SummaryStats {
    let durations: Vec<f64> = table.region_rows(region).map(|t| t.duration_secs).collect();

    let total_travel_hours = (durations.iter().sum::<f64>() / 3600.0).round() as i64;
    let avg_travel_minutes = (mean(&durations) / 60.0).round() as i64;

    let top_start_station =
        most_frequent(table.region_rows(region).map(|t| t.start_station.clone())).map(|(s, _)| s);
    let top_end_station =
        most_frequent(table.region_rows(region).map(|t| t.end_station.clone())).map(|(s, _)| s);
    let top_route = most_frequent(
        table
            .region_rows(region)
            .map(|t| (t.start_station.clone(), t.end_station.clone())),
    )
    .map(|((start_station, end_station), count)| Route {
        start_station,
        end_station,
        count,
    });

    let years: Vec<i32> = table.region_rows(region).filter_map(|t| t.birth_year).collect();
    let age_range = years.iter().copied().min().map(|oldest| AgeRange {
        oldest_birth_year: oldest,
        youngest_birth_year: years.iter().copied().max().unwrap_or(oldest),
    });

    SummaryStats {
        total_travel_hours,
        avg_travel_minutes,
        top_start_station,
        top_end_station,
        top_route,
        age_range,
    }
}
