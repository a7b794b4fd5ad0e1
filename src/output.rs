//! Rendering and persistence for region reports.
//!
//! This is the presentation-adapter surface: JSON for machine
//! consumers, plain text mirroring the original dashboard's panels for
//! the terminal. No logic beyond formatting lives here.

use anyhow::Result;
use std::fmt::Write as _;
use tracing::{debug, info};

use crate::aggregators::types::{Bucket, RegionReport};

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &RegionReport) {
    debug!("{:#?}", report);
}

/// Writes a report as pretty-printed JSON to `path`.
pub fn write_json(path: &str, report: &RegionReport) -> Result<()> {
    std::fs::write(path, serde_json::to_string_pretty(report)?)?;
    info!(path, region = %report.region, "Report written");
    Ok(())
}

fn render_buckets(out: &mut String, title: &str, buckets: &[Bucket]) {
    writeln!(out, "== {title} ==").unwrap();
    if buckets.is_empty() {
        writeln!(out, "(no trips)").unwrap();
    }
    for bucket in buckets {
        let mark = if bucket.is_max { " *" } else { "" };
        writeln!(out, "{:>12}: {}{}", bucket.label, bucket.count, mark).unwrap();
    }
    out.push('\n');
}

/// Renders a full region report as plain text. Maximum buckets carry a
/// `*` marker, standing in for the dashboard's highlight color.
pub fn render_text(report: &RegionReport) -> String {
    let mut out = String::new();
    writeln!(out, "Region: {} ({} trips)\n", report.region, report.total_trips).unwrap();

    render_buckets(&mut out, "Hourly Trips", &report.hourly);
    render_buckets(&mut out, "Daily Trips", &report.daily);
    render_buckets(&mut out, "Monthly Trips", &report.monthly);
    render_buckets(&mut out, "Gender", &report.gender);
    render_buckets(&mut out, "User Type", &report.user_type);
    render_buckets(&mut out, "Customer Age", &report.age);

    let s = &report.summary;
    writeln!(out, "== Summary ==").unwrap();
    writeln!(out, "Total Travel Time: {} hours", s.total_travel_hours).unwrap();
    writeln!(out, "Average Travel Time: {} minutes", s.avg_travel_minutes).unwrap();
    if let Some(station) = &s.top_start_station {
        writeln!(out, "Most popular start station: {station}").unwrap();
    }
    if let Some(station) = &s.top_end_station {
        writeln!(out, "Most popular end station: {station}").unwrap();
    }
    if let Some(route) = &s.top_route {
        writeln!(out, "Most common trip from: {}", route.start_station).unwrap();
        writeln!(out, "To: {}", route.end_station).unwrap();
    }
    match &s.age_range {
        Some(range) => {
            writeln!(out, "Oldest Customer is born in: {}", range.oldest_birth_year).unwrap();
            writeln!(out, "Youngest Customer is born in: {}", range.youngest_birth_year).unwrap();
        }
        None => writeln!(out, "No Data Available").unwrap(),
    }

    out
}
