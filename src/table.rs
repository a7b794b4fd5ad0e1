//! The immutable normalized trip table.
//!
//! Built once at startup from the configured sources and read-only for
//! the process lifetime. Aggregators see region-filtered borrowed views,
//! never copies, and never mutate.

use anyhow::Result;
use tracing::info;

use crate::loader::{self, RegionSources};
use crate::normalize::{self, Trip};

#[derive(Debug)]
pub struct TripTable {
    trips: Vec<Trip>,
}

impl TripTable {
    /// Runs the full load → normalize pipeline over the configured
    /// sources. Fatal on any source or schema failure.
    #[tracing::instrument(skip(sources))]
    pub fn build(sources: &RegionSources) -> Result<Self> {
        let raw = loader::load(sources)?;
        let trips = normalize::normalize(raw)?;

        info!(
            trips = trips.len(),
            regions = sources.len(),
            "Trip table ready"
        );
        Ok(Self { trips })
    }

    /// Wraps already-normalized trips. Used by tests and by callers that
    /// do their own ingestion.
    pub fn from_trips(trips: Vec<Trip>) -> Self {
        Self { trips }
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Borrowing view over one region's rows, in table order.
    pub fn region_rows<'a>(&'a self, region: &'a str) -> impl Iterator<Item = &'a Trip> {
        self.trips.iter().filter(move |t| t.region == region)
    }

    pub fn region_len(&self, region: &str) -> usize {
        self.region_rows(region).count()
    }

    /// Distinct region ids in first-appearance order.
    pub fn regions(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for trip in &self.trips {
            if !seen.contains(&trip.region.as_str()) {
                seen.push(trip.region.as_str());
            }
        }
        seen
    }
}
