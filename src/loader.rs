//! CSV ingestion for regional trip logs.
//!
//! Each configured region maps to one delimited trip table. The loader
//! reads every source, tags rows with their region id, and concatenates
//! them into a single raw dataset. Any missing or structurally broken
//! source aborts the load; there is no partial-dataset mode.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A single row read from a regional trip CSV, before normalization.
///
/// Gender and birth year are only present in some source files; a missing
/// column or an empty cell deserializes to `None`. Birth year stays text
/// here because the sources mix float notation ("1992.0") with blanks;
/// the normalizer coerces it. The leading unnamed index column in the
/// source files is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTrip {
    #[serde(skip)]
    pub region: String,
    #[serde(rename = "Start Time")]
    pub start_time: String,
    #[serde(rename = "End Time")]
    pub end_time: String,
    #[serde(rename = "Trip Duration")]
    pub trip_duration: f64,
    #[serde(rename = "Start Station")]
    pub start_station: String,
    #[serde(rename = "End Station")]
    pub end_station: String,
    #[serde(rename = "User Type", default)]
    pub user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    pub gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    pub birth_year: Option<String>,
}

/// Maps region ids to their trip CSV files.
///
/// Built either from a JSON object on disk:
///
/// ```json
/// {
///   "chicago": "Data/chicago.csv",
///   "ny": "Data/new_york_city.csv"
/// }
/// ```
///
/// or by scanning a data directory, where each `*.csv` file stem becomes
/// a region id.
#[derive(Debug, Clone)]
pub struct RegionSources {
    entries: BTreeMap<String, PathBuf>,
}

impl RegionSources {
    /// Loads the region map from a JSON file at `path`.
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading region sources file {path}"))?;
        let entries: BTreeMap<String, PathBuf> = serde_json::from_str(&content)
            .with_context(|| format!("parsing region sources file {path}"))?;
        Ok(Self { entries })
    }

    /// Builds the region map by scanning `dir` for `*.csv` files.
    pub fn discover(dir: &str) -> Result<Self> {
        let mut entries = BTreeMap::new();

        for entry in std::fs::read_dir(dir)
            .with_context(|| format!("scanning data directory {dir}"))?
        {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("csv") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                entries.insert(stem.to_string(), path.clone());
            }
        }

        Ok(Self { entries })
    }

    pub fn contains(&self, region: &str) -> bool {
        self.entries.contains_key(region)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all `(region_id, path)` pairs in region-id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_path()))
    }

    /// Region ids in sorted order.
    pub fn region_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Reads every configured source and concatenates the rows, each tagged
/// with its region id. Fatal on the first unreadable or unparsable source.
#[tracing::instrument(skip(sources), fields(source_count = sources.len()))]
pub fn load(sources: &RegionSources) -> Result<Vec<RawTrip>> {
    let mut rows = Vec::new();

    for (region, path) in sources.iter() {
        let before = rows.len();
        let file = File::open(path)
            .with_context(|| format!("opening trip log for region {region} at {}", path.display()))?;

        let mut rdr = csv::Reader::from_reader(file);
        for result in rdr.deserialize() {
            let mut record: RawTrip = result
                .with_context(|| format!("reading trip row for region {region} from {}", path.display()))?;
            record.region = region.to_string();
            rows.push(record);
        }

        debug!(region, rows = rows.len() - before, "Region source loaded");
    }

    info!(total_rows = rows.len(), "All region sources loaded");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_csv(name: &str, content: &str) -> String {
        let path = format!("{}/{}", env::temp_dir().display(), name);
        fs::write(&path, content).unwrap();
        path
    }

    fn single_source(region: &str, path: &str) -> RegionSources {
        let mut entries = BTreeMap::new();
        entries.insert(region.to_string(), PathBuf::from(path));
        RegionSources { entries }
    }

    #[test]
    fn test_load_tags_rows_with_region() {
        let path = temp_csv(
            "bikeshare_loader_tag.csv",
            ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year\n\
             0,2017-01-01 00:00:36,2017-01-01 00:06:36,360,A,B,Subscriber,Male,1989.0\n",
        );

        let rows = load(&single_source("testcity", &path)).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].region, "testcity");
        assert_eq!(rows[0].start_station, "A");
        assert_eq!(rows[0].gender.as_deref(), Some("Male"));
        assert_eq!(rows[0].birth_year.as_deref(), Some("1989.0"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_optional_columns() {
        let path = temp_csv(
            "bikeshare_loader_optional.csv",
            ",Start Time,End Time,Trip Duration,Start Station,End Station\n\
             0,2017-01-01 00:00:36,2017-01-01 00:06:36,360,A,B\n",
        );

        let rows = load(&single_source("testcity", &path)).unwrap();
        assert_eq!(rows[0].user_type, None);
        assert_eq!(rows[0].gender, None);
        assert_eq!(rows[0].birth_year, None);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_empty_cell_is_none() {
        let path = temp_csv(
            "bikeshare_loader_empty_cell.csv",
            ",Start Time,End Time,Trip Duration,Start Station,End Station,Gender,Birth Year\n\
             0,2017-01-01 00:00:36,2017-01-01 00:06:36,360,A,B,,\n",
        );

        let rows = load(&single_source("testcity", &path)).unwrap();
        assert_eq!(rows[0].gender, None);
        assert_eq!(rows[0].birth_year, None);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_file_is_fatal() {
        let sources = single_source("ghost", "/nonexistent/ghost.csv");
        let err = load(&sources).unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn test_load_missing_required_column_is_fatal() {
        let path = temp_csv(
            "bikeshare_loader_broken.csv",
            ",Start Time,End Time,Start Station,End Station\n\
             0,2017-01-01 00:00:36,2017-01-01 00:06:36,A,B\n",
        );

        assert!(load(&single_source("testcity", &path)).is_err());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_discover_uses_file_stems() {
        let dir = format!("{}/bikeshare_loader_discover", env::temp_dir().display());
        fs::create_dir_all(&dir).unwrap();
        fs::write(format!("{dir}/alpha.csv"), "x\n").unwrap();
        fs::write(format!("{dir}/beta.csv"), "x\n").unwrap();
        fs::write(format!("{dir}/notes.txt"), "x\n").unwrap();

        let sources = RegionSources::discover(&dir).unwrap();
        let ids: Vec<&str> = sources.region_ids().collect();
        assert_eq!(ids, vec!["alpha", "beta"]);
        assert!(sources.contains("alpha"));
        assert!(!sources.contains("notes"));

        fs::remove_dir_all(&dir).unwrap();
    }
}
