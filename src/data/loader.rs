use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use log::{info, warn};
use thiserror::Error;

use crate::config::{CitySource, SourceConfig};
use crate::data::filter::CityChoice;
use crate::data::model::{Capabilities, TripRecord, TripTable};

// Column names as they appear in the city CSV headers.
const COL_START_TIME: &str = "Start Time";
const COL_START_STATION: &str = "Start Station";
const COL_END_STATION: &str = "End Station";
const COL_TRIP_DURATION: &str = "Trip Duration";
const COL_USER_TYPE: &str = "User Type";
const COL_GENDER: &str = "Gender";

/// Timestamp format shared by all city exports.
const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ---------------------------------------------------------------------------
// LoadError – typed loader failures
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unknown city '{0}'")]
    UnknownCity(String),
    #[error("{file}: missing required column '{column}'")]
    MissingColumn { file: String, column: String },
}

// ---------------------------------------------------------------------------
// DatasetLoader – CSV ingestion and schema reconciliation
// ---------------------------------------------------------------------------

/// Loads trip tables for the cities named in a [`SourceConfig`].
///
/// Load failures (missing file, missing `Start Time` column, unparseable
/// timestamp or duration) propagate to the caller; they are fatal startup
/// errors, not recovered.
pub struct DatasetLoader {
    config: SourceConfig,
}

impl DatasetLoader {
    pub fn new(config: SourceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Produce the table for one city, or the left-anchored union of every
    /// configured city in configuration order.
    pub fn load(&self, choice: &CityChoice) -> Result<TripTable> {
        match choice {
            CityChoice::Named(name) => {
                let source = self
                    .config
                    .find(name)
                    .ok_or_else(|| LoadError::UnknownCity(name.clone()))?;
                load_city(source)
            }
            CityChoice::All => {
                let mut tables = Vec::with_capacity(self.config.cities.len());
                for source in &self.config.cities {
                    tables.push(load_city(source)?);
                }
                let combined = TripTable::union(tables);
                info!("combined {} trips across all cities", combined.len());
                Ok(combined)
            }
        }
    }
}

/// Read one city CSV into a [`TripTable`].
///
/// The header row is probed once for the optional column groups; cells are
/// looked up by header position so column order in the export does not
/// matter.
fn load_city(source: &CitySource) -> Result<TripTable> {
    let mut reader = csv::Reader::from_path(&source.path)
        .with_context(|| format!("opening {}", source.path.display()))?;
    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("reading headers of {}", source.path.display()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let position = |name: &str| headers.iter().position(|h| h == name);

    let start_time_idx = position(COL_START_TIME).ok_or_else(|| LoadError::MissingColumn {
        file: source.path.display().to_string(),
        column: COL_START_TIME.to_string(),
    })?;
    let start_station_idx = position(COL_START_STATION);
    let end_station_idx = position(COL_END_STATION);
    let duration_idx = position(COL_TRIP_DURATION);
    let user_type_idx = position(COL_USER_TYPE);
    let gender_idx = position(COL_GENDER);

    if start_station_idx.is_some() != end_station_idx.is_some() {
        warn!(
            "{}: only one station column present; station stats disabled",
            source.name
        );
    }

    let capabilities = Capabilities {
        stations: start_station_idx.is_some() && end_station_idx.is_some(),
        trip_duration: duration_idx.is_some(),
        user_type: user_type_idx.is_some(),
        gender: gender_idx.is_some(),
    };

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("{}: row {row_no}", source.name))?;

        let raw = record.get(start_time_idx).unwrap_or("").trim();
        let start_time = NaiveDateTime::parse_from_str(raw, START_TIME_FORMAT)
            .with_context(|| format!("{}: row {row_no}: bad start time '{raw}'", source.name))?;

        let mut trip = TripRecord::new(start_time);
        trip.start_station = text_cell(&record, start_station_idx);
        trip.end_station = text_cell(&record, end_station_idx);
        trip.user_type = text_cell(&record, user_type_idx);
        trip.gender = text_cell(&record, gender_idx);
        trip.duration_min = duration_cell(&record, duration_idx)
            .with_context(|| format!("{}: row {row_no}", source.name))?;
        rows.push(trip);
    }

    info!("{}: loaded {} trips", source.name, rows.len());
    Ok(TripTable::new(rows, capabilities))
}

/// Non-empty trimmed text of an optional cell.
fn text_cell(record: &csv::StringRecord, idx: Option<usize>) -> Option<String> {
    let text = record.get(idx?)?.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Trip duration normalized to `f64` minutes.
///
/// The sources agree on the unit (minutes) but not on the numeric type: one
/// export stores floats where the others store integers. Parsing everything
/// as `f64` keeps the most detailed representation. A non-empty cell that is
/// not a number is a fatal parse error.
fn duration_cell(record: &csv::StringRecord, idx: Option<usize>) -> Result<Option<f64>> {
    let Some(idx) = idx else { return Ok(None) };
    let text = record.get(idx).unwrap_or("").trim();
    if text.is_empty() {
        return Ok(None);
    }
    let minutes: f64 = text
        .parse()
        .with_context(|| format!("bad trip duration '{text}'"))?;
    Ok(Some(minutes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    const FULL_CSV: &str = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender
2017-01-02 09:15:00,2017-01-02 09:35:00,20,Clark St,State St,Subscriber,Male
2017-02-06 18:40:00,2017-02-06 18:52:00,12,State St,Clark St,Customer,
2017-06-05 07:05:00,2017-06-05 07:45:00,40,Clark St,Lake St,Subscriber,Female
";

    const MINIMAL_CSV: &str = "\
Start Time,Trip Duration
2017-03-06 10:00:00,15.5
2017-03-07 11:30:00,30.0
";

    fn write_city(dir: &Path, name: &str, file: &str, body: &str) -> CitySource {
        let path = dir.join(file);
        fs::write(&path, body).unwrap();
        CitySource {
            name: name.to_string(),
            path,
        }
    }

    fn test_config(dir: &Path) -> SourceConfig {
        SourceConfig {
            cities: vec![
                write_city(dir, "Fullville", "fullville.csv", FULL_CSV),
                write_city(dir, "Sparse City", "sparse_city.csv", MINIMAL_CSV),
            ],
        }
    }

    #[test]
    fn loads_single_city_with_derived_fields() -> Result<()> {
        let dir = tempdir()?;
        let loader = DatasetLoader::new(test_config(dir.path()));

        let table = loader.load(&CityChoice::Named("Fullville".to_string()))?;
        assert_eq!(table.len(), 3);
        assert!(table.capabilities.stations);
        assert!(table.capabilities.gender);

        let first = &table.rows[0];
        assert_eq!(first.month, 1);
        assert_eq!(first.weekday, Weekday::Mon); // 2017-01-02
        assert_eq!(first.start_hour(), 9);
        assert_eq!(first.duration_min, Some(20.0));
        assert_eq!(first.start_station.as_deref(), Some("Clark St"));

        // Blank gender cell parses as missing, not as an empty string.
        assert_eq!(table.rows[1].gender, None);
        Ok(())
    }

    #[test]
    fn city_lookup_is_case_insensitive() -> Result<()> {
        let dir = tempdir()?;
        let loader = DatasetLoader::new(test_config(dir.path()));
        let table = loader.load(&CityChoice::Named("sparse city".to_string()))?;
        assert_eq!(table.len(), 2);
        Ok(())
    }

    #[test]
    fn all_cities_unions_schemas_and_sums_rows() -> Result<()> {
        let dir = tempdir()?;
        let loader = DatasetLoader::new(test_config(dir.path()));

        let full = loader.load(&CityChoice::Named("Fullville".to_string()))?;
        let sparse = loader.load(&CityChoice::Named("Sparse City".to_string()))?;
        let all = loader.load(&CityChoice::All)?;

        assert_eq!(all.len(), full.len() + sparse.len());
        assert_eq!(
            all.capabilities,
            full.capabilities.union(sparse.capabilities)
        );
        // Left-anchored: configuration order, Fullville rows first.
        assert_eq!(all.rows[0].start_station.as_deref(), Some("Clark St"));
        // Sparse rows carry nulls for the columns their source lacked.
        assert_eq!(all.rows[full.len()].start_station, None);
        // Float-typed durations survive normalization.
        assert_eq!(all.rows[full.len()].duration_min, Some(15.5));
        Ok(())
    }

    #[test]
    fn unknown_city_is_a_typed_error() {
        let dir = tempdir().unwrap();
        let loader = DatasetLoader::new(test_config(dir.path()));
        let err = loader
            .load(&CityChoice::Named("Atlantis".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("unknown city"));
    }

    #[test]
    fn missing_start_time_column_fails() {
        let dir = tempdir().unwrap();
        let source = write_city(dir.path(), "Broken", "broken.csv", "Trip Duration\n12\n");
        let err = load_city(&source).unwrap_err();
        assert!(err.to_string().contains("Start Time"));
    }

    #[test]
    fn bad_timestamp_fails() {
        let dir = tempdir().unwrap();
        let source = write_city(
            dir.path(),
            "Broken",
            "broken.csv",
            "Start Time\nnot-a-date\n",
        );
        assert!(load_city(&source).is_err());
    }
}
