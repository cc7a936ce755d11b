use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Source configuration – the city → file mapping handed to the loader
// ---------------------------------------------------------------------------

/// One configured city data source.
#[derive(Debug, Clone, Deserialize)]
pub struct CitySource {
    /// Display name, e.g. "Chicago".
    pub name: String,
    /// Path of the city's CSV export.
    pub path: PathBuf,
}

/// The full list of known cities, passed into
/// [`DatasetLoader`](crate::data::loader::DatasetLoader) at construction.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub cities: Vec<CitySource>,
}

impl SourceConfig {
    /// The three bundled sample cities (see `src/bin/generate_sample.rs`).
    pub fn bundled() -> Self {
        let city = |name: &str, file: &str| CitySource {
            name: name.to_string(),
            path: PathBuf::from("data").join(file),
        };
        Self {
            cities: vec![
                city("Chicago", "chicago.csv"),
                city("New York City", "new_york_city.csv"),
                city("Washington", "washington.csv"),
            ],
        }
    }

    /// Parse a TOML config file:
    ///
    /// ```toml
    /// [[cities]]
    /// name = "Chicago"
    /// path = "data/chicago.csv"
    /// ```
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: SourceConfig = toml::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        if config.cities.is_empty() {
            bail!("config {} lists no cities", path.display());
        }
        Ok(config)
    }

    /// Use the config file when it exists, otherwise the bundled defaults.
    /// A present-but-invalid file is an error, not a silent fallback.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::bundled())
        }
    }

    /// Configured city names in order.
    pub fn city_names(&self) -> Vec<&str> {
        self.cities.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look up a city by name, case-insensitively.
    pub fn find(&self, name: &str) -> Option<&CitySource> {
        self.cities
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }
}
