//! Run configuration: where rows come from and how each resource is shaped.
//!
//! The resource catalog declares, for each indicator the pipeline needs, the
//! resource id handed to the row source and the schema its rows follow. A
//! built-in catalog matches the Eurostat/INE exports the tool was written
//! against; a JSON file can replace it.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, DataError};
use crate::io::schema::{DecimalSeparator, Delimiter, ResourceSchema};
use crate::io::source::{CsvDirSource, HttpCsvSource, RowSource};

/// Environment variable naming a directory of `<resource>.csv` files.
pub const ENV_DATA_DIR: &str = "RW_DATA_DIR";
/// Environment variable naming a base URL serving `<resource>.csv` files.
pub const ENV_BASE_URL: &str = "RW_BASE_URL";

/// One resource: its id and row schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSpec {
    pub id: String,
    pub schema: ResourceSchema,
    /// Category read as the single series for one-series indicators.
    #[serde(default)]
    pub series: Option<String>,
}

/// The indicators the pipeline consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub inflation: ResourceSpec,
    pub wages: ResourceSpec,
    pub income_share: ResourceSpec,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            inflation: ResourceSpec {
                id: "hicp-annual-rate".to_string(),
                schema: ResourceSchema::new("TIME_PERIOD", "OBS_VALUE")
                    .with_region("geo")
                    .with_category("coicop")
                    .with_alias("All-items HICP", "Total")
                    .with_alias("CP00", "Total"),
                series: None,
            },
            wages: ResourceSpec {
                id: "minimum-wages".to_string(),
                schema: ResourceSchema::new("TIME_PERIOD", "OBS_VALUE")
                    .with_region("geo")
                    .with_default_category("Minimum wage"),
                series: Some("Minimum wage".to_string()),
            },
            income_share: ResourceSpec {
                id: "income-share".to_string(),
                schema: ResourceSchema::new("Periodo", "Total")
                    .with_region("País")
                    .with_default_category("Labour share")
                    .with_decimal(DecimalSeparator::Comma)
                    .with_delimiter(Delimiter::Semicolon),
                series: Some("Labour share".to_string()),
            },
        }
    }
}

impl Catalog {
    /// Load a catalog from JSON.
    pub fn from_json_path(path: &Path) -> Result<Self, AppError> {
        let file = File::open(path)
            .map_err(|e| AppError::new(2, format!("Failed to open catalog JSON '{}': {e}", path.display())))?;
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid catalog JSON: {e}")))
    }

    /// Find a resource by id.
    pub fn resource(&self, id: &str) -> Result<&ResourceSpec, DataError> {
        [&self.inflation, &self.wages, &self.income_share]
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| DataError::UnknownResource(id.to_string()))
    }
}

/// Where rows are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    Dir(PathBuf),
    Http(String),
}

impl SourceConfig {
    /// Resolve from explicit flags, falling back to the environment (`.env` honoured).
    ///
    /// A directory wins over a URL when both are given.
    pub fn resolve(data_dir: Option<PathBuf>, base_url: Option<String>) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let data_dir = data_dir.or_else(|| std::env::var_os(ENV_DATA_DIR).map(PathBuf::from));
        let base_url = base_url.or_else(|| std::env::var(ENV_BASE_URL).ok());

        match (data_dir, base_url) {
            (Some(dir), _) => Ok(SourceConfig::Dir(dir)),
            (None, Some(url)) => Ok(SourceConfig::Http(url)),
            (None, None) => Err(AppError::new(
                2,
                format!("No data source: pass --data-dir/--base-url or set {ENV_DATA_DIR}/{ENV_BASE_URL} (.env)."),
            )),
        }
    }

    pub fn into_source(self) -> Box<dyn RowSource + Send> {
        match self {
            SourceConfig::Dir(dir) => Box::new(CsvDirSource::new(dir)),
            SourceConfig::Http(url) => Box::new(HttpCsvSource::new(url)),
        }
    }
}
