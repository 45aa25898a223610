//! Row sources: the single "give me rows for this resource" collaborator.
//!
//! - `CsvDirSource`: `<dir>/<resource>.csv` on disk
//! - `HttpCsvSource`: `<base_url>/<resource>.csv` over HTTP
//! - `MemorySource`: tables held in memory (tests, embedding)
//!
//! Sources do no retrying or caching; failures surface as `DataError::Io`.
//! Bytes are decoded as UTF-8, falling back to Windows-1252 for legacy
//! exports, so an encoding mismatch never costs the whole resource.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use reqwest::blocking::Client;
use tracing::{debug, warn};

use crate::error::DataError;
use crate::io::schema::{Delimiter, RawTable};

/// Anything that can deliver the raw rows of a resource.
///
/// `Sync` so independent loads can run concurrently.
pub trait RowSource: Sync {
    fn fetch_rows(&self, resource_id: &str, delimiter: Delimiter) -> Result<RawTable, DataError>;
}

impl<T: RowSource + ?Sized> RowSource for Box<T> {
    fn fetch_rows(&self, resource_id: &str, delimiter: Delimiter) -> Result<RawTable, DataError> {
        (**self).fetch_rows(resource_id, delimiter)
    }
}

impl<T: RowSource + ?Sized> RowSource for &T {
    fn fetch_rows(&self, resource_id: &str, delimiter: Delimiter) -> Result<RawTable, DataError> {
        (**self).fetch_rows(resource_id, delimiter)
    }
}

/// Decode raw bytes, trying UTF-8 first and Windows-1252 (a Latin-1 superset) second.
pub fn decode_text<'a>(resource_id: &str, bytes: &'a [u8]) -> Cow<'a, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            warn!(resource = resource_id, "input is not UTF-8; decoding as Windows-1252");
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            decoded
        }
    }
}

/// Parse CSV bytes into a `RawTable`, recording the source line of every row.
pub fn read_csv_table(resource_id: &str, bytes: &[u8], delimiter: Delimiter) -> Result<RawTable, DataError> {
    let text = decode_text(resource_id, bytes);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| DataError::io(resource_id, format!("failed to read CSV headers: {e}")))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut table = RawTable::new(headers, Vec::new());
    for result in reader.records() {
        let record = result.map_err(|e| DataError::io(resource_id, format!("CSV parse error: {e}")))?;
        let line = record.position().map_or(table.rows.len() + 2, |p| p.line() as usize);
        table.push_row(line, record.iter().map(str::to_string).collect());
    }

    Ok(table)
}

/// Reads `<dir>/<resource_id>.csv`.
#[derive(Debug, Clone)]
pub struct CsvDirSource {
    dir: PathBuf,
}

impl CsvDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, resource_id: &str) -> PathBuf {
        self.dir.join(format!("{resource_id}.csv"))
    }
}

impl RowSource for CsvDirSource {
    fn fetch_rows(&self, resource_id: &str, delimiter: Delimiter) -> Result<RawTable, DataError> {
        let path = self.path_for(resource_id);
        debug!(path = %path.display(), "reading resource");
        let bytes = fs::read(&path)
            .map_err(|e| DataError::io(resource_id, format!("failed to read '{}': {e}", path.display())))?;
        read_csv_table(resource_id, &bytes, delimiter)
    }
}

/// Fetches `<base_url>/<resource_id>.csv` with a blocking HTTP client.
pub struct HttpCsvSource {
    client: Client,
    base_url: String,
}

impl HttpCsvSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn url_for(&self, resource_id: &str) -> String {
        format!("{}/{resource_id}.csv", self.base_url)
    }
}

impl RowSource for HttpCsvSource {
    fn fetch_rows(&self, resource_id: &str, delimiter: Delimiter) -> Result<RawTable, DataError> {
        let url = self.url_for(resource_id);
        debug!(%url, "fetching resource");

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| DataError::io(resource_id, format!("request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(DataError::io(
                resource_id,
                format!("request failed with status {}", resp.status()),
            ));
        }

        let body = resp
            .bytes()
            .map_err(|e| DataError::io(resource_id, format!("failed to read response body: {e}")))?;
        read_csv_table(resource_id, &body, delimiter)
    }
}

/// Something a `MemorySource` can serve.
#[derive(Debug, Clone)]
enum Stored {
    Table(RawTable),
    /// Parsed on fetch, with the caller's delimiter.
    Csv(Vec<u8>),
}

/// In-memory tables keyed by resource id.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    tables: HashMap<String, Stored>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, resource_id: &str, table: RawTable) -> Self {
        self.tables.insert(resource_id.to_string(), Stored::Table(table));
        self
    }

    /// Serve raw CSV bytes, parsed like a file would be.
    pub fn with_csv(mut self, resource_id: &str, csv: impl AsRef<[u8]>) -> Self {
        self.tables
            .insert(resource_id.to_string(), Stored::Csv(csv.as_ref().to_vec()));
        self
    }
}

impl RowSource for MemorySource {
    fn fetch_rows(&self, resource_id: &str, delimiter: Delimiter) -> Result<RawTable, DataError> {
        match self.tables.get(resource_id) {
            Some(Stored::Table(table)) => Ok(table.clone()),
            Some(Stored::Csv(bytes)) => read_csv_table(resource_id, bytes, delimiter),
            None => Err(DataError::io(resource_id, "resource not available")),
        }
    }
}
