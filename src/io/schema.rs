//! Declared per-resource row schemas.
//!
//! Providers name their columns differently (`TIME_PERIOD` vs `Periodo`) and
//! encode numbers differently (`1.234,5` vs `1234.5`). Rather than guessing at
//! runtime, every resource is configured with a `ResourceSchema` that names the
//! columns and the value parse rules. Binding a schema to a table header is the
//! only point where malformed input is rejected outright.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// Raw rows as delivered by a row source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    /// Cells per row; rows may be shorter than the header.
    pub rows: Vec<Vec<String>>,
    /// Source line each row starts on (header is line 1).
    lines: Vec<usize>,
}

impl RawTable {
    /// A table whose rows sit on consecutive lines after the header.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let lines = (2..rows.len() + 2).collect();
        Self { headers, rows, lines }
    }

    pub fn push_row(&mut self, line: usize, cells: Vec<String>) {
        self.lines.push(line);
        self.rows.push(cells);
    }

    /// Source line of row `idx`.
    pub fn line_of(&self, idx: usize) -> usize {
        self.lines.get(idx).copied().unwrap_or(idx + 2)
    }
}

/// Field delimiter of a resource's CSV export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    #[default]
    Comma,
    Semicolon,
    Tab,
}

impl Delimiter {
    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Semicolon => b';',
            Delimiter::Tab => b'\t',
        }
    }
}

/// Decimal separator used by a resource's value column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecimalSeparator {
    #[default]
    Dot,
    Comma,
}

/// Column names and parse rules for one resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSchema {
    pub year_column: String,
    /// Country/region column; resources without one cannot be country-filtered.
    #[serde(default)]
    pub region_column: Option<String>,
    /// Category column; when absent every row lands in `default_category`.
    #[serde(default)]
    pub category_column: Option<String>,
    #[serde(default)]
    pub default_category: Option<String>,
    pub value_column: String,
    /// Cell contents that mean "no observation".
    #[serde(default = "default_missing_markers")]
    pub missing_markers: Vec<String>,
    #[serde(default)]
    pub decimal: DecimalSeparator,
    #[serde(default)]
    pub delimiter: Delimiter,
    /// Provider category label -> normalized label (e.g. to `Total`).
    #[serde(default)]
    pub category_aliases: HashMap<String, String>,
}

fn default_missing_markers() -> Vec<String> {
    ["x", "-", "..", ":", ""].iter().map(|s| s.to_string()).collect()
}

impl ResourceSchema {
    pub fn new(year_column: &str, value_column: &str) -> Self {
        Self {
            year_column: year_column.to_string(),
            region_column: None,
            category_column: None,
            default_category: None,
            value_column: value_column.to_string(),
            missing_markers: default_missing_markers(),
            decimal: DecimalSeparator::Dot,
            delimiter: Delimiter::Comma,
            category_aliases: HashMap::new(),
        }
    }

    pub fn with_region(mut self, column: &str) -> Self {
        self.region_column = Some(column.to_string());
        self
    }

    pub fn with_category(mut self, column: &str) -> Self {
        self.category_column = Some(column.to_string());
        self
    }

    pub fn with_default_category(mut self, name: &str) -> Self {
        self.default_category = Some(name.to_string());
        self
    }

    pub fn with_decimal(mut self, decimal: DecimalSeparator) -> Self {
        self.decimal = decimal;
        self
    }

    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_alias(mut self, from: &str, to: &str) -> Self {
        self.category_aliases.insert(from.to_string(), to.to_string());
        self
    }

    /// Resolve column positions against a header.
    pub fn bind(&self, resource: &str, headers: &[String]) -> Result<BoundSchema, DataError> {
        let header_map: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (normalize_header_name(name), idx))
            .collect();

        let find = |column: &str| -> Result<usize, DataError> {
            header_map
                .get(&normalize_header_name(column))
                .copied()
                .ok_or_else(|| DataError::MissingColumn {
                    resource: resource.to_string(),
                    column: column.to_string(),
                })
        };

        let year = find(self.year_column.as_str())?;
        let value = find(self.value_column.as_str())?;
        let region = self.region_column.as_deref().map(find).transpose()?;
        let category = self.category_column.as_deref().map(find).transpose()?;

        Ok(BoundSchema {
            year,
            region,
            category,
            value,
        })
    }

    /// Records of `table`, one per row, using this schema's columns.
    pub fn records<'a>(&self, resource: &str, table: &'a RawTable) -> Result<Vec<RawRecord<'a>>, DataError> {
        let bound = self.bind(resource, &table.headers)?;
        Ok(table
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| bound.record(table.line_of(idx), row))
            .collect())
    }

    /// Normalized category label for a raw cell.
    pub fn category_label(&self, raw: Option<&str>) -> Option<String> {
        let raw = raw.map(str::trim).filter(|s| !s.is_empty());
        let label = match raw {
            Some(label) => label,
            None => self.default_category.as_deref()?,
        };
        Some(
            self.category_aliases
                .get(label)
                .cloned()
                .unwrap_or_else(|| label.to_string()),
        )
    }

    /// Parse a value cell. `None` for missing markers and unparseable text.
    pub fn parse_value(&self, raw: &str) -> Option<f64> {
        let trimmed = raw.trim();
        if self.missing_markers.iter().any(|m| m == trimmed) {
            return None;
        }

        // Eurostat appends status flags after the number ("2.4 p", "1.1 e").
        let number = trimmed
            .split_whitespace()
            .next()
            .unwrap_or(trimmed)
            .trim_end_matches(|c: char| c.is_ascii_alphabetic());

        let normalized = match self.decimal {
            DecimalSeparator::Dot => normalize_number(number, ',', '.')?,
            DecimalSeparator::Comma => normalize_number(number, '.', ',')?,
        };

        let v = normalized.parse::<f64>().ok()?;
        if v.is_finite() { Some(v) } else { None }
    }
}

/// Rewrite `number` with a `.` decimal point and no grouping.
///
/// Grouping separators are accepted only as well-formed thousands groups
/// (`1,234,567`); anything else (`2,4` in a dot-decimal resource) is rejected.
fn normalize_number(number: &str, group: char, decimal: char) -> Option<String> {
    let (sign, unsigned) = match number.strip_prefix(['-', '+']) {
        Some(rest) => (&number[..1], rest),
        None => ("", number),
    };
    let (int, frac) = match unsigned.split_once(decimal) {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };
    if frac.is_some_and(|f| f.contains([group, decimal])) {
        return None;
    }

    let digits = if int.contains(group) {
        let mut groups = int.split(group);
        let lead = groups.next()?;
        let lead_ok = (1..=3).contains(&lead.len()) && lead.bytes().all(|b| b.is_ascii_digit());
        let rest_ok = groups.all(|g| g.len() == 3 && g.bytes().all(|b| b.is_ascii_digit()));
        if !(lead_ok && rest_ok) {
            return None;
        }
        int.replace(group, "")
    } else {
        int.to_string()
    };

    Some(match frac {
        Some(frac) => format!("{sign}{digits}.{frac}"),
        None => format!("{sign}{digits}"),
    })
}

/// Parse a year cell ("2012", " 2012 ").
pub fn parse_year(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok()
}

/// Column positions of a schema bound to a concrete header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundSchema {
    year: usize,
    region: Option<usize>,
    category: Option<usize>,
    value: usize,
}

impl BoundSchema {
    fn record<'a>(&self, line: usize, row: &'a [String]) -> RawRecord<'a> {
        let cell = move |idx: usize| row.get(idx).map(String::as_str);
        RawRecord {
            line,
            year: cell(self.year).unwrap_or(""),
            region: self.region.and_then(cell),
            category: self.category.and_then(cell),
            value: cell(self.value).unwrap_or(""),
        }
    }
}

/// One source row viewed through a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRecord<'a> {
    /// 1-based line number in the source (header is line 1).
    pub line: usize,
    pub year: &'a str,
    pub region: Option<&'a str>,
    pub category: Option<&'a str>,
    pub value: &'a str,
}

pub(crate) fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. If we don't strip it, binding reports a missing column.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}
