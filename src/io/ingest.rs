//! Row filtering and grouping.
//!
//! This module turns raw rows of one indicator into a `CategorizedDataset`:
//! category -> ascending `(year, value)` series.
//!
//! Design goals:
//! - **Declared schema** for columns (malformed input is an error)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Country filter applied first** so foreign rows never reach the unions
//! - **Deterministic behavior** (category order and year order are stable)

use std::collections::{BTreeMap, HashSet};

use tracing::{debug, warn};

use crate::domain::{CategorizedDataset, TimeSeries, YearValue};
use crate::error::DataError;
use crate::io::schema::{RawRecord, RawTable, ResourceSchema, parse_year};
use crate::names::CountryNames;

/// A row-level problem encountered while grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

impl From<RowError> for DataError {
    fn from(err: RowError) -> Self {
        DataError::Parse {
            line: err.line,
            message: err.message,
        }
    }
}

/// Grouping output: the dataset plus what happened to every row.
#[derive(Debug, Clone)]
pub struct GroupedData {
    pub dataset: CategorizedDataset,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
    /// Rows skipped because they belong to another country.
    pub rows_filtered: usize,
}

/// A row that passed validation.
struct ValidRow {
    line: usize,
    category: String,
    point: YearValue,
}

/// Bind `schema` to `table` and group its rows.
pub fn group_table(
    resource: &str,
    table: &RawTable,
    schema: &ResourceSchema,
    country_filter: Option<&str>,
    names: &CountryNames,
) -> Result<GroupedData, DataError> {
    let records = schema.records(resource, table)?;
    group_records(resource, &records, schema, country_filter, names)
}

/// Group already-extracted records into per-category series.
pub fn group_records(
    resource: &str,
    records: &[RawRecord<'_>],
    schema: &ResourceSchema,
    country_filter: Option<&str>,
    names: &CountryNames,
) -> Result<GroupedData, DataError> {
    let filter = country_filter
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(|f| names.canonical(f));

    if filter.is_some() && schema.region_column.is_none() {
        return Err(DataError::MissingColumn {
            resource: resource.to_string(),
            column: "<region>".to_string(),
        });
    }

    let mut row_errors = Vec::new();
    let mut rows_filtered = 0usize;

    // Pass 1: filter, validate, and collect the distinct categories.
    let mut valid = Vec::new();
    let mut categories: BTreeMap<String, Vec<YearValue>> = BTreeMap::new();

    for record in records {
        if let Some(filter) = filter.as_deref() {
            let region = record.region.map(|r| names.canonical(r));
            if region.as_deref() != Some(filter) {
                rows_filtered += 1;
                continue;
            }
        }

        match validate_record(record, schema) {
            Ok(row) => {
                categories.entry(row.category.clone()).or_default();
                valid.push(row);
            }
            Err(e) => row_errors.push(e),
        }
    }

    // Pass 2: assign rows; the first observation of a (category, year) wins.
    let mut seen: HashSet<(String, i32)> = HashSet::new();
    let mut rows_used = 0usize;
    for row in valid {
        if !seen.insert((row.category.clone(), row.point.year)) {
            row_errors.push(RowError {
                line: row.line,
                message: format!("Duplicate year {} for category `{}`.", row.point.year, row.category),
            });
            continue;
        }
        if let Some(points) = categories.get_mut(&row.category) {
            points.push(row.point);
            rows_used += 1;
        }
    }

    let series = categories.into_iter().map(|(name, mut points)| {
        points.sort_by_key(|p| p.year);
        TimeSeries::new(name, points)
    });
    let dataset = CategorizedDataset::new(series);

    if !row_errors.is_empty() {
        warn!(
            resource,
            dropped = row_errors.len(),
            first = %row_errors[0].message,
            "dropped unparseable rows"
        );
    }
    debug!(
        resource,
        rows_read = records.len(),
        rows_used,
        rows_filtered,
        categories = dataset.categories().len(),
        years = dataset.years().len(),
        "grouped rows"
    );

    Ok(GroupedData {
        dataset,
        row_errors,
        rows_read: records.len(),
        rows_used,
        rows_filtered,
    })
}

fn validate_record(record: &RawRecord<'_>, schema: &ResourceSchema) -> Result<ValidRow, RowError> {
    let err = |message: String| RowError {
        line: record.line,
        message,
    };

    let year = parse_year(record.year).ok_or_else(|| err(format!("Invalid year '{}'.", record.year)))?;
    let value = schema
        .parse_value(record.value)
        .ok_or_else(|| err(format!("Missing/invalid value '{}'.", record.value)))?;
    let category = schema
        .category_label(record.category)
        .ok_or_else(|| err("Missing category.".to_string()))?;

    Ok(ValidRow {
        line: record.line,
        category,
        point: YearValue { year, value },
    })
}
