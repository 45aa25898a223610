//! Shared domain types.
//!
//! These types are kept small and serializable so they can be:
//!
//! - built by the ingest layer and the engines
//! - exported to JSON/CSV
//! - handed to presentation layers as finished values

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::series::latest_observed_year;
use crate::error::DataError;

/// Name of the aggregate inflation category every adjustment is computed from.
pub const TOTAL_CATEGORY: &str = "Total";

/// One `(year, value)` observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearValue {
    pub year: i32,
    pub value: f64,
}

impl YearValue {
    pub fn new(year: i32, value: f64) -> Self {
        Self { year, value }
    }
}

/// A named series ordered by year.
///
/// Invariants: ascending years, no duplicate years, every value finite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    pub name: String,
    values: Vec<YearValue>,
}

impl TimeSeries {
    /// Build a series from unordered points.
    ///
    /// Non-finite values are dropped. For duplicate years the first point wins.
    pub fn new(name: impl Into<String>, points: impl IntoIterator<Item = YearValue>) -> Self {
        let mut values: Vec<YearValue> = points.into_iter().filter(|p| p.value.is_finite()).collect();
        // Stable sort keeps the first occurrence ahead of later duplicates.
        values.sort_by_key(|p| p.year);
        values.dedup_by_key(|p| p.year);
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn values(&self) -> &[YearValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.values.iter().map(|p| p.year)
    }

    /// Value observed in `year`, if any.
    pub fn value_at(&self, year: i32) -> Option<f64> {
        self.values
            .binary_search_by_key(&year, |p| p.year)
            .ok()
            .map(|idx| self.values[idx].value)
    }

    /// Latest observation.
    pub fn latest(&self) -> Option<YearValue> {
        let year = latest_observed_year(self.years())?;
        self.value_at(year).map(|value| YearValue { year, value })
    }
}

/// Several series for one indicator plus the union of their years.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategorizedDataset {
    categories: Vec<TimeSeries>,
    years: BTreeSet<i32>,
}

impl CategorizedDataset {
    /// Build a dataset. Later categories sharing a name with an earlier one are ignored.
    pub fn new(categories: impl IntoIterator<Item = TimeSeries>) -> Self {
        let mut seen = BTreeSet::new();
        let categories: Vec<TimeSeries> = categories
            .into_iter()
            .filter(|c| seen.insert(c.name.clone()))
            .collect();
        let years = categories.iter().flat_map(TimeSeries::years).collect();
        Self { categories, years }
    }

    /// The explicit "no data for this filter" result.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn categories(&self) -> &[TimeSeries] {
        &self.categories
    }

    /// Union of years across all categories, ascending.
    pub fn years(&self) -> &BTreeSet<i32> {
        &self.years
    }

    pub fn category(&self, name: &str) -> Option<&TimeSeries> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// The aggregate `Total` category required for inflation adjustments.
    pub fn total(&self) -> Result<&TimeSeries, DataError> {
        self.category(TOTAL_CATEGORY)
            .ok_or_else(|| DataError::MissingAggregate {
                category: TOTAL_CATEGORY.to_string(),
            })
    }
}

/// Nominal wage amounts by year; only observed years are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WageSeries {
    amounts: BTreeMap<i32, f64>,
}

impl WageSeries {
    pub fn new(amounts: impl IntoIterator<Item = (i32, f64)>) -> Self {
        Self {
            amounts: amounts.into_iter().filter(|(_, v)| v.is_finite()).collect(),
        }
    }

    pub fn get(&self, year: i32) -> Option<f64> {
        self.amounts.get(&year).copied()
    }

    pub fn contains_year(&self, year: i32) -> bool {
        self.amounts.contains_key(&year)
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.amounts.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = YearValue> + '_ {
        self.amounts.iter().map(|(&year, &value)| YearValue { year, value })
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    pub fn earliest_year(&self) -> Option<i32> {
        self.amounts.keys().next().copied()
    }

    pub fn latest(&self) -> Option<YearValue> {
        let year = latest_observed_year(self.years())?;
        self.get(year).map(|value| YearValue { year, value })
    }
}

impl From<&TimeSeries> for WageSeries {
    fn from(series: &TimeSeries) -> Self {
        Self::new(series.values().iter().map(|p| (p.year, p.value)))
    }
}

/// A nominal wage and its value expressed in `base_year` money.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RealWageEntry {
    pub year: i32,
    pub nominal: f64,
    pub real: f64,
    pub base_year: i32,
}

/// Naming conventions a country can be looked up in or resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Convention {
    /// Stable identity used for cache keys (ISO 3166 alpha-3).
    Canonical,
    /// Spelling used by the national statistics provider (Spanish).
    Localized,
    /// Spelling used by the international provider (English).
    English,
    /// Human-facing form; output only.
    Display,
}

/// Per-country summary: latest inflation and wage readings plus derived metrics.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonSnapshot {
    /// Canonical country name (cache key).
    pub country: String,
    pub display_name: String,
    /// Latest reading of the `Total` inflation category.
    pub inflation: Option<YearValue>,
    /// Latest wage reading; independent of the inflation year.
    pub wage: Option<YearValue>,
    /// Base year the real wage is expressed in.
    pub base_year: Option<i32>,
    pub base_nominal: Option<f64>,
    pub real_wage: Option<f64>,
    /// `real_wage / base_nominal * 100`.
    pub index: Option<f64>,
    pub wage_history: WageSeries,
    #[serde(skip)]
    pub inflation_data: Option<CategorizedDataset>,
}

/// Metrics for one country re-based at a shared (or own) base year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BasedMetrics {
    pub base_year: i32,
    pub base_nominal: f64,
    pub latest_year: i32,
    pub latest_nominal: f64,
    pub real: f64,
    pub index: f64,
}

/// Two countries re-based at the same year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedPair {
    pub shared_base_year: i32,
    pub metrics_a: BasedMetrics,
    pub metrics_b: BasedMetrics,
}

/// Outcome of comparing two countries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Comparison {
    Aligned {
        country_a: String,
        country_b: String,
        pair: AlignedPair,
    },
    /// Each country on its own base; not comparable as a difference.
    Unaligned {
        country_a: String,
        country_b: String,
        metrics_a: Option<BasedMetrics>,
        metrics_b: Option<BasedMetrics>,
    },
}

impl Comparison {
    pub fn is_aligned(&self) -> bool {
        matches!(self, Comparison::Aligned { .. })
    }
}

/// One year of combined income-share and inflation readings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VariationRow {
    pub year: i32,
    pub income_share: f64,
    pub inflation_rate: f64,
    pub income_variation: Option<f64>,
    pub inflation_variation: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_series_sorts_and_drops_duplicates() {
        let s = TimeSeries::new(
            "Total",
            [
                YearValue::new(2014, 1.0),
                YearValue::new(2012, 2.0),
                YearValue::new(2014, 9.0),
                YearValue::new(2013, f64::NAN),
            ],
        );
        let years: Vec<i32> = s.years().collect();
        assert_eq!(years, vec![2012, 2014]);
        assert_eq!(s.value_at(2014), Some(1.0));
        assert_eq!(s.value_at(2013), None);
        assert_eq!(s.latest(), Some(YearValue::new(2014, 1.0)));
    }

    #[test]
    fn dataset_years_are_union_across_categories() {
        let ds = CategorizedDataset::new([
            TimeSeries::new("Total", [YearValue::new(2010, 1.0)]),
            TimeSeries::new("Food", [YearValue::new(2011, 2.0), YearValue::new(2009, 0.5)]),
        ]);
        let years: Vec<i32> = ds.years().iter().copied().collect();
        assert_eq!(years, vec![2009, 2010, 2011]);
        assert!(ds.total().is_ok());
    }

    #[test]
    fn dataset_without_total_reports_missing_aggregate() {
        let ds = CategorizedDataset::new([TimeSeries::new("Food", [YearValue::new(2011, 2.0)])]);
        assert!(matches!(ds.total(), Err(DataError::MissingAggregate { .. })));
    }
}
