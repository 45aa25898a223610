//! Per-country comparison snapshots.
//!
//! A snapshot pairs the latest inflation reading with the latest wage reading
//! for one country and derives the real wage and its index against the
//! country's own base year. The two readings are "latest" independently: a
//! country may publish wages for a year its inflation series does not cover
//! yet.
//!
//! Snapshots never fail. A missing or unreadable upstream resource shows up as
//! an absent field. Only a blank country name yields no snapshot at all.

use std::sync::Arc;

use tracing::{info, warn};

use crate::data::SeriesLoader;
use crate::domain::{CategorizedDataset, ComparisonSnapshot, Convention, WageSeries};
use crate::io::source::RowSource;
use crate::math::adjust_to_base_year;

pub mod cache;
pub mod selection;

pub use cache::*;
pub use selection::*;

/// Base year preferred for a country's own real-wage index.
pub const PREFERRED_BASE_YEAR: i32 = 2012;

/// Base year for a wage history: `PREFERRED_BASE_YEAR` if observed, else the earliest year.
pub fn own_base_year(wages: &WageSeries) -> Option<i32> {
    if wages.contains_year(PREFERRED_BASE_YEAR) {
        Some(PREFERRED_BASE_YEAR)
    } else {
        wages.earliest_year()
    }
}

/// Assemble a snapshot from already-loaded inputs.
pub fn compose_snapshot(
    country: &str,
    display_name: &str,
    inflation: Option<CategorizedDataset>,
    wages: Option<WageSeries>,
) -> ComparisonSnapshot {
    let inflation = inflation.filter(|d| !d.is_empty());
    let wage_history = wages.unwrap_or_default();

    let inflation_reading = inflation
        .as_ref()
        .and_then(|d| d.total().ok())
        .and_then(|total| total.latest());
    let wage_reading = wage_history.latest();

    let base_year = own_base_year(&wage_history);
    let base_nominal = base_year.and_then(|y| wage_history.get(y));

    let real_wage = match (wage_reading, base_year, inflation.as_ref()) {
        (Some(w), Some(base), Some(data)) => adjust_to_base_year(w.value, data, w.year, base).ok(),
        _ => None,
    };

    let index = match (real_wage, base_nominal) {
        (Some(real), Some(nominal)) if nominal != 0.0 => Some(real / nominal * 100.0),
        _ => None,
    };

    ComparisonSnapshot {
        country: country.to_string(),
        display_name: display_name.to_string(),
        inflation: inflation_reading,
        wage: wage_reading,
        base_year,
        base_nominal,
        real_wage,
        index,
        wage_history,
        inflation_data: inflation,
    }
}

/// Builds snapshots on demand and caches them per canonical country.
pub struct SnapshotBuilder<S> {
    loader: SeriesLoader<S>,
    cache: SnapshotCache,
}

impl<S: RowSource> SnapshotBuilder<S> {
    pub fn new(loader: SeriesLoader<S>, cache: SnapshotCache) -> Self {
        Self { loader, cache }
    }

    pub fn loader(&self) -> &SeriesLoader<S> {
        &self.loader
    }

    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }

    /// Cached snapshot for `country` (any known spelling), computing it on first use.
    ///
    /// `None` for a blank name.
    pub fn build_snapshot(&mut self, country: &str) -> Option<Arc<ComparisonSnapshot>> {
        let canonical = self.loader.names().resolve(Some(country), Convention::Canonical)?;
        if let Some(hit) = self.cache.get(&canonical) {
            return Some(hit);
        }
        self.refresh(&canonical)
    }

    /// Recompute and overwrite the snapshot for `country`. `None` for a blank name.
    pub fn refresh(&mut self, country: &str) -> Option<Arc<ComparisonSnapshot>> {
        let names = self.loader.names();
        let canonical = names.resolve(Some(country), Convention::Canonical)?;
        let display = names.to_convention(&canonical, Convention::Display);

        let loader = &self.loader;
        let (inflation, wages) = rayon::join(
            || loader.load_inflation(&canonical),
            || loader.load_wage_series(&canonical),
        );

        let inflation = inflation
            .inspect_err(|e| warn!(country = %canonical, error = %e, "inflation unavailable"))
            .ok();
        let wages = wages
            .inspect_err(|e| warn!(country = %canonical, error = %e, "wages unavailable"))
            .ok();

        let snapshot = compose_snapshot(&canonical, &display, inflation, wages);
        info!(
            country = %canonical,
            inflation_year = ?snapshot.inflation.map(|r| r.year),
            wage_year = ?snapshot.wage.map(|r| r.year),
            "built snapshot"
        );
        Some(self.cache.insert(snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Catalog;
    use crate::domain::{TimeSeries, YearValue};
    use crate::io::source::MemorySource;
    use crate::names::CountryNames;
    use crate::snapshot::cache::tests::FixedClock;

    fn inflation(points: &[(i32, f64)]) -> CategorizedDataset {
        CategorizedDataset::new([TimeSeries::new(
            "Total",
            points.iter().map(|&(y, v)| YearValue::new(y, v)),
        )])
    }

    #[test]
    fn base_year_prefers_2012() {
        assert_eq!(own_base_year(&WageSeries::new([(2010, 1.0), (2012, 2.0)])), Some(2012));
        assert_eq!(own_base_year(&WageSeries::new([(2014, 1.0), (2013, 2.0)])), Some(2013));
        assert_eq!(own_base_year(&WageSeries::default()), None);
    }

    #[test]
    fn latest_readings_are_independent() {
        let snap = compose_snapshot(
            "ESP",
            "Spain",
            Some(inflation(&[(2012, 2.4), (2013, 0.3)])),
            Some(WageSeries::new([(2012, 500.0), (2013, 510.0), (2014, 520.0)])),
        );
        assert_eq!(snap.inflation.unwrap().year, 2013);
        assert_eq!(snap.wage.unwrap().year, 2014);
        assert_eq!(snap.base_year, Some(2012));

        // 2014 has no rate: only 2013 compounds.
        let real = snap.real_wage.unwrap();
        assert!((real - 520.0 / 1.003).abs() < 1e-9);
        assert!((snap.index.unwrap() - real / 500.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn missing_inputs_leave_fields_absent() {
        let snap = compose_snapshot("ESP", "Spain", None, Some(WageSeries::new([(2012, 500.0)])));
        assert!(snap.inflation.is_none());
        assert!(snap.real_wage.is_none());
        assert!(snap.index.is_none());
        assert_eq!(snap.wage.unwrap().value, 500.0);

        let snap = compose_snapshot("ESP", "Spain", Some(inflation(&[(2012, 1.0)])), None);
        assert!(snap.wage.is_none());
        assert!(snap.base_year.is_none());
        assert!(snap.inflation.is_some());
    }

    #[test]
    fn builder_caches_by_canonical_name() {
        let source = MemorySource::new()
            .with_csv(
                "minimum-wages",
                "geo,TIME_PERIOD,OBS_VALUE\nSpain,2012,748.3\nSpain,2013,752.85\n",
            );
        // No inflation resource: the snapshot must still build.
        let loader = SeriesLoader::new(source, Catalog::default(), CountryNames::builtin());
        let mut builder = SnapshotBuilder::new(loader, SnapshotCache::new(Arc::new(FixedClock::at(2024))));

        let a = builder.build_snapshot("España").unwrap();
        let b = builder.build_snapshot("Spain").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.country, "ESP");
        assert_eq!(a.display_name, "Spain");
        assert!(a.inflation.is_none());
        assert_eq!(a.wage.unwrap().year, 2013);
        assert_eq!(builder.cache().len(), 1);
    }

    #[test]
    fn blank_country_builds_nothing() {
        let loader = SeriesLoader::new(MemorySource::new(), Catalog::default(), CountryNames::builtin());
        let mut builder = SnapshotBuilder::new(loader, SnapshotCache::default());
        assert!(builder.build_snapshot("  ").is_none());
        assert!(builder.refresh("").is_none());
        assert!(builder.cache().is_empty());
    }

    #[test]
    fn collapsed_inflation_leaves_real_wage_absent() {
        let snap = compose_snapshot(
            "ESP",
            "Spain",
            Some(inflation(&[(2013, -100.0)])),
            Some(WageSeries::new([(2012, 500.0), (2013, 510.0)])),
        );
        assert_eq!(snap.wage.unwrap().value, 510.0);
        assert!(snap.real_wage.is_none());
        assert!(snap.index.is_none());
    }
}
