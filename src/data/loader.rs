//! Loading normalized series through the configured row source.

use tracing::{debug, info};

use crate::config::{Catalog, ResourceSpec};
use crate::domain::{CategorizedDataset, TimeSeries, WageSeries};
use crate::error::DataError;
use crate::io::ingest::{GroupedData, group_table};
use crate::io::source::RowSource;
use crate::names::CountryNames;

/// Row source + catalog + name table: everything needed to load a series.
pub struct SeriesLoader<S> {
    source: S,
    catalog: Catalog,
    names: CountryNames,
}

impl<S: RowSource> SeriesLoader<S> {
    pub fn new(source: S, catalog: Catalog, names: CountryNames) -> Self {
        Self {
            source,
            catalog,
            names,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn names(&self) -> &CountryNames {
        &self.names
    }

    /// Fetch and group a resource, keeping the ingest report.
    pub fn load_grouped(&self, resource_id: &str, country_filter: Option<&str>) -> Result<GroupedData, DataError> {
        let spec = self.catalog.resource(resource_id)?;
        self.load_spec(spec, country_filter)
    }

    /// Category -> year -> value for one resource, optionally limited to one country.
    pub fn load_normalized_series(
        &self,
        resource_id: &str,
        country_filter: Option<&str>,
    ) -> Result<CategorizedDataset, DataError> {
        Ok(self.load_grouped(resource_id, country_filter)?.dataset)
    }

    /// The country's inflation dataset (`Total` plus any sub-indices).
    pub fn load_inflation(&self, country: &str) -> Result<CategorizedDataset, DataError> {
        Ok(self.load_spec(&self.catalog.inflation, Some(country))?.dataset)
    }

    /// The country's nominal wage series; empty when the country has no rows.
    pub fn load_wage_series(&self, country: &str) -> Result<WageSeries, DataError> {
        let series = self.load_single_series(&self.catalog.wages, country)?;
        Ok(series.as_ref().map(WageSeries::from).unwrap_or_default())
    }

    /// The country's income-share series, if it has one.
    pub fn load_income_share(&self, country: &str) -> Result<Option<TimeSeries>, DataError> {
        self.load_single_series(&self.catalog.income_share, country)
    }

    fn load_spec(&self, spec: &ResourceSpec, country_filter: Option<&str>) -> Result<GroupedData, DataError> {
        info!(resource = %spec.id, country = country_filter.unwrap_or("*"), "loading resource");
        let table = self.source.fetch_rows(&spec.id, spec.schema.delimiter)?;
        group_table(&spec.id, &table, &spec.schema, country_filter, &self.names)
    }

    fn load_single_series(&self, spec: &ResourceSpec, country: &str) -> Result<Option<TimeSeries>, DataError> {
        let dataset = self.load_spec(spec, Some(country))?.dataset;
        let series = match spec.series.as_deref() {
            Some(name) => dataset.category(name).cloned(),
            None => dataset.categories().first().cloned(),
        };
        if series.is_none() {
            debug!(resource = %spec.id, country, "no series for country");
        }
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::source::MemorySource;

    fn loader() -> SeriesLoader<MemorySource> {
        let source = MemorySource::new()
            .with_csv(
                "minimum-wages",
                "geo,TIME_PERIOD,OBS_VALUE\nSpain,2012,748.3\nSpain,2013,752.85\nFrance,2012,1425.67\n",
            )
            .with_csv("income-share", "País;Periodo;Total\nEspaña;2012;55,1\nEspaña;2013;54,3\n");
        SeriesLoader::new(source, Catalog::default(), CountryNames::builtin())
    }

    #[test]
    fn wage_series_for_country() {
        let wages = loader().load_wage_series("España").unwrap();
        assert_eq!(wages.len(), 2);
        assert_eq!(wages.get(2013), Some(752.85));
    }

    #[test]
    fn income_share_uses_comma_decimals() {
        let income = loader().load_income_share("Spain").unwrap().unwrap();
        assert_eq!(income.value_at(2012), Some(55.1));
    }

    #[test]
    fn latin1_income_share_still_matches_country() {
        let source = MemorySource::new().with_csv("income-share", b"Pa\xeds;Periodo;Total\nEspa\xf1a;2012;55,1\n");
        let loader = SeriesLoader::new(source, Catalog::default(), CountryNames::builtin());
        let income = loader.load_income_share("ESP").unwrap().unwrap();
        assert_eq!(income.value_at(2012), Some(55.1));
    }

    #[test]
    fn unknown_country_gives_empty_wages() {
        assert!(loader().load_wage_series("Atlantis").unwrap().is_empty());
    }

    #[test]
    fn missing_resource_propagates_io() {
        let err = loader().load_inflation("Spain").unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }
}
