//! Shared workflows used by the CLI and by embedding front-ends.
//!
//! Keeping these in one place avoids duplicating the load -> compute flow:
//! the CLI only decides how to present the results.

use std::sync::Arc;

use tracing::{debug, info};

use crate::compare::compare;
use crate::data::SeriesLoader;
use crate::domain::{Comparison, ComparisonSnapshot, RealWageEntry, VariationRow};
use crate::error::AppError;
use crate::io::source::RowSource;
use crate::math::real_wage_series;
use crate::snapshot::{Dispatch, PendingSelection, SelectionTicket, SnapshotBuilder, own_base_year};
use crate::variation::combine_variations;

/// Real-wage table for one country.
#[derive(Debug, Clone)]
pub struct RealWageRun {
    pub country: String,
    pub rows: Vec<RealWageEntry>,
}

/// Load wages and inflation together and express every wage at one base year.
///
/// `base_year` defaults to the country's own base (2012 if observed, else the earliest year).
pub fn run_real_wages<S: RowSource>(
    loader: &SeriesLoader<S>,
    country: &str,
    base_year: Option<i32>,
) -> Result<RealWageRun, AppError> {
    let canonical = loader.names().canonical(country);
    let (wages, inflation) = rayon::join(
        || loader.load_wage_series(&canonical),
        || loader.load_inflation(&canonical),
    );
    let wages = wages?;
    let inflation = inflation?;

    let base_year = base_year
        .or_else(|| own_base_year(&wages))
        .ok_or_else(|| AppError::new(3, format!("No wage observations for `{country}`.")))?;

    let rows = real_wage_series(&wages, &inflation, base_year)?;
    info!(country = %canonical, base_year, rows = rows.len(), "computed real wages");
    Ok(RealWageRun {
        country: canonical,
        rows,
    })
}

/// Year-over-year variations for one country.
#[derive(Debug, Clone)]
pub struct VariationRun {
    pub country: String,
    pub rows: Vec<VariationRow>,
}

pub fn run_variations<S: RowSource>(loader: &SeriesLoader<S>, country: &str) -> Result<VariationRun, AppError> {
    let canonical = loader.names().canonical(country);
    let (income, inflation) = rayon::join(
        || loader.load_income_share(&canonical),
        || loader.load_inflation(&canonical),
    );
    let income = income?
        .ok_or_else(|| AppError::new(3, format!("No income-share series for `{country}`.")))?;
    let inflation = inflation?;

    let rows = combine_variations(&income, &inflation);
    debug!(country = %canonical, rows = rows.len(), "combined variations");
    Ok(VariationRun {
        country: canonical,
        rows,
    })
}

/// An anchor country plus a changeable counterpart, with stale results dropped.
///
/// The anchor's snapshot must exist before any counterpart can be compared.
/// Counterparts selected before that are parked, and only the last one runs.
pub struct ComparisonSession<S> {
    builder: SnapshotBuilder<S>,
    selection: PendingSelection,
    anchor: Option<Arc<ComparisonSnapshot>>,
}

impl<S: RowSource> ComparisonSession<S> {
    pub fn new(builder: SnapshotBuilder<S>) -> Self {
        Self {
            builder,
            selection: PendingSelection::new(),
            anchor: None,
        }
    }

    pub fn builder(&self) -> &SnapshotBuilder<S> {
        &self.builder
    }

    /// Build the anchor snapshot. Returns the parked counterpart, if one is waiting.
    ///
    /// A blank anchor name leaves the session without an anchor and keeps any
    /// counterpart parked.
    pub fn set_anchor(&mut self, country: &str) -> Option<SelectionTicket> {
        self.anchor = Some(self.builder.build_snapshot(country)?);
        self.selection.mark_ready()
    }

    /// Choose the counterpart; superseded selections are never computed to completion.
    pub fn select_counterpart(&mut self, country: &str) -> Dispatch {
        self.selection.request(country)
    }

    /// Compute the comparison for `ticket`. `None` if the ticket went stale.
    pub fn complete(&mut self, ticket: &SelectionTicket) -> Option<Comparison> {
        let anchor = Arc::clone(self.anchor.as_ref()?);
        let counterpart = self.builder.build_snapshot(ticket.target())?;
        let result = compare(&anchor, &counterpart);
        if !self.selection.is_current(ticket) {
            debug!(country = ticket.target(), "discarding superseded comparison");
        }
        self.selection.accept(ticket, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Catalog;
    use crate::io::source::MemorySource;
    use crate::names::CountryNames;
    use crate::snapshot::SnapshotCache;

    fn loader() -> SeriesLoader<MemorySource> {
        let source = MemorySource::new()
            .with_csv(
                "minimum-wages",
                "geo,TIME_PERIOD,OBS_VALUE\n\
                 Spain,2015,756.7\nSpain,2016,764.4\n\
                 France,2015,1457.52\nFrance,2016,1466.62\n\
                 Italy,2019,1.0\n",
            )
            .with_csv(
                "hicp-annual-rate",
                "geo,coicop,TIME_PERIOD,OBS_VALUE\n\
                 Spain,All-items HICP,2016,-0.3\n\
                 France,All-items HICP,2016,0.3\n",
            );
        SeriesLoader::new(source, Catalog::default(), CountryNames::builtin())
    }

    #[test]
    fn parked_counterpart_runs_after_anchor() {
        let mut session = ComparisonSession::new(SnapshotBuilder::new(loader(), SnapshotCache::default()));
        assert_eq!(session.select_counterpart("Italy"), Dispatch::Deferred);
        assert_eq!(session.select_counterpart("Francia"), Dispatch::Deferred);

        let ticket = session.set_anchor("Spain").unwrap();
        assert_eq!(ticket.target(), "Francia");

        let cmp = session.complete(&ticket).unwrap();
        assert!(cmp.is_aligned());
        // Italy was superseded before it ever ran.
        assert!(session.builder().cache().get("ITA").is_none());
    }

    #[test]
    fn blank_anchor_keeps_counterpart_parked() {
        let mut session = ComparisonSession::new(SnapshotBuilder::new(loader(), SnapshotCache::default()));
        assert_eq!(session.select_counterpart("France"), Dispatch::Deferred);
        assert!(session.set_anchor(" ").is_none());
        let ticket = session.set_anchor("Spain").unwrap();
        assert_eq!(ticket.target(), "France");
    }

    #[test]
    fn stale_ticket_is_dropped() {
        let mut session = ComparisonSession::new(SnapshotBuilder::new(loader(), SnapshotCache::default()));
        assert!(session.set_anchor("Spain").is_none());
        let Dispatch::Run(first) = session.select_counterpart("France") else {
            panic!("expected run");
        };
        let Dispatch::Run(second) = session.select_counterpart("Italy") else {
            panic!("expected run");
        };
        assert!(session.complete(&first).is_none());
        let cmp = session.complete(&second).unwrap();
        assert!(!cmp.is_aligned());
    }

    #[test]
    fn real_wages_default_to_earliest_year_without_2012() {
        let run = run_real_wages(&loader(), "España", None).unwrap();
        assert_eq!(run.country, "ESP");
        assert!(run.rows.iter().all(|r| r.base_year == 2015));
        assert!((run.rows[1].real - 764.4 / 0.997).abs() < 1e-9);
    }

    #[test]
    fn variations_need_income_share() {
        let err = run_variations(&loader(), "Spain").unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
