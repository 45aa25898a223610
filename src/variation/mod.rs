//! Year-over-year variations of income share and inflation.
//!
//! Variations are only defined between adjacent years. A gap in either series
//! yields an absent variation rather than a delta bridged across the gap.

use crate::domain::{CategorizedDataset, TimeSeries, VariationRow};

/// Combine an income-share series with the `Total` inflation series.
///
/// One row per year observed in both. Empty if `inflation` has no `Total`.
pub fn combine_variations(income: &TimeSeries, inflation: &CategorizedDataset) -> Vec<VariationRow> {
    let Ok(rates) = inflation.total() else {
        return Vec::new();
    };

    let mut rows = Vec::new();
    let mut previous_income = None;

    for point in income.values() {
        let prior = previous_income.replace(*point);
        let Some(inflation_rate) = rates.value_at(point.year) else {
            continue;
        };

        let income_variation = prior
            .filter(|p| p.year == point.year - 1)
            .map(|p| point.value - p.value);
        let inflation_variation = rates
            .value_at(point.year - 1)
            .map(|prev| inflation_rate - prev);

        rows.push(VariationRow {
            year: point.year,
            income_share: point.value,
            inflation_rate,
            income_variation,
            inflation_variation,
        });
    }

    rows
}
