//! Inflation compounding across year spans.
//!
//! Rates are percentages (`3.2` = 3.2%). Moving money across years multiplies
//! `1 + rate/100` for every year crossed; a year with no observed rate
//! contributes a factor of exactly 1. A span whose factor is zero or negative
//! (a rate of -100% or below) has no meaningful adjustment.

use tracing::warn;

use crate::domain::{CategorizedDataset, RealWageEntry, TimeSeries, WageSeries};
use crate::error::DataError;

/// Product of `1 + rate(y)/100` for `y` in `(from, to]`.
///
/// Returns `1.0` for empty spans (`to <= from`).
pub fn cumulative_factor(rates: &TimeSeries, from: i32, to: i32) -> f64 {
    rates
        .values()
        .iter()
        .filter(|p| p.year > from && p.year <= to)
        .fold(1.0, |acc, p| acc * (1.0 + p.value / 100.0))
}

/// Express `nominal`, observed in `year`, in `base_year` money.
///
/// - `year > base_year`: deflate forward, `nominal / Π(base_year, year]`
/// - `year < base_year`: inflate backward, `nominal * Π(year, base_year]`
///
/// Fails when `inflation` has no `Total` category or the span's factor is not positive.
pub fn adjust_to_base_year(
    nominal: f64,
    inflation: &CategorizedDataset,
    year: i32,
    base_year: i32,
) -> Result<f64, DataError> {
    let total = inflation.total()?;
    adjust_with_rates(nominal, total, year, base_year).ok_or(DataError::DegenerateFactor {
        from: year.min(base_year),
        to: year.max(base_year),
    })
}

/// `adjust_to_base_year` against an already-selected rate series.
///
/// `None` when the compounded factor is not positive or the result is not finite.
pub fn adjust_with_rates(nominal: f64, rates: &TimeSeries, year: i32, base_year: i32) -> Option<f64> {
    if year == base_year {
        return Some(nominal);
    }
    let (from, to) = (year.min(base_year), year.max(base_year));
    let factor = cumulative_factor(rates, from, to);
    if factor <= 0.0 {
        return None;
    }
    let adjusted = if year > base_year { nominal / factor } else { nominal * factor };
    adjusted.is_finite().then_some(adjusted)
}

/// Real value of every wage observation at `base_year`.
///
/// Years whose span to `base_year` has no meaningful adjustment are left out.
pub fn real_wage_series(
    wages: &WageSeries,
    inflation: &CategorizedDataset,
    base_year: i32,
) -> Result<Vec<RealWageEntry>, DataError> {
    let total = inflation.total()?;
    Ok(wages
        .iter()
        .filter_map(|p| {
            let Some(real) = adjust_with_rates(p.value, total, p.year, base_year) else {
                warn!(year = p.year, base_year, "skipping wage with non-positive inflation factor");
                return None;
            };
            Some(RealWageEntry {
                year: p.year,
                nominal: p.value,
                real,
                base_year,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::YearValue;

    fn inflation(points: &[(i32, f64)]) -> CategorizedDataset {
        CategorizedDataset::new([TimeSeries::new(
            "Total",
            points.iter().map(|&(y, v)| YearValue::new(y, v)),
        )])
    }

    #[test]
    fn identity_when_year_is_base() {
        let s = inflation(&[(2012, 2.4), (2013, 0.3)]);
        assert_eq!(adjust_to_base_year(500.0, &s, 2012, 2012).unwrap(), 500.0);
    }

    #[test]
    fn deflates_forward_with_missing_earlier_year() {
        // 2011 has no observation; it is outside the span anyway.
        let s = inflation(&[(2012, 2.4), (2013, 0.3)]);
        let real = adjust_to_base_year(500.0, &s, 2013, 2012).unwrap();
        assert!((real - 500.0 / 1.003).abs() < 1e-9);
        assert!((real - 498.50).abs() < 0.01);
    }

    #[test]
    fn inflates_backward() {
        let s = inflation(&[(2012, 2.4), (2013, 0.3), (2014, -0.2)]);
        let real = adjust_to_base_year(100.0, &s, 2011, 2013).unwrap();
        assert!((real - 100.0 * 1.024 * 1.003).abs() < 1e-9);
    }

    #[test]
    fn gap_year_is_a_no_op() {
        let with_gap = inflation(&[(2012, 2.0), (2014, 3.0)]);
        let f = cumulative_factor(with_gap.total().unwrap(), 2011, 2014);
        assert!((f - 1.02 * 1.03).abs() < 1e-12);
        assert_eq!(cumulative_factor(with_gap.total().unwrap(), 2012, 2013), 1.0);
    }

    #[test]
    fn compounding_is_multiplicative_not_additive() {
        let s = inflation(&[(2001, 10.0), (2002, 10.0)]);
        let real = adjust_to_base_year(121.0, &s, 2002, 2000).unwrap();
        assert!((real - 100.0).abs() < 1e-9);
    }

    #[test]
    fn missing_total_is_missing_aggregate() {
        let s = CategorizedDataset::new([TimeSeries::new("Food", [YearValue::new(2012, 1.0)])]);
        let err = adjust_to_base_year(1.0, &s, 2013, 2012).unwrap_err();
        assert!(matches!(err, DataError::MissingAggregate { .. }));
    }

    #[test]
    fn total_deflation_has_no_adjustment() {
        let s = inflation(&[(2013, -100.0), (2014, 1.0)]);
        let err = adjust_to_base_year(500.0, &s, 2014, 2012).unwrap_err();
        assert!(matches!(err, DataError::DegenerateFactor { from: 2012, to: 2014 }));
        assert!(adjust_to_base_year(500.0, &s, 2012, 2014).is_err());
        // Spans that avoid the collapsed year are unaffected.
        assert!((adjust_to_base_year(500.0, &s, 2014, 2013).unwrap() - 500.0 / 1.01).abs() < 1e-9);

        let wages = WageSeries::new([(2012, 500.0), (2013, 0.0), (2014, 510.0)]);
        let rows = real_wage_series(&wages, &s, 2013).unwrap();
        assert_eq!(rows.iter().map(|r| r.year).collect::<Vec<_>>(), vec![2013, 2014]);
        assert!(rows.iter().all(|r| r.real.is_finite()));
    }

    #[test]
    fn real_wage_series_uses_one_base_year() {
        let s = inflation(&[(2013, 1.0), (2014, 2.0)]);
        let wages = WageSeries::new([(2012, 100.0), (2014, 110.0)]);
        let rows = real_wage_series(&wages, &s, 2012).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.base_year == 2012));
        assert_eq!(rows[0].real, 100.0);
        assert!((rows[1].real - 110.0 / (1.01 * 1.02)).abs() < 1e-9);
    }
}
