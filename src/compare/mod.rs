//! Cross-country alignment.
//!
//! Each country's snapshot expresses its real wage against its own base year,
//! so two snapshots are not on the same scale. Alignment picks one year both
//! wage histories observed and re-runs the compounding for both countries at
//! that year, which makes the resulting indices directly comparable.

use std::collections::BTreeSet;

use tracing::debug;

use crate::domain::{AlignedPair, BasedMetrics, Comparison, ComparisonSnapshot};
use crate::math::adjust_to_base_year;

/// Shared base year preferred when both histories contain it.
///
/// This is a presentation policy rather than a property of the data; any
/// shared year gives a valid alignment.
pub const PREFERRED_SHARED_BASE_YEAR: i32 = 2020;

/// Years observed in both wage histories.
pub fn shared_years(a: &ComparisonSnapshot, b: &ComparisonSnapshot) -> BTreeSet<i32> {
    let years_b: BTreeSet<i32> = b.wage_history.years().collect();
    a.wage_history.years().filter(|y| years_b.contains(y)).collect()
}

/// `PREFERRED_SHARED_BASE_YEAR` if shared, else the smallest shared year.
pub fn choose_shared_base_year(shared: &BTreeSet<i32>) -> Option<i32> {
    if shared.contains(&PREFERRED_SHARED_BASE_YEAR) {
        Some(PREFERRED_SHARED_BASE_YEAR)
    } else {
        shared.first().copied()
    }
}

/// Metrics for `snapshot` with its latest wage re-based at `base_year`.
///
/// `None` when the country has no nominal wage at `base_year`, no latest wage,
/// or no usable inflation aggregate.
pub fn metrics_at(snapshot: &ComparisonSnapshot, base_year: i32) -> Option<BasedMetrics> {
    let base_nominal = snapshot.wage_history.get(base_year)?;
    let latest = snapshot.wage?;
    let inflation = snapshot.inflation_data.as_ref()?;
    let real = adjust_to_base_year(latest.value, inflation, latest.year, base_year).ok()?;
    if base_nominal == 0.0 {
        return None;
    }

    Some(BasedMetrics {
        base_year,
        base_nominal,
        latest_year: latest.year,
        latest_nominal: latest.value,
        real,
        index: real / base_nominal * 100.0,
    })
}

/// Re-base both countries at a shared year.
///
/// `None` when the histories share no year, or when either country cannot be
/// re-based at the chosen year.
pub fn align_pair(a: &ComparisonSnapshot, b: &ComparisonSnapshot) -> Option<AlignedPair> {
    let shared = shared_years(a, b);
    let Some(shared_base_year) = choose_shared_base_year(&shared) else {
        debug!(a = %a.country, b = %b.country, "no shared wage year");
        return None;
    };

    let metrics_a = metrics_at(a, shared_base_year)?;
    let metrics_b = metrics_at(b, shared_base_year)?;

    Some(AlignedPair {
        shared_base_year,
        metrics_a,
        metrics_b,
    })
}

/// Compare two countries, falling back to each one's own base when alignment fails.
pub fn compare(a: &ComparisonSnapshot, b: &ComparisonSnapshot) -> Comparison {
    match align_pair(a, b) {
        Some(pair) => Comparison::Aligned {
            country_a: a.country.clone(),
            country_b: b.country.clone(),
            pair,
        },
        None => Comparison::Unaligned {
            country_a: a.country.clone(),
            country_b: b.country.clone(),
            metrics_a: a.base_year.and_then(|y| metrics_at(a, y)),
            metrics_b: b.base_year.and_then(|y| metrics_at(b, y)),
        },
    }
}
