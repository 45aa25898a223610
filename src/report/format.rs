//! Plain-text terminal output.
//!
//! Formatting lives here so the engines stay free of presentation and output
//! changes stay localized.

use std::fmt::Write;

use crate::domain::{BasedMetrics, CategorizedDataset, Comparison, ComparisonSnapshot, RealWageEntry, VariationRow};
use crate::io::ingest::GroupedData;

/// Summary of a grouped resource: ingest counts plus one line per category.
pub fn format_dataset(resource: &str, grouped: &GroupedData) -> String {
    let mut out = String::new();
    let ds = &grouped.dataset;

    let _ = writeln!(out, "=== {resource} ===");
    let _ = writeln!(
        out,
        "Rows: read={} | used={} | filtered={} | dropped={}",
        grouped.rows_read,
        grouped.rows_used,
        grouped.rows_filtered,
        grouped.row_errors.len()
    );

    if ds.is_empty() {
        out.push_str("No data for this selection.\n");
        return out;
    }

    let _ = writeln!(out, "Years: {}", year_span(ds));
    for category in ds.categories() {
        let latest = category
            .latest()
            .map(|p| format!("{} = {:.2}", p.year, p.value))
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(out, "  {:<32} n={:<4} latest: {latest}", category.name, category.len());
    }

    out
}

/// Real-wage table for one country.
pub fn format_real_wages(country: &str, rows: &[RealWageEntry]) -> String {
    let mut out = String::new();
    let Some(first) = rows.first() else {
        let _ = writeln!(out, "{country}: no wage observations.");
        return out;
    };

    let _ = writeln!(out, "=== {country}: real wages (base {}) ===", first.base_year);
    let _ = writeln!(out, "{:>6}  {:>12}  {:>12}", "year", "nominal", "real");
    for r in rows {
        let _ = writeln!(out, "{:>6}  {:>12.2}  {:>12.2}", r.year, r.nominal, r.real);
    }
    out
}

pub fn format_snapshot(s: &ComparisonSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== {} ({}) ===", s.display_name, s.country);
    let _ = writeln!(
        out,
        "Inflation: {}",
        s.inflation
            .map(|r| format!("{:.2}% ({})", r.value, r.year))
            .unwrap_or_else(|| "n/a".to_string())
    );
    let _ = writeln!(
        out,
        "Wage:      {}",
        s.wage
            .map(|r| format!("{:.2} ({})", r.value, r.year))
            .unwrap_or_else(|| "n/a".to_string())
    );
    let _ = writeln!(out, "Base year: {}", fmt_opt_year(s.base_year));
    let _ = writeln!(out, "Real wage: {}", fmt_opt(s.real_wage));
    let _ = writeln!(out, "Index:     {}", fmt_opt(s.index));
    out
}

pub fn format_comparison(cmp: &Comparison) -> String {
    let mut out = String::new();
    match cmp {
        Comparison::Aligned {
            country_a,
            country_b,
            pair,
        } => {
            let _ = writeln!(
                out,
                "=== {country_a} vs {country_b} (aligned at {}) ===",
                pair.shared_base_year
            );
            push_metrics(&mut out, country_a, Some(&pair.metrics_a));
            push_metrics(&mut out, country_b, Some(&pair.metrics_b));
            let _ = writeln!(
                out,
                "Index gap: {:+.2} pts",
                pair.metrics_a.index - pair.metrics_b.index
            );
        }
        Comparison::Unaligned {
            country_a,
            country_b,
            metrics_a,
            metrics_b,
        } => {
            let _ = writeln!(out, "=== {country_a} vs {country_b} (NOT aligned: own base years) ===");
            push_metrics(&mut out, country_a, metrics_a.as_ref());
            push_metrics(&mut out, country_b, metrics_b.as_ref());
        }
    }
    out
}

pub fn format_variations(country: &str, rows: &[VariationRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== {country}: income share vs inflation ===");
    if rows.is_empty() {
        out.push_str("No overlapping years.\n");
        return out;
    }
    let _ = writeln!(
        out,
        "{:>6}  {:>8}  {:>8}  {:>8}  {:>8}",
        "year", "share", "Δshare", "infl", "Δinfl"
    );
    for r in rows {
        let _ = writeln!(
            out,
            "{:>6}  {:>8.2}  {:>8}  {:>8.2}  {:>8}",
            r.year,
            r.income_share,
            fmt_delta(r.income_variation),
            r.inflation_rate,
            fmt_delta(r.inflation_variation)
        );
    }
    out
}

fn push_metrics(out: &mut String, country: &str, metrics: Option<&BasedMetrics>) {
    match metrics {
        Some(m) => {
            let _ = writeln!(
                out,
                "  {country:<6} base {} = {:.2} | latest {} = {:.2} | real {:.2} | index {:.1}",
                m.base_year, m.base_nominal, m.latest_year, m.latest_nominal, m.real, m.index
            );
        }
        None => {
            let _ = writeln!(out, "  {country:<6} n/a");
        }
    }
}

fn year_span(ds: &CategorizedDataset) -> String {
    match (ds.years().first(), ds.years().last()) {
        (Some(a), Some(b)) => format!("{a}..{b} ({} distinct)", ds.years().len()),
        _ => "-".to_string(),
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.2}"),
        _ => "n/a".to_string(),
    }
}

fn fmt_opt_year(value: Option<i32>) -> String {
    value.map(|y| y.to_string()).unwrap_or_else(|| "n/a".to_string())
}

fn fmt_delta(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:+.2}"),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AlignedPair, BasedMetrics};

    fn metrics(index: f64) -> BasedMetrics {
        BasedMetrics {
            base_year: 2015,
            base_nominal: 100.0,
            latest_year: 2020,
            latest_nominal: 120.0,
            real: index,
            index,
        }
    }

    #[test]
    fn unaligned_comparison_is_labelled() {
        let cmp = Comparison::Unaligned {
            country_a: "ESP".to_string(),
            country_b: "FRA".to_string(),
            metrics_a: Some(metrics(105.0)),
            metrics_b: None,
        };
        let text = format_comparison(&cmp);
        assert!(text.contains("NOT aligned"));
        assert!(text.contains("FRA    n/a"));
    }

    #[test]
    fn aligned_comparison_shows_gap() {
        let cmp = Comparison::Aligned {
            country_a: "ESP".to_string(),
            country_b: "FRA".to_string(),
            pair: AlignedPair {
                shared_base_year: 2015,
                metrics_a: metrics(110.0),
                metrics_b: metrics(104.5),
            },
        };
        let text = format_comparison(&cmp);
        assert!(text.contains("aligned at 2015"));
        assert!(text.contains("Index gap: +5.50 pts"));
    }
}
