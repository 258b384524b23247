//! Salary parsing: extracts an annualized USD range from structured min/max fields or,
//! failing that, from the free-text salary string.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::jobs::record::JobSignals;

/// 40 hours × 52 weeks.
pub const HOURS_PER_YEAR: f64 = 2080.0;

static HOURLY_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/ ?h|hour").expect("hourly marker pattern must compile"));

/// A run of digits with `,`/`.` separators, optionally followed by a `k` multiplier.
static SALARY_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9][0-9,.]*)\s*(k)?").expect("salary token pattern must compile")
});

/// Annual salary bounds. When both are known, `min <= max`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SalaryRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl SalaryRange {
    /// A single figure used as both bounds.
    pub fn fixed(value: f64) -> Self {
        Self {
            min: Some(value),
            max: Some(value),
        }
    }

    /// Builds a range, swapping the bounds if they arrive out of order.
    pub fn ordered(min: Option<f64>, max: Option<f64>) -> Self {
        match (min, max) {
            (Some(lo), Some(hi)) if lo > hi => Self {
                min: Some(hi),
                max: Some(lo),
            },
            _ => Self { min, max },
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Structured numeric fields win whenever either is present; free text is the fallback.
pub fn annual_salary_range(signals: &JobSignals) -> SalaryRange {
    if signals.min_salary.is_some() || signals.max_salary.is_some() {
        return SalaryRange::ordered(signals.min_salary, signals.max_salary);
    }
    match signals.salary_text.as_deref() {
        Some(text) if !text.trim().is_empty() => parse_salary_text(text),
        _ => SalaryRange::default(),
    }
}

/// Parses free salary text such as `"$50k - $70k"` or `"$25/hour"`.
///
/// Only the first two numbers count. Hourly figures are annualized with `HOURS_PER_YEAR`.
pub fn parse_salary_text(text: &str) -> SalaryRange {
    let normalized = text.replace('\u{00A0}', " ").to_lowercase();
    let hourly = HOURLY_MARKER.is_match(&normalized);
    let annualize = |value: f64| if hourly { value * HOURS_PER_YEAR } else { value };

    let amounts: Vec<f64> = SALARY_TOKEN
        .captures_iter(&normalized)
        .filter_map(|caps| {
            let base = leading_decimal(&caps[1].replace(',', ""))?;
            let value = if caps.get(2).is_some() { base * 1000.0 } else { base };
            value.is_finite().then_some(value)
        })
        .take(2)
        .collect();

    match amounts.as_slice() {
        [] => SalaryRange::default(),
        [only] => SalaryRange::fixed(annualize(*only)),
        [first, second, ..] => SalaryRange {
            min: Some(annualize(first.min(*second))),
            max: Some(annualize(first.max(*second))),
        },
    }
}

/// Parses the longest leading decimal of a digits-and-dots token (`"1.5.3"` → 1.5).
fn leading_decimal(token: &str) -> Option<f64> {
    let mut parts = token.splitn(3, '.');
    let whole = parts.next().unwrap_or_default();
    let number = match parts.next() {
        Some(fraction) if !fraction.is_empty() => format!("{whole}.{fraction}"),
        _ => whole.to_string(),
    };
    number.parse().ok()
}

/// Interval overlap with one-sided substitution: a missing job bound takes the value of
/// the other. A job with neither bound never overlaps anything.
pub fn range_overlaps(min: Option<f64>, max: Option<f64>, band_min: f64, band_max: f64) -> bool {
    let (low, high) = match (min, max) {
        (None, None) => return false,
        (Some(lo), None) => (lo, lo),
        (None, Some(hi)) => (hi, hi),
        (Some(lo), Some(hi)) => (lo, hi),
    };
    low <= band_max && high >= band_min
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(salary: &str) -> JobSignals {
        JobSignals {
            salary_text: Some(salary.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_k_range() {
        assert_eq!(
            parse_salary_text("$50k - $70k"),
            SalaryRange {
                min: Some(50_000.0),
                max: Some(70_000.0)
            }
        );
    }

    #[test]
    fn test_hourly_single_figure_is_annualized() {
        assert_eq!(parse_salary_text("$25/hour"), SalaryRange::fixed(52_000.0));
        assert_eq!(parse_salary_text("$30 / hr"), SalaryRange::fixed(62_400.0));
        assert_eq!(parse_salary_text("40/h"), SalaryRange::fixed(83_200.0));
    }

    #[test]
    fn test_hourly_range_is_annualized() {
        assert_eq!(
            parse_salary_text("$20 - $30 per hour"),
            SalaryRange {
                min: Some(41_600.0),
                max: Some(62_400.0)
            }
        );
    }

    #[test]
    fn test_no_numbers_is_unknown() {
        assert!(parse_salary_text("negotiable").is_unknown());
        assert!(parse_salary_text("Competitive").is_unknown());
    }

    #[test]
    fn test_thousands_separators_and_decimals() {
        assert_eq!(
            parse_salary_text("$120,000.00 - $150,000.00 a year"),
            SalaryRange {
                min: Some(120_000.0),
                max: Some(150_000.0)
            }
        );
        assert_eq!(parse_salary_text("1.5.3"), SalaryRange::fixed(1.5));
    }

    #[test]
    fn test_reversed_range_is_reordered() {
        assert_eq!(
            parse_salary_text("up to $90k, from $60k"),
            SalaryRange {
                min: Some(60_000.0),
                max: Some(90_000.0)
            }
        );
    }

    #[test]
    fn test_only_first_two_numbers_count() {
        assert_eq!(
            parse_salary_text("$80k - $100k plus 401k and $5k bonus"),
            SalaryRange {
                min: Some(80_000.0),
                max: Some(100_000.0)
            }
        );
    }

    #[test]
    fn test_non_breaking_space_and_uppercase_k() {
        assert_eq!(parse_salary_text("$95\u{00A0}K"), SalaryRange::fixed(95_000.0));
    }

    #[test]
    fn test_structured_fields_preferred_over_text() {
        let s = JobSignals {
            min_salary: Some(70_000.0),
            max_salary: Some(90_000.0),
            salary_text: Some("$10k".to_string()),
            ..Default::default()
        };
        assert_eq!(
            annual_salary_range(&s),
            SalaryRange {
                min: Some(70_000.0),
                max: Some(90_000.0)
            }
        );
    }

    #[test]
    fn test_structured_bounds_independently_optional() {
        let s = JobSignals {
            max_salary: Some(90_000.0),
            salary_text: Some("$10k".to_string()),
            ..Default::default()
        };
        assert_eq!(
            annual_salary_range(&s),
            SalaryRange {
                min: None,
                max: Some(90_000.0)
            }
        );
    }

    #[test]
    fn test_structured_bounds_out_of_order_are_swapped() {
        let s = JobSignals {
            min_salary: Some(120_000.0),
            max_salary: Some(80_000.0),
            ..Default::default()
        };
        assert_eq!(
            annual_salary_range(&s),
            SalaryRange {
                min: Some(80_000.0),
                max: Some(120_000.0)
            }
        );
    }

    #[test]
    fn test_blank_or_missing_text_is_unknown() {
        assert!(annual_salary_range(&text("   ")).is_unknown());
        assert!(annual_salary_range(&JobSignals::default()).is_unknown());
    }

    #[test]
    fn test_range_overlaps() {
        assert!(range_overlaps(Some(40_000.0), Some(60_000.0), 50_000.0, 100_000.0));
        assert!(!range_overlaps(Some(10_000.0), Some(20_000.0), 50_000.0, 100_000.0));
        assert!(range_overlaps(Some(50_000.0), Some(50_000.0), 0.0, 50_000.0));
    }

    #[test]
    fn test_range_overlaps_substitutes_missing_bound() {
        assert!(range_overlaps(None, Some(75_000.0), 50_000.0, 100_000.0));
        assert!(range_overlaps(Some(75_000.0), None, 50_000.0, 100_000.0));
        assert!(!range_overlaps(Some(120_000.0), None, 50_000.0, 100_000.0));
        assert!(!range_overlaps(None, None, 0.0, f64::MAX));
    }
}
