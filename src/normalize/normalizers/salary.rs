use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_WORK_DAYS, DEFAULT_WORK_HOURS, PLACEHOLDER};
use crate::types::{NormalizedSalary, ParsedSalary, RawField, SalaryParse, SalaryUnit};

/// UTF-8 en dash decoded as cp1252, as found in scraped salary ranges.
const MOJIBAKE_DASH: &str = "â€“";
const EN_DASH: char = '–';

/// Pay-period markers removed before the numbers are read.
static PERIOD_MARKERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(per.?jam|/hour|bulan|/bulan|/m|/)").expect("valid period regex"));

/// Dot-grouped thousands such as `5.000.000` or `750.000`.
static GROUPED_THOUSANDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,3}(\.\d{3})+$").expect("valid grouping regex"));

/// Standard monthly working hours and days used to convert pay periods.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkSchedule {
    pub work_hours: f64,
    pub work_days: f64,
}

impl Default for WorkSchedule {
    fn default() -> Self {
        Self {
            work_hours: DEFAULT_WORK_HOURS,
            work_days: DEFAULT_WORK_DAYS,
        }
    }
}

/// Parses a raw salary expression such as `Rp 5.000.000/bulan`,
/// `3m-5m` or `50k per jam` into a range and pay period.
///
/// Anything that does not yield at least one number, or yields a token
/// that is not a number, is `Negotiable`.
pub fn clean_salary(raw: &RawField) -> SalaryParse {
    let Some(text) = raw.as_text() else {
        return SalaryParse::Negotiable;
    };
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == PLACEHOLDER {
        return SalaryParse::Negotiable;
    }

    let mut s = text
        .to_lowercase()
        .replace(MOJIBAKE_DASH, "-")
        .replace(EN_DASH, "-")
        .replace("rp", "");
    s.retain(|c| !c.is_whitespace());

    let unit = detect_unit(&s);

    let s = PERIOD_MARKERS.replace_all(&s, "").replace(',', ".");
    let s: String = s.chars().filter(|c| is_amount_char(*c)).collect();

    let tokens: Vec<&str> = s.split('-').filter(|t| !t.trim().is_empty()).collect();
    if tokens.is_empty() {
        return SalaryParse::Negotiable;
    }

    let mut amounts = Vec::with_capacity(tokens.len());
    for token in tokens {
        match parse_amount(token) {
            Some(v) => amounts.push(v),
            None => return SalaryParse::Negotiable,
        }
    }

    let min = amounts.iter().copied().fold(f64::INFINITY, f64::min);
    let max = amounts.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    SalaryParse::Range(ParsedSalary { min, max, unit })
}

fn detect_unit(s: &str) -> SalaryUnit {
    if s.contains("hour") || s.contains("jam") {
        SalaryUnit::Hourly
    } else {
        // "bulan" and unmarked salaries are both monthly
        SalaryUnit::Monthly
    }
}

/// Digits, dot, range hyphen and the letters of the multiplier suffixes.
/// Filtering is per character, so a stray `m` or `u` from an unrelated
/// word survives and later spoils the token.
fn is_amount_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '-' | 'k' | 'm' | 'r' | 'i' | 'b' | 'u')
}

fn parse_amount(token: &str) -> Option<f64> {
    let (digits, factor) = if token.contains('k') {
        (token.replace('k', ""), 1_000.0)
    } else if token.contains('m') {
        (token.replace('m', ""), 1_000_000.0)
    } else if token.contains("ribu") {
        (token.replace("ribu", ""), 1_000.0)
    } else if GROUPED_THOUSANDS.is_match(token) {
        (token.replace('.', ""), 1.0)
    } else {
        (token.to_string(), 1.0)
    };
    // the multiplier can overflow an otherwise finite number
    digits
        .parse::<f64>()
        .ok()
        .map(|v| v * factor)
        .filter(|v| v.is_finite())
}

/// Converts a parsed salary to monthly-equivalent bounds.
pub fn normalize_salary(parsed: &SalaryParse, schedule: &WorkSchedule) -> NormalizedSalary {
    let Some(range) = parsed.range() else {
        return NormalizedSalary::MISSING;
    };

    let factor = match range.unit {
        SalaryUnit::Hourly => schedule.work_hours,
        SalaryUnit::Daily => schedule.work_days,
        SalaryUnit::Monthly => 1.0,
    };

    NormalizedSalary {
        min_salary: Some(range.min * factor),
        max_salary: Some(range.max * factor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> SalaryParse {
        clean_salary(&RawField::text(s))
    }

    fn range(min: f64, max: f64, unit: SalaryUnit) -> SalaryParse {
        SalaryParse::Range(ParsedSalary { min, max, unit })
    }

    #[test]
    fn test_single_value_with_month_marker() {
        assert_eq!(
            parse("Rp 5.000.000/bulan"),
            range(5_000_000.0, 5_000_000.0, SalaryUnit::Monthly)
        );
    }

    #[test]
    fn test_million_suffix_range() {
        assert_eq!(
            parse("3m-5m"),
            range(3_000_000.0, 5_000_000.0, SalaryUnit::Monthly)
        );
    }

    #[test]
    fn test_thousand_suffix_range_with_mojibake_dash() {
        assert_eq!(
            parse("Rp 8k â€“ 12k"),
            range(8_000.0, 12_000.0, SalaryUnit::Monthly)
        );
    }

    #[test]
    fn test_hourly_detected_from_local_word() {
        assert_eq!(
            parse("Rp 50.000 per jam"),
            range(50_000.0, 50_000.0, SalaryUnit::Hourly)
        );
        assert_eq!(parse("$20/hour"), range(20.0, 20.0, SalaryUnit::Hourly));
    }

    #[test]
    fn test_ribu_suffix() {
        assert_eq!(
            parse("750 ribu"),
            range(750_000.0, 750_000.0, SalaryUnit::Monthly)
        );
    }

    #[test]
    fn test_decimal_comma_with_suffix() {
        assert_eq!(
            parse("7,5m"),
            range(7_500_000.0, 7_500_000.0, SalaryUnit::Monthly)
        );
    }

    #[test]
    fn test_reversed_range_is_ordered() {
        assert_eq!(
            parse("9000000 - 6000000"),
            range(6_000_000.0, 9_000_000.0, SalaryUnit::Monthly)
        );
    }

    #[test]
    fn test_amount_overflowing_after_multiplier_is_negotiable() {
        let huge = format!("{}m", "9".repeat(308));
        assert_eq!(parse(&huge), SalaryParse::Negotiable);
    }

    #[test]
    fn test_missing_and_placeholder_are_negotiable() {
        assert_eq!(clean_salary(&RawField::Null), SalaryParse::Negotiable);
        assert_eq!(parse("-"), SalaryParse::Negotiable);
        assert_eq!(parse("  - "), SalaryParse::Negotiable);
        assert_eq!(parse("   "), SalaryParse::Negotiable);
        assert_eq!(clean_salary(&RawField::Number(5.0)), SalaryParse::Negotiable);
    }

    #[test]
    fn test_words_without_numbers_are_negotiable() {
        assert_eq!(parse("Negotiable"), SalaryParse::Negotiable);
        assert_eq!(parse("Competitive"), SalaryParse::Negotiable);
    }

    #[test]
    fn test_unparseable_token_spoils_whole_field() {
        // "rb" survives the character filter and is not a known suffix
        assert_eq!(parse("5rb"), SalaryParse::Negotiable);
    }

    #[test]
    fn test_normalize_hourly() {
        let schedule = WorkSchedule::default();
        let n = normalize_salary(&range(10.0, 20.0, SalaryUnit::Hourly), &schedule);
        assert_eq!(n.min_salary, Some(1730.0));
        assert_eq!(n.max_salary, Some(3460.0));
    }

    #[test]
    fn test_normalize_daily_and_monthly() {
        let schedule = WorkSchedule::default();
        let daily = normalize_salary(&range(100.0, 200.0, SalaryUnit::Daily), &schedule);
        assert_eq!(daily.min_salary, Some(2200.0));
        assert_eq!(daily.max_salary, Some(4400.0));

        let monthly = normalize_salary(&range(1.0, 2.0, SalaryUnit::Monthly), &schedule);
        assert_eq!(monthly.min_salary, Some(1.0));
        assert_eq!(monthly.max_salary, Some(2.0));
    }

    #[test]
    fn test_normalize_negotiable_is_missing() {
        let n = normalize_salary(&SalaryParse::Negotiable, &WorkSchedule::default());
        assert_eq!(n, NormalizedSalary::MISSING);
    }
}
