use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{DurationDays, RawField};

const SECONDS_PER_DAY: i64 = 86_400;

static RELATIVE_AGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\s*(day|week|month)").expect("valid relative age regex"));

static PARENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[()]").expect("valid parens regex"));

/// Plural and misspelled unit words, applied in order.
const UNIT_SPELLINGS: [(&str, &str); 4] = [
    ("moths", "months"),
    ("weeks", "week"),
    ("days", "day"),
    ("months", "month"),
];

/// Parses a posting age into days before `reference`.
///
/// Accepts relative ages (`3 weeks ago`, `(2 months)`, `this day`) and
/// absolute dates such as `30-Agu-2025`. Dates after `reference` give a
/// negative count, which is returned as is.
pub fn clean_upload(raw: &RawField, reference: NaiveDateTime) -> DurationDays {
    if raw.is_null() {
        return None;
    }

    let s = raw.to_text_lossy().to_lowercase();
    let s = PARENS.replace_all(&s, "");
    let s = s.trim();

    if let Some(date) = parse_absolute_date(s) {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        return Some((reference - midnight).num_seconds().div_euclid(SECONDS_PER_DAY));
    }

    // hyphens only matter to the date format
    let mut s = s.replace('-', "").trim().to_string();

    if s.contains("this day") {
        return Some(0);
    }

    for (from, to) in UNIT_SPELLINGS {
        s = s.replace(from, to);
    }

    let caps = RELATIVE_AGE.captures(&s)?;
    let count: i64 = caps[1].parse().ok()?;
    let days = match &caps[2] {
        "day" => count,
        "week" => count.checked_mul(7)?,
        // calendar-approximate
        "month" => count.checked_mul(30)?,
        _ => return None,
    };
    Some(days)
}

/// `dd-Mon-yyyy` or `dd Mon yyyy`, with English or Indonesian month
/// abbreviations.
fn parse_absolute_date(s: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = s
        .split(|c: char| c == '-' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() != 3 {
        return None;
    }

    let month = localized_month(parts[1]);
    let normalized = format!("{}-{}-{}", parts[0], month, parts[2]);
    NaiveDate::parse_from_str(&normalized, "%d-%b-%Y").ok()
}

fn localized_month(abbrev: &str) -> &str {
    match abbrev {
        "mei" => "may",
        "agu" | "agt" | "agus" => "aug",
        "okt" => "oct",
        "des" => "dec",
        "peb" => "feb",
        "nop" => "nov",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, 30)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn upload(s: &str) -> DurationDays {
        clean_upload(&RawField::text(s), reference())
    }

    #[test]
    fn test_relative_ages() {
        assert_eq!(upload("this day"), Some(0));
        assert_eq!(upload("3 weeks ago"), Some(21));
        assert_eq!(upload("2 months"), Some(60));
        assert_eq!(upload("5 days ago"), Some(5));
        assert_eq!(upload("1 day ago"), Some(1));
    }

    #[test]
    fn test_parentheses_and_misspelling() {
        assert_eq!(upload("(2 weeks ago)"), Some(14));
        assert_eq!(upload("3 moths ago"), Some(90));
        assert_eq!(upload("  (This Day) "), Some(0));
    }

    #[test]
    fn test_absolute_dates() {
        assert_eq!(upload("30-Agu-2025"), Some(31));
        assert_eq!(upload("(30-Agu-2025)"), Some(31));
        assert_eq!(upload("29-Sep-2025"), Some(1));
        assert_eq!(upload("01 Okt 2024"), Some(364));
    }

    #[test]
    fn test_future_date_is_not_clamped() {
        assert_eq!(upload("05-Oct-2025"), Some(-5));
    }

    #[test]
    fn test_unparseable_is_none() {
        assert_eq!(clean_upload(&RawField::Null, reference()), None);
        assert_eq!(upload("yesterday"), None);
        assert_eq!(upload("ago 3 weeks"), None);
        assert_eq!(upload(""), None);
    }
}
