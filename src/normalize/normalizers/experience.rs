use std::fmt;

use crate::constants::UNSPECIFIED;
use crate::types::RawField;

/// Required experience, bucketed. Unknown formats are kept verbatim
/// rather than forced into a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Experience {
    Unspecified,
    FreshGraduate,
    Years(i64),
    Verbatim(String),
}

impl fmt::Display for Experience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Experience::Unspecified => f.write_str(UNSPECIFIED),
            Experience::FreshGraduate => f.write_str("Fresh Graduate"),
            Experience::Years(n) => write!(f, "{} years", n),
            Experience::Verbatim(s) => f.write_str(s),
        }
    }
}

/// Any "0" in the text reads as fresh graduate, so "10" lands there too.
const FRESH_MARKERS: [&str; 3] = ["fresh", "<1", "0"];

/// Numeric cells are read as they print, so `4.0` is `4 years` rather than
/// a text `"4.0"` caught by the `0` marker.
pub fn clean_experience(raw: &RawField) -> Experience {
    if raw.is_null() {
        return Experience::Unspecified;
    }

    let s = raw.to_text_lossy().trim().to_lowercase();

    if FRESH_MARKERS.iter().any(|m| s.contains(m)) {
        return Experience::FreshGraduate;
    }

    match s.parse::<f64>() {
        Ok(n) if n.is_finite() && n < 1.0 => Experience::FreshGraduate,
        Ok(n) if n.is_finite() => Experience::Years(n.trunc() as i64),
        _ => Experience::Verbatim(s),
    }
}
