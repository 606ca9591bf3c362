use crate::types::RawField;

/// Listing sites cap the applicant counter at this value.
pub const ENTHUSIAST_CAP: i64 = 100;

/// Applicant count; `None` when the cell is not an integer.
pub fn clean_enthusiast(raw: &RawField) -> Option<i64> {
    match raw {
        RawField::Text(s) if s.contains(">100") => Some(ENTHUSIAST_CAP),
        RawField::Text(s) => s.trim().parse().ok(),
        RawField::Number(n) if n.is_finite() => Some(n.trunc() as i64),
        _ => None,
    }
}
