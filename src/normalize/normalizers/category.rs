use once_cell::sync::Lazy;
use std::fmt;

use crate::normalize::rules::{Predicate, RuleChain};
use crate::types::RawField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmploymentCategory {
    FullTime,
    PartTime,
    Contract,
    Intern,
    Freelance,
    Unspecified,
    Other,
}

impl EmploymentCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentCategory::FullTime => "Full-Time",
            EmploymentCategory::PartTime => "Part-time",
            EmploymentCategory::Contract => "Contract",
            EmploymentCategory::Intern => "Intern",
            EmploymentCategory::Freelance => "Freelance",
            EmploymentCategory::Unspecified => "Unspecified",
            EmploymentCategory::Other => "Other",
        }
    }
}

impl fmt::Display for EmploymentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub static CATEGORY_RULES: Lazy<RuleChain<EmploymentCategory>> = Lazy::new(|| {
    RuleChain::new()
        .rule(Predicate::AllOf(&["full", "time"]), EmploymentCategory::FullTime)
        .rule(Predicate::AllOf(&["part", "time"]), EmploymentCategory::PartTime)
        .rule(Predicate::Contains("contract"), EmploymentCategory::Contract)
        .rule(Predicate::Contains("intern"), EmploymentCategory::Intern)
        .rule(Predicate::Contains("freelance"), EmploymentCategory::Freelance)
        .rule(Predicate::Contains("unspecified"), EmploymentCategory::Unspecified)
});

/// Non-text cells are `Unspecified`; unmatched text is `Other`.
pub fn normalize_category(raw: &RawField) -> EmploymentCategory {
    let Some(text) = raw.as_text() else {
        return EmploymentCategory::Unspecified;
    };
    let s = text.trim().to_lowercase();
    CATEGORY_RULES.classify(&s).unwrap_or(EmploymentCategory::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(s: &str) -> &'static str {
        normalize_category(&RawField::text(s)).as_str()
    }

    #[test]
    fn test_ordered_rules() {
        assert_eq!(category("Full Time"), "Full-Time");
        assert_eq!(category("Full-time contract"), "Full-Time");
        assert_eq!(category("part time"), "Part-time");
        assert_eq!(category("Kontrak / Contract"), "Contract");
        assert_eq!(category("Internship"), "Intern");
        assert_eq!(category("Freelance"), "Freelance");
    }

    #[test]
    fn test_full_without_time_is_other() {
        assert_eq!(category("Full"), "Other");
        assert_eq!(category("Permanent"), "Other");
    }

    #[test]
    fn test_non_text_is_unspecified() {
        assert_eq!(normalize_category(&RawField::Null), EmploymentCategory::Unspecified);
        assert_eq!(normalize_category(&RawField::Number(1.0)), EmploymentCategory::Unspecified);
    }

    #[test]
    fn test_canonical_labels_are_fixed_points() {
        for c in CATEGORY_RULES.labels() {
            assert_eq!(category(c.as_str()), c.as_str());
        }
        assert_eq!(category("Other"), "Other");
    }
}
