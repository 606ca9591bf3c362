use once_cell::sync::Lazy;
use std::fmt;

use crate::constants::POSITION_OTHERS;
use crate::normalize::rules::{Predicate, RuleChain};
use crate::types::RawField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionFamily {
    AiEngineer,
    MlEngineer,
    Others,
}

impl PositionFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            PositionFamily::AiEngineer => "AI Engineer",
            PositionFamily::MlEngineer => "ML Engineer",
            PositionFamily::Others => POSITION_OTHERS,
        }
    }
}

impl fmt::Display for PositionFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The AI rule precedes the ML rule, so "AI/ML Engineer" is an AI role.
pub static POSITION_RULES: Lazy<RuleChain<PositionFamily>> = Lazy::new(|| {
    RuleChain::new()
        .rule(Predicate::Contains("ai"), PositionFamily::AiEngineer)
        .rule(
            Predicate::AnyOf(&["ml", "machine learning"]),
            PositionFamily::MlEngineer,
        )
});

pub fn map_position(raw: &RawField) -> PositionFamily {
    let s = raw.to_text_lossy().to_lowercase();
    POSITION_RULES.classify(&s).unwrap_or(PositionFamily::Others)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(s: &str) -> &'static str {
        map_position(&RawField::text(s)).as_str()
    }

    #[test]
    fn test_ai_check_precedes_ml_check() {
        assert_eq!(position("Senior AI/ML Engineer"), "AI Engineer");
        assert_eq!(
            POSITION_RULES.labels(),
            vec![PositionFamily::AiEngineer, PositionFamily::MlEngineer]
        );
    }

    #[test]
    fn test_ml_titles() {
        assert_eq!(position("Machine Learning Engineer"), "ML Engineer");
        assert_eq!(position("MLOps Specialist"), "ML Engineer");
    }

    #[test]
    fn test_everything_else_is_others() {
        assert_eq!(position("Backend Developer"), "others");
        assert_eq!(map_position(&RawField::Null).as_str(), "others");
    }

    #[test]
    fn test_canonical_labels_are_fixed_points() {
        assert_eq!(position("AI Engineer"), "AI Engineer");
        assert_eq!(position("ML Engineer"), "ML Engineer");
        assert_eq!(position("others"), "others");
    }
}
