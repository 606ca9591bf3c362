use once_cell::sync::Lazy;
use std::fmt;

use crate::constants::PLACEHOLDER;
use crate::normalize::rules::{Predicate, RuleChain};
use crate::types::RawField;

/// cp1252-decoded right single quote, as in "Bachelorâ€™s".
const MOJIBAKE_APOSTROPHE: &str = "â€™";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegreeLevel {
    Diploma,
    Bachelor,
    BachelorOrMaster,
    Master,
    MasterOrPhd,
    Phd,
}

impl DegreeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DegreeLevel::Diploma => "Diploma",
            DegreeLevel::Bachelor => "Bachelor",
            DegreeLevel::BachelorOrMaster => "Bachelor or Master",
            DegreeLevel::Master => "Master",
            DegreeLevel::MasterOrPhd => "Master or PhD",
            DegreeLevel::Phd => "PhD",
        }
    }
}

impl fmt::Display for DegreeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Combined requirements are checked before any single degree.
pub static DEGREE_RULES: Lazy<RuleChain<DegreeLevel>> = Lazy::new(|| {
    RuleChain::new()
        .rule(Predicate::AllOf(&["bachelor", "master"]), DegreeLevel::BachelorOrMaster)
        .rule(Predicate::AllOf(&["master", "phd"]), DegreeLevel::MasterOrPhd)
        .rule(Predicate::Contains("diploma"), DegreeLevel::Diploma)
        .rule(Predicate::Contains("bachelor"), DegreeLevel::Bachelor)
        .rule(Predicate::Contains("master"), DegreeLevel::Master)
        .rule(Predicate::Contains("phd"), DegreeLevel::Phd)
});

/// Minimum degree requirement; `None` when missing or unrecognized.
pub fn clean_degree(raw: &RawField) -> Option<DegreeLevel> {
    let text = match raw {
        RawField::Null => return None,
        other => other.to_text_lossy(),
    };
    let s = text.trim();
    if s == PLACEHOLDER {
        return None;
    }

    let s = s.to_lowercase().replace(MOJIBAKE_APOSTROPHE, "'");
    DEGREE_RULES.classify(&s)
}
