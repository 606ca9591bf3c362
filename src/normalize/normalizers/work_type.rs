use once_cell::sync::Lazy;
use std::fmt;

use crate::normalize::rules::{Predicate, RuleChain};
use crate::types::RawField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkArrangement {
    Wfo,
    Wfh,
    Hybrid,
    Unspecified,
}

impl WorkArrangement {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkArrangement::Wfo => "WFO",
            WorkArrangement::Wfh => "WFH",
            WorkArrangement::Hybrid => "Hybrid",
            WorkArrangement::Unspecified => "Unspecified",
        }
    }
}

impl fmt::Display for WorkArrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub static WORK_TYPE_RULES: Lazy<RuleChain<WorkArrangement>> = Lazy::new(|| {
    RuleChain::new()
        .rule(Predicate::Contains("wfo"), WorkArrangement::Wfo)
        .rule(Predicate::Contains("wfh"), WorkArrangement::Wfh)
        // also catches the "Hybird" spelling
        .rule(Predicate::Contains("hy"), WorkArrangement::Hybrid)
});

pub fn clean_type(raw: &RawField) -> WorkArrangement {
    let Some(text) = raw.as_text() else {
        return WorkArrangement::Unspecified;
    };
    let s = text.trim().to_lowercase();
    WORK_TYPE_RULES.classify(&s).unwrap_or(WorkArrangement::Unspecified)
}
