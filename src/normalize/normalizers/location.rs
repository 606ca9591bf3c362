use once_cell::sync::Lazy;
use std::fmt;

use crate::normalize::rules::{Predicate, RuleChain};
use crate::types::RawField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Province {
    Jakarta,
    JawaBarat,
    Banten,
    JawaTimur,
    Diy,
    IndonesiaUnspecified,
    Others,
}

impl Province {
    pub fn as_str(&self) -> &'static str {
        match self {
            Province::Jakarta => "Jakarta",
            Province::JawaBarat => "Jawa Barat",
            Province::Banten => "Banten",
            Province::JawaTimur => "Jawa Timur",
            Province::Diy => "DIY",
            Province::IndonesiaUnspecified => "Indonesia (unspecified)",
            Province::Others => "Others",
        }
    }
}

impl fmt::Display for Province {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Known regions first; a bare country mention only when no region matched.
/// "jawa timur" sits beside "surabaya" so the label maps back onto itself.
pub static LOCATION_RULES: Lazy<RuleChain<Province>> = Lazy::new(|| {
    RuleChain::new()
        .rule(Predicate::AnyOf(&["jakarta", "dki"]), Province::Jakarta)
        .rule(Predicate::Contains("jawa barat"), Province::JawaBarat)
        .rule(Predicate::AnyOf(&["banten", "tangerang"]), Province::Banten)
        .rule(Predicate::AnyOf(&["surabaya", "jawa timur"]), Province::JawaTimur)
        .rule(Predicate::AnyOf(&["diy", "yogyakarta"]), Province::Diy)
        .rule(Predicate::Contains("indonesia"), Province::IndonesiaUnspecified)
});

/// Total: every cell, including nulls and numbers, maps to a province.
pub fn clean_location(raw: &RawField) -> Province {
    let s = raw.to_text_lossy().to_lowercase();
    LOCATION_RULES.classify(&s).unwrap_or(Province::Others)
}
