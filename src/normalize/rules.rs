//! Ordered keyword rules.
//!
//! Categorical columns are classified by substring checks where earlier
//! rules shadow later ones: a degree mentioning both "bachelor" and
//! "master" must hit the combined rule before the single-degree rules.

/// A case-sensitive substring test against already lower-cased text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    Contains(&'static str),
    /// Every needle must be present.
    AllOf(&'static [&'static str]),
    /// At least one needle must be present.
    AnyOf(&'static [&'static str]),
}

impl Predicate {
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Predicate::Contains(needle) => text.contains(needle),
            Predicate::AllOf(needles) => needles.iter().all(|n| text.contains(n)),
            Predicate::AnyOf(needles) => needles.iter().any(|n| text.contains(n)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Rule<L> {
    pub predicate: Predicate,
    pub label: L,
}

/// First matching rule wins.
#[derive(Debug, Clone)]
pub struct RuleChain<L> {
    rules: Vec<Rule<L>>,
}

impl<L: Copy> RuleChain<L> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn rule(mut self, predicate: Predicate, label: L) -> Self {
        self.rules.push(Rule { predicate, label });
        self
    }

    /// Evaluates the chain against lower-cased text.
    pub fn classify(&self, text: &str) -> Option<L> {
        self.rules
            .iter()
            .find(|r| r.predicate.matches(text))
            .map(|r| r.label)
    }

    /// Labels in evaluation order.
    pub fn labels(&self) -> Vec<L> {
        self.rules.iter().map(|r| r.label).collect()
    }
}

impl<L: Copy> Default for RuleChain<L> {
    fn default() -> Self {
        Self::new()
    }
}
