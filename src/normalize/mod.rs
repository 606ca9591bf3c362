//! Field-level normalization.
//!
//! Every function here maps one raw cell to one canonical value and never
//! fails: input that cannot be read becomes a sentinel. The row pipeline
//! decides how each sentinel is rendered in the output table.

pub mod normalizers;
pub mod rules;

pub use normalizers::*;
pub use rules::{Predicate, Rule, RuleChain};
