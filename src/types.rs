use serde::{Deserialize, Serialize};
use std::fmt;

/// An untyped cell as it comes out of the table loader.
#[derive(Debug, Clone, PartialEq)]
pub enum RawField {
    Null,
    Number(f64),
    Text(String),
}

impl RawField {
    pub fn text(s: impl Into<String>) -> Self {
        RawField::Text(s.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, RawField::Null)
    }

    /// Only genuine string cells; numbers and nulls yield `None`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawField::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Coerces any cell to text. Null becomes the empty string.
    pub fn to_text_lossy(&self) -> String {
        match self {
            RawField::Null => String::new(),
            RawField::Number(n) => n.to_string(),
            RawField::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for RawField {
    fn from(s: &str) -> Self {
        RawField::Text(s.to_string())
    }
}

impl From<Option<&str>> for RawField {
    fn from(s: Option<&str>) -> Self {
        s.map(RawField::from).unwrap_or(RawField::Null)
    }
}

impl From<f64> for RawField {
    fn from(n: f64) -> Self {
        RawField::Number(n)
    }
}

impl From<serde_json::Value> for RawField {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => RawField::Null,
            Value::Number(n) => n.as_f64().map(RawField::Number).unwrap_or(RawField::Null),
            Value::String(s) => RawField::Text(s),
            Value::Bool(b) => RawField::Text(b.to_string()),
            other => RawField::Text(other.to_string()),
        }
    }
}

/// Pay period detected from the salary text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalaryUnit {
    Hourly,
    /// Never produced by the parser; accepted by the normalizer for
    /// salaries built by other callers.
    Daily,
    Monthly,
}

/// A numeric salary range. `min <= max` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParsedSalary {
    pub min: f64,
    pub max: f64,
    pub unit: SalaryUnit,
}

impl ParsedSalary {
    /// Builds a range from any two bounds, ordering them.
    pub fn new(a: f64, b: f64, unit: SalaryUnit) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
            unit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SalaryParse {
    Negotiable,
    Range(ParsedSalary),
}

impl SalaryParse {
    pub fn range(&self) -> Option<&ParsedSalary> {
        match self {
            SalaryParse::Range(r) => Some(r),
            SalaryParse::Negotiable => None,
        }
    }
}

/// Monthly-equivalent bounds. `None` marks a salary that could not be
/// expressed numerically; the row pipeline replaces it with a label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedSalary {
    pub min_salary: Option<f64>,
    pub max_salary: Option<f64>,
}

impl NormalizedSalary {
    pub const MISSING: NormalizedSalary = NormalizedSalary {
        min_salary: None,
        max_salary: None,
    };
}

/// Days since posting; `None` when the age could not be determined.
pub type DurationDays = Option<i64>;

/// A per-column value: either real data or a named placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Value(T),
    Sentinel(&'static str),
}

impl<T> Field<T> {
    pub fn from_option(value: Option<T>, sentinel: &'static str) -> Self {
        match value {
            Some(v) => Field::Value(v),
            None => Field::Sentinel(sentinel),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self, Field::Sentinel(_))
    }
}

/// A cell of the cleaned table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Empty,
    Int(i64),
    Float(f64),
    Text(String),
    Salary(ParsedSalary),
}

impl Cell {
    /// Flat text used for CSV output.
    pub fn to_csv_field(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Int(i) => i.to_string(),
            Cell::Float(f) => f.to_string(),
            Cell::Text(s) => s.clone(),
            Cell::Salary(s) => serde_json::to_string(s).unwrap_or_default(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&RawField> for Cell {
    fn from(raw: &RawField) -> Self {
        match raw {
            RawField::Null => Cell::Empty,
            RawField::Number(n) => Cell::Float(*n),
            RawField::Text(s) => Cell::Text(s.clone()),
        }
    }
}

impl From<Field<f64>> for Cell {
    fn from(field: Field<f64>) -> Self {
        match field {
            Field::Value(v) => Cell::Float(v),
            Field::Sentinel(s) => Cell::Text(s.to_string()),
        }
    }
}

impl From<Field<i64>> for Cell {
    fn from(field: Field<i64>) -> Self {
        match field {
            Field::Value(v) => Cell::Int(v),
            Field::Sentinel(s) => Cell::Text(s.to_string()),
        }
    }
}

impl From<Field<String>> for Cell {
    fn from(field: Field<String>) -> Self {
        match field {
            Field::Value(v) => Cell::Text(v),
            Field::Sentinel(s) => Cell::Text(s.to_string()),
        }
    }
}

impl From<Field<ParsedSalary>> for Cell {
    fn from(field: Field<ParsedSalary>) -> Self {
        match field {
            Field::Value(v) => Cell::Salary(v),
            Field::Sentinel(s) => Cell::Text(s.to_string()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_csv_field())
    }
}
