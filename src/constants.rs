/// Sentinel labels written into the cleaned table.
/// The two misspellings are part of the published output format.
pub const NEGOTIABLE: &str = "Negotiable";
pub const MAX_SALARY_UNSPECIFIED: &str = "Unspesicied";
pub const DEGREE_UNSPECIFIED: &str = "Unspesicified";
pub const UNSPECIFIED: &str = "Unspecified";
pub const UNKNOWN: &str = "Unknown";
pub const POSITION_OTHERS: &str = "others";

/// Reserved day count for postings whose age could not be determined.
pub const UNKNOWN_DAYS: i64 = -1;

/// Placeholder some sources use for an empty cell.
pub const PLACEHOLDER: &str = "-";

/// Default monthly hour/day counts used when converting pay periods.
pub const DEFAULT_WORK_HOURS: f64 = 173.0;
pub const DEFAULT_WORK_DAYS: f64 = 22.0;

// Canonical column names, after renaming
pub const COL_SALARY: &str = "Salary";
pub const COL_POSITION: &str = "Position";
pub const COL_ENTHUSIAST: &str = "Enthusiast";
pub const COL_DEGREE: &str = "Degree";
pub const COL_LOCATION: &str = "Location";
pub const COL_TYPE: &str = "type";
pub const COL_MIN_EXPERIENCE: &str = "min_experience";
pub const COL_MAX_EXPERIENCE: &str = "max_experience";
pub const COL_DAYS_UPLOAD: &str = "days_upload";
pub const COL_CATEGORY: &str = "Category";

// Derived columns
pub const COL_GENERAL_POSITION: &str = "general_position";
pub const COL_SOURCE: &str = "source";
pub const COL_NORMALIZE_CATEGORY: &str = "normalize_category";
pub const COL_MIN_SALARY: &str = "min_salary";
pub const COL_MAX_SALARY: &str = "max_salary";

/// Every column the row pipeline reads. Missing any of these is fatal.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    COL_SALARY,
    COL_POSITION,
    COL_ENTHUSIAST,
    COL_DEGREE,
    COL_LOCATION,
    COL_TYPE,
    COL_MIN_EXPERIENCE,
    COL_MAX_EXPERIENCE,
    COL_DAYS_UPLOAD,
    COL_CATEGORY,
];

/// Columns appended after the input's own columns, in output order.
pub const DERIVED_COLUMNS: [&str; 5] = [
    COL_GENERAL_POSITION,
    COL_SOURCE,
    COL_NORMALIZE_CATEGORY,
    COL_MIN_SALARY,
    COL_MAX_SALARY,
];
