use thiserror::Error;

/// Structural failures. Field-level parse problems never surface here;
/// they are absorbed into per-column sentinels by the normalizers.
#[derive(Error, Debug)]
pub enum CleanerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Unsupported table format: {0}")]
    UnsupportedFormat(String),

    #[error("Table has no data rows after skipping {skipped} header row(s)")]
    EmptyTable { skipped: usize },
}

pub type Result<T> = std::result::Result<T, CleanerError>;
