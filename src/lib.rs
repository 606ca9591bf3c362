//! Cleaning pipeline for scraped job-listing tables.
//!
//! Field normalizers live in [`normalize`]; [`pipeline`] applies them
//! column by column and [`table`] handles loading and writing.

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod normalize;
pub mod pipeline;
pub mod table;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{CleanerError, Result};
pub use pipeline::{clean_job_data, PipelineResult, RowPipeline};
pub use table::{CleanedTable, RawTable};
