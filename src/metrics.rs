//! Run metrics for the cleaning pipeline
//!
//! Counters are recorded through the `metrics` facade. Nothing is kept
//! unless `init_metrics` installed the in-process Prometheus recorder, which
//! the CLI does when asked to write a metrics file.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use tracing::{info, warn};

pub const ROWS_PROCESSED: &str = "job_cleaner_rows_processed_total";
pub const FALLBACKS: &str = "job_cleaner_fallbacks_total";
pub const RUN_DURATION: &str = "job_cleaner_run_duration_seconds";

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Installs the global recorder. Idempotent.
pub fn init_metrics() {
    if HANDLE.get().is_some() {
        return;
    }
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            if HANDLE.set(handle).is_ok() {
                CleanerMetrics::register_metrics();
                info!("Prometheus recorder installed");
            }
        }
        Err(e) => warn!("Failed to install Prometheus recorder: {}", e),
    }
}

/// Prometheus text exposition of everything recorded so far.
pub fn render_metrics() -> Option<String> {
    HANDLE.get().map(|h| h.render())
}

pub struct CleanerMetrics;

impl CleanerMetrics {
    /// A cell of `column` fell back to its placeholder.
    pub fn record_fallback(column: &'static str) {
        ::metrics::counter!(FALLBACKS, "column" => column).increment(1);
    }

    pub fn record_run(source: &str, rows: usize, duration_secs: f64) {
        ::metrics::counter!(ROWS_PROCESSED, "source" => source.to_string())
            .increment(rows as u64);
        ::metrics::histogram!(RUN_DURATION).record(duration_secs);
    }

    fn register_metrics() {
        ::metrics::describe_counter!(ROWS_PROCESSED, "Rows passed through the cleaning pipeline");
        ::metrics::describe_counter!(FALLBACKS, "Cells replaced by a placeholder, by column");
        ::metrics::describe_histogram!(RUN_DURATION, "Wall time of one cleaning run");
    }
}
