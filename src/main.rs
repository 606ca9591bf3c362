use anyhow::Context;
use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing::{error, info};

use job_cleaner::config::Config;
use job_cleaner::metrics::{init_metrics, render_metrics};
use job_cleaner::table::RawTable;
use job_cleaner::{clean_job_data, logging};

#[derive(Parser)]
#[command(name = "job_cleaner")]
#[command(about = "Normalizes scraped job-listing tables into typed columns")]
#[command(version = "0.1.0")]
struct Cli {
    /// Configuration file (TOML). Falls back to $JOB_CLEANER_CONFIG, then defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean one table and write the result
    Clean {
        /// Input table (.csv or .json)
        #[arg(long)]
        input: PathBuf,
        /// Output table (.csv or .json)
        #[arg(long)]
        output: PathBuf,
        /// Dataset origin stamped onto every row
        #[arg(long)]
        source: Option<String>,
        /// Measure posting ages from this date (YYYY-MM-DD) instead of now
        #[arg(long)]
        reference_date: Option<NaiveDate>,
        /// Write Prometheus metrics for the run to this file
        #[arg(long)]
        metrics_out: Option<PathBuf>,
    },
    /// Print the effective configuration as TOML
    ShowConfig,
}

fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::load_or_default(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Commands::ShowConfig => {
            print!("{}", config.to_toml()?);
        }
        Commands::Clean {
            input,
            output,
            source,
            reference_date,
            metrics_out,
        } => {
            logging::init_logging(&config.logging.dir);
            if metrics_out.is_some() {
                init_metrics();
            }

            let source = source.unwrap_or_else(|| config.output.source.clone());
            let reference: NaiveDateTime = match reference_date {
                Some(day) => day.and_hms_opt(0, 0, 0).context("invalid reference date")?,
                None => Local::now().naive_local(),
            };
            info!(input = %input.display(), source = %source, "Starting cleaning run");

            let table = RawTable::load(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let (cleaned, mut result) = match clean_job_data(table, &source, &config, reference) {
                Ok(r) => r,
                Err(e) => {
                    error!("Cleaning failed: {}", e);
                    return Err(e.into());
                }
            };
            cleaned
                .write(&output)
                .with_context(|| format!("writing {}", output.display()))?;
            result.output_file = Some(output.display().to_string());

            println!("\n📊 Cleaning results for {}:", result.source);
            println!("   Rows: {}", result.total_rows);
            println!("   Output file: {}", output.display());
            if !result.fallbacks.is_empty() {
                println!("   Placeholders by column:");
                for (column, count) in &result.fallbacks {
                    println!("   - {}: {}", column, count);
                }
            }

            if let Some(path) = metrics_out {
                let text = render_metrics().unwrap_or_default();
                fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
                info!("Metrics written to {}", path.display());
            }
        }
    }
    Ok(())
}
