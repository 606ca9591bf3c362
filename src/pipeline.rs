use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, info, info_span};

use crate::config::Config;
use crate::constants::*;
use crate::error::{CleanerError, Result};
use crate::metrics::CleanerMetrics;
use crate::normalize::*;
use crate::table::{CleanedTable, RawTable};
use crate::types::{Cell, Field, RawField};

/// Summary of one cleaning run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    pub source: String,
    pub total_rows: usize,
    /// Cells that received a placeholder instead of a parsed value, per column
    pub fallbacks: BTreeMap<&'static str, usize>,
    pub output_file: Option<String>,
}

impl PipelineResult {
    pub fn fallbacks_for(&self, column: &str) -> usize {
        self.fallbacks.get(column).copied().unwrap_or(0)
    }
}

/// Positions of the columns the pipeline reads.
#[derive(Debug, Clone, Copy)]
struct ColumnIndexes {
    salary: usize,
    position: usize,
    enthusiast: usize,
    degree: usize,
    location: usize,
    work_type: usize,
    min_experience: usize,
    max_experience: usize,
    days_upload: usize,
    category: usize,
}

impl ColumnIndexes {
    fn resolve(table: &RawTable) -> Result<Self> {
        let idx = |name: &str| {
            table
                .column_index(name)
                .ok_or_else(|| CleanerError::MissingColumn(name.to_string()))
        };
        Ok(Self {
            salary: idx(COL_SALARY)?,
            position: idx(COL_POSITION)?,
            enthusiast: idx(COL_ENTHUSIAST)?,
            degree: idx(COL_DEGREE)?,
            location: idx(COL_LOCATION)?,
            work_type: idx(COL_TYPE)?,
            min_experience: idx(COL_MIN_EXPERIENCE)?,
            max_experience: idx(COL_MAX_EXPERIENCE)?,
            days_upload: idx(COL_DAYS_UPLOAD)?,
            category: idx(COL_CATEGORY)?,
        })
    }
}

#[derive(Debug, Default)]
struct FallbackTally {
    counts: BTreeMap<&'static str, usize>,
}

impl FallbackTally {
    fn check(&mut self, column: &'static str, fell_back: bool) {
        if fell_back {
            *self.counts.entry(column).or_default() += 1;
            CleanerMetrics::record_fallback(column);
        }
    }
}

/// Applies every field normalizer to its column. Rows are independent.
#[derive(Debug, Clone)]
pub struct RowPipeline {
    schedule: WorkSchedule,
    source: String,
    reference: NaiveDateTime,
}

impl RowPipeline {
    /// `reference` is the moment posting ages are measured from.
    pub fn new(
        schedule: WorkSchedule,
        source: impl Into<String>,
        reference: NaiveDateTime,
    ) -> Self {
        Self {
            schedule,
            source: source.into(),
            reference,
        }
    }

    pub fn from_config(config: &Config, reference: NaiveDateTime) -> Self {
        Self::new(config.salary, config.output.source.clone(), reference)
    }

    /// Cleans a prepared table (canonical column names, metadata rows removed).
    pub fn run(&self, table: &RawTable) -> Result<(CleanedTable, PipelineResult)> {
        let span = info_span!("clean_job_data", source = %self.source);
        let _enter = span.enter();
        let started = Instant::now();

        let idx = ColumnIndexes::resolve(table)?;
        let mut tally = FallbackTally::default();

        let rows: Vec<Vec<Cell>> = table
            .rows
            .iter()
            .map(|row| self.clean_row(row, &idx, &mut tally))
            .collect();

        let mut headers = table.headers.clone();
        headers.extend(DERIVED_COLUMNS.iter().map(|c| c.to_string()));

        for (column, count) in &tally.counts {
            debug!("{}: {} placeholder(s)", column, count);
        }
        let elapsed = started.elapsed().as_secs_f64();
        CleanerMetrics::record_run(&self.source, rows.len(), elapsed);
        info!("Cleaned {} rows in {:.3}s", rows.len(), elapsed);

        let result = PipelineResult {
            source: self.source.clone(),
            total_rows: rows.len(),
            fallbacks: tally.counts,
            output_file: None,
        };
        Ok((CleanedTable { headers, rows }, result))
    }

    fn clean_row(
        &self,
        row: &[RawField],
        idx: &ColumnIndexes,
        tally: &mut FallbackTally,
    ) -> Vec<Cell> {
        let mut out: Vec<Cell> = row.iter().map(Cell::from).collect();

        let salary = clean_salary(&row[idx.salary]);
        let normalized = normalize_salary(&salary, &self.schedule);
        let salary_field = Field::from_option(salary.range().copied(), NEGOTIABLE);
        tally.check(COL_SALARY, salary_field.is_sentinel());
        out[idx.salary] = salary_field.into();

        let days = clean_upload(&row[idx.days_upload], self.reference);
        tally.check(COL_DAYS_UPLOAD, days.is_none());
        out[idx.days_upload] = Cell::Int(days.unwrap_or(UNKNOWN_DAYS));

        let enthusiast = Field::from_option(clean_enthusiast(&row[idx.enthusiast]), UNKNOWN);
        tally.check(COL_ENTHUSIAST, enthusiast.is_sentinel());
        out[idx.enthusiast] = enthusiast.into();

        let degree = clean_degree(&row[idx.degree]).map(|d| d.as_str().to_string());
        let degree = Field::from_option(degree, DEGREE_UNSPECIFIED);
        tally.check(COL_DEGREE, degree.is_sentinel());
        out[idx.degree] = degree.into();

        let location = clean_location(&row[idx.location]);
        tally.check(COL_LOCATION, location == Province::Others);
        out[idx.location] = Cell::Text(location.as_str().to_string());

        let work_type = clean_type(&row[idx.work_type]);
        tally.check(COL_TYPE, work_type == WorkArrangement::Unspecified);
        out[idx.work_type] = Cell::Text(work_type.as_str().to_string());

        let min_experience = clean_experience(&row[idx.min_experience]);
        tally.check(COL_MIN_EXPERIENCE, min_experience == Experience::Unspecified);
        out[idx.min_experience] = Cell::Text(min_experience.to_string());

        let max_experience = present_text(&row[idx.max_experience]);
        tally.check(COL_MAX_EXPERIENCE, max_experience.is_none());
        out[idx.max_experience] =
            Cell::Text(max_experience.unwrap_or_else(|| UNSPECIFIED.to_string()));

        let category = present_text(&row[idx.category]);
        tally.check(COL_CATEGORY, category.is_none());
        out[idx.category] = Cell::Text(category.unwrap_or_else(|| UNSPECIFIED.to_string()));

        // Derived columns, in DERIVED_COLUMNS order
        let position = map_position(&row[idx.position]);
        tally.check(COL_GENERAL_POSITION, position == PositionFamily::Others);
        out.push(Cell::Text(position.as_str().to_string()));

        out.push(Cell::Text(self.source.clone()));

        let employment = normalize_category(&row[idx.category]);
        tally.check(COL_NORMALIZE_CATEGORY, employment == EmploymentCategory::Unspecified);
        out.push(Cell::Text(employment.as_str().to_string()));

        let min_salary = Field::from_option(normalized.min_salary, NEGOTIABLE);
        tally.check(COL_MIN_SALARY, min_salary.is_sentinel());
        out.push(min_salary.into());

        let max_salary = Field::from_option(normalized.max_salary, MAX_SALARY_UNSPECIFIED);
        tally.check(COL_MAX_SALARY, max_salary.is_sentinel());
        out.push(max_salary.into());

        out
    }
}

/// Trimmed text of a non-empty cell.
fn present_text(raw: &RawField) -> Option<String> {
    let text = raw.to_text_lossy();
    let trimmed = text.trim();
    (!raw.is_null() && !trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Prepares `table` per `config`, then cleans it with `source` stamped on
/// every row.
pub fn clean_job_data(
    mut table: RawTable,
    source: &str,
    config: &Config,
    reference: NaiveDateTime,
) -> Result<(CleanedTable, PipelineResult)> {
    table.prepare(&config.columns)?;
    RowPipeline::new(config.salary, source, reference).run(&table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn reference() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, 30)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn canonical_table(row: Vec<RawField>) -> RawTable {
        RawTable::new(
            REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
            vec![row],
        )
    }

    fn text(s: &str) -> RawField {
        RawField::text(s)
    }

    #[test]
    fn test_sentinels_for_empty_row() {
        let table = canonical_table(vec![RawField::Null; REQUIRED_COLUMNS.len()]);
        let pipeline = RowPipeline::new(WorkSchedule::default(), "glints", reference());
        let (cleaned, result) = pipeline.run(&table).unwrap();

        let cell = |c: &str| cleaned.cell(0, c).unwrap().clone();
        let label = |s: &str| Cell::Text(s.to_string());
        assert_eq!(cell(COL_SALARY), label("Negotiable"));
        assert_eq!(cell(COL_MIN_SALARY), label("Negotiable"));
        assert_eq!(cell(COL_MAX_SALARY), label("Unspesicied"));
        assert_eq!(cell(COL_DAYS_UPLOAD), Cell::Int(-1));
        assert_eq!(cell(COL_GENERAL_POSITION), label("others"));
        assert_eq!(cell(COL_ENTHUSIAST), label("Unknown"));
        assert_eq!(cell(COL_DEGREE), label("Unspesicified"));
        assert_eq!(cell(COL_LOCATION), label("Others"));
        assert_eq!(cell(COL_TYPE), label("Unspecified"));
        assert_eq!(cell(COL_MIN_EXPERIENCE), label("Unspecified"));
        assert_eq!(cell(COL_MAX_EXPERIENCE), label("Unspecified"));
        assert_eq!(cell(COL_CATEGORY), label("Unspecified"));
        assert_eq!(cell(COL_NORMALIZE_CATEGORY), label("Unspecified"));
        assert_eq!(cell(COL_SOURCE), label("glints"));

        assert_eq!(result.total_rows, 1);
        assert_eq!(result.fallbacks_for(COL_SALARY), 1);
        assert_eq!(result.fallbacks_for(COL_MAX_SALARY), 1);
    }

    #[test]
    fn test_populated_row() {
        // REQUIRED_COLUMNS order: Salary, Position, Enthusiast, Degree, Location,
        // type, min_experience, max_experience, days_upload, Category
        let table = canonical_table(vec![
            text("Rp 50.000 per jam"),
            text("Senior AI/ML Engineer"),
            text("42"),
            text("Bachelorâ€™s or Masterâ€™s"),
            text("Tangerang"),
            text("Hybird"),
            text("2"),
            text(" 5 "),
            text("(3 weeks ago)"),
            text("Full Time"),
        ]);
        let pipeline = RowPipeline::new(WorkSchedule::default(), "jobstreet", reference());
        let (cleaned, result) = pipeline.run(&table).unwrap();

        let cell = |c: &str| cleaned.cell(0, c).unwrap().clone();
        assert_eq!(cell(COL_MIN_SALARY), Cell::Float(50_000.0 * 173.0));
        assert_eq!(cell(COL_MAX_SALARY), Cell::Float(50_000.0 * 173.0));
        assert_eq!(cell(COL_DAYS_UPLOAD), Cell::Int(21));
        assert_eq!(cell(COL_GENERAL_POSITION), Cell::Text("AI Engineer".into()));
        assert_eq!(cell(COL_POSITION), Cell::Text("Senior AI/ML Engineer".into()));
        assert_eq!(cell(COL_ENTHUSIAST), Cell::Int(42));
        assert_eq!(cell(COL_DEGREE), Cell::Text("Bachelor or Master".into()));
        assert_eq!(cell(COL_LOCATION), Cell::Text("Banten".into()));
        assert_eq!(cell(COL_TYPE), Cell::Text("Hybrid".into()));
        assert_eq!(cell(COL_MIN_EXPERIENCE), Cell::Text("2 years".into()));
        assert_eq!(cell(COL_MAX_EXPERIENCE), Cell::Text("5".into()));
        assert_eq!(cell(COL_CATEGORY), Cell::Text("Full Time".into()));
        assert_eq!(cell(COL_NORMALIZE_CATEGORY), Cell::Text("Full-Time".into()));
        assert!(result.fallbacks.is_empty());
    }

    #[test]
    fn test_derived_columns_are_appended_in_order() {
        let table = canonical_table(vec![RawField::Null; REQUIRED_COLUMNS.len()]);
        let pipeline = RowPipeline::new(WorkSchedule::default(), "x", reference());
        let (cleaned, _) = pipeline.run(&table).unwrap();
        assert_eq!(
            &cleaned.headers[REQUIRED_COLUMNS.len()..],
            &DERIVED_COLUMNS.map(String::from)[..]
        );
        assert_eq!(cleaned.rows[0].len(), cleaned.headers.len());
    }

    #[test]
    fn test_unprepared_table_is_rejected() {
        let table = RawTable::new(vec!["Salary".to_string()], vec![vec![text("5k")]]);
        let pipeline = RowPipeline::new(WorkSchedule::default(), "x", reference());
        assert!(matches!(
            pipeline.run(&table),
            Err(CleanerError::MissingColumn(_))
        ));
    }
}
