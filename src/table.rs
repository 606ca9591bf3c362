use serde_json::{Map, Value};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::ColumnConfig;
use crate::constants::REQUIRED_COLUMNS;
use crate::error::{CleanerError, Result};
use crate::types::{Cell, RawField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Json,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("csv") => Ok(TableFormat::Csv),
            Some("json") => Ok(TableFormat::Json),
            _ => Err(CleanerError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// The scraped sheet, as loaded. Every row has one cell per header.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<RawField>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<RawField>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut r| {
                r.resize(width, RawField::Null);
                r
            })
            .collect();
        Self { headers, rows }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let format = TableFormat::from_path(path)?;
        info!("Loading {:?} table from {}", format, path.display());
        match format {
            TableFormat::Csv => Self::from_csv_reader(File::open(path)?),
            TableFormat::Json => Self::from_json_str(&fs::read_to_string(path)?),
        }
    }

    /// Empty cells load as nulls. Header whitespace is significant.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::None)
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let row = record
                .iter()
                .map(|cell| {
                    if cell.is_empty() {
                        RawField::Null
                    } else {
                        RawField::text(cell)
                    }
                })
                .collect();
            rows.push(row);
        }

        debug!("Read {} CSV rows with {} columns", rows.len(), headers.len());
        Ok(Self::new(headers, rows))
    }

    /// A JSON array of row objects; columns in first-seen order.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let records: Vec<Map<String, Value>> = serde_json::from_str(content)?;

        let mut headers: Vec<String> = Vec::new();
        for record in &records {
            for key in record.keys() {
                if !headers.contains(key) {
                    headers.push(key.clone());
                }
            }
        }

        let rows = records
            .into_iter()
            .map(|mut record| {
                headers
                    .iter()
                    .map(|h| record.remove(h).map(RawField::from).unwrap_or(RawField::Null))
                    .collect()
            })
            .collect();

        Ok(Self::new(headers, rows))
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Skips sheet metadata rows, drops bookkeeping columns and renames the
    /// configured source columns to their canonical names. Fails before any
    /// row is touched if a required column is absent.
    pub fn prepare(&mut self, columns: &ColumnConfig) -> Result<()> {
        let skip = columns.skip_header_rows.min(self.rows.len());
        self.rows.drain(..skip);
        if self.rows.is_empty() {
            return Err(CleanerError::EmptyTable {
                skipped: columns.skip_header_rows,
            });
        }

        for name in &columns.drop {
            if let Some(idx) = self.column_index(name) {
                self.headers.remove(idx);
                for row in &mut self.rows {
                    row.remove(idx);
                }
            }
        }

        for (source, canonical) in columns.renames() {
            if source == canonical {
                continue;
            }
            let Some(idx) = self.column_index(source) else {
                continue;
            };
            if self.column_index(canonical).is_some() {
                warn!(
                    "Both '{}' and '{}' present; keeping the existing '{}'",
                    source, canonical, canonical
                );
                continue;
            }
            self.headers[idx] = canonical.to_string();
        }

        for required in REQUIRED_COLUMNS {
            if self.column_index(required).is_none() {
                return Err(CleanerError::MissingColumn(required.to_string()));
            }
        }
        Ok(())
    }
}

/// The output table. Input columns keep their position; derived columns
/// are appended.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl CleanedTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        match TableFormat::from_path(path)? {
            TableFormat::Csv => self.write_csv(File::create(path)?),
            TableFormat::Json => {
                let mut file = File::create(path)?;
                serde_json::to_writer_pretty(&mut file, &self.to_json())?;
                file.write_all(b"\n")?;
                Ok(())
            }
        }?;
        info!("Wrote {} rows to {}", self.rows.len(), path.display());
        Ok(())
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row.iter().map(Cell::to_csv_field))?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn to_json(&self) -> Value {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let object: Map<String, Value> = self
                    .headers
                    .iter()
                    .zip(row)
                    .map(|(h, c)| (h.clone(), serde_json::to_value(c).unwrap_or(Value::Null)))
                    .collect();
                Value::Object(object)
            })
            .collect();
        Value::Array(rows)
    }
}
