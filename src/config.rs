use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::*;
use crate::error::{CleanerError, Result};
use crate::normalize::WorkSchedule;

pub const CONFIG_ENV: &str = "JOB_CLEANER_CONFIG";
pub const SOURCE_ENV: &str = "JOB_CLEANER_SOURCE";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub salary: WorkSchedule,
    pub columns: ColumnConfig,
    pub logging: LoggingConfig,
    pub output: OutputConfig,
}

/// Source column names as they appear in the scraped sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub salary: String,
    pub position: String,
    pub enthusiast: String,
    pub degree: String,
    pub location: String,
    pub work_type: String,
    pub min_experience: String,
    pub max_experience: String,
    pub days_upload: String,
    pub category: String,
    /// Bookkeeping columns removed before cleaning, when present.
    pub drop: Vec<String>,
    /// Leading data rows that hold sheet metadata rather than listings.
    pub skip_header_rows: usize,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            salary: COL_SALARY.to_string(),
            position: COL_POSITION.to_string(),
            enthusiast: COL_ENTHUSIAST.to_string(),
            degree: COL_DEGREE.to_string(),
            location: "Location ".to_string(),
            work_type: "WFH/ WFO/ Hybird".to_string(),
            min_experience: "length of work experience required (years)".to_string(),
            max_experience: "Unnamed: 6".to_string(),
            days_upload: "Upload By Company".to_string(),
            category: COL_CATEGORY.to_string(),
            drop: vec![
                "No".to_string(),
                "Information".to_string(),
                "Access Date".to_string(),
            ],
            skip_header_rows: 1,
        }
    }
}

impl ColumnConfig {
    /// `(source name, canonical name)` for every column the pipeline reads.
    pub fn renames(&self) -> Vec<(&str, &'static str)> {
        vec![
            (self.salary.as_str(), COL_SALARY),
            (self.position.as_str(), COL_POSITION),
            (self.enthusiast.as_str(), COL_ENTHUSIAST),
            (self.degree.as_str(), COL_DEGREE),
            (self.location.as_str(), COL_LOCATION),
            (self.work_type.as_str(), COL_TYPE),
            (self.min_experience.as_str(), COL_MIN_EXPERIENCE),
            (self.max_experience.as_str(), COL_MAX_EXPERIENCE),
            (self.days_upload.as_str(), COL_DAYS_UPLOAD),
            (self.category.as_str(), COL_CATEGORY),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("logs"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Stamped onto every row of the cleaned table.
    pub source: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            source: "unknown".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CleanerError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Explicit path first, then `JOB_CLEANER_CONFIG`, then built-in defaults.
    /// `JOB_CLEANER_SOURCE` overrides the source tag in every case.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var(CONFIG_ENV).ok().map(PathBuf::from);
        let mut config = match path.map(Path::to_path_buf).or(env_path) {
            Some(p) => {
                debug!("Loading configuration from {}", p.display());
                Self::load(&p)?
            }
            None => Self::default(),
        };

        if let Ok(source) = std::env::var(SOURCE_ENV) {
            if !source.trim().is_empty() {
                config.output.source = source;
            }
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.salary.work_hours > 0.0) {
            return Err(CleanerError::Config(format!(
                "salary.work_hours must be positive, got {}",
                self.salary.work_hours
            )));
        }
        if !(self.salary.work_days > 0.0) {
            return Err(CleanerError::Config(format!(
                "salary.work_days must be positive, got {}",
                self.salary.work_days
            )));
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CleanerError::Config(format!("Failed to render config: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.salary.work_hours, 173.0);
        assert_eq!(config.salary.work_days, 22.0);
        assert_eq!(config.columns.skip_header_rows, 1);
    }

    #[test]
    fn test_partial_override() {
        let config = Config::from_toml(
            r#"
            [salary]
            work_hours = 160

            [columns]
            location = "Lokasi"
            "#,
        )
        .unwrap();
        assert_eq!(config.salary.work_hours, 160.0);
        assert_eq!(config.salary.work_days, 22.0);
        assert_eq!(config.columns.location, "Lokasi");
        assert_eq!(config.columns.salary, "Salary");
    }

    #[test]
    fn test_non_positive_schedule_is_rejected() {
        let err = Config::from_toml("[salary]\nwork_days = 0").unwrap_err();
        assert!(matches!(err, CleanerError::Config(_)));
    }

    #[test]
    fn test_round_trips_through_toml() {
        let rendered = Config::default().to_toml().unwrap();
        assert_eq!(Config::from_toml(&rendered).unwrap(), Config::default());
    }

    #[test]
    fn test_renames_cover_every_required_column() {
        let columns = ColumnConfig::default();
        let canonical: Vec<&str> = columns.renames().into_iter().map(|(_, c)| c).collect();
        for required in REQUIRED_COLUMNS {
            assert!(canonical.contains(&required));
        }
    }
}
