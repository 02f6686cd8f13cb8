//! CSV Data Loader Module
//! Loads the launch record CSV into an immutable in-memory table using Polars.

use polars::prelude::*;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

pub const LAUNCH_SITE_COL: &str = "Launch Site";
pub const PAYLOAD_MASS_COL: &str = "Payload Mass (kg)";
pub const CLASS_COL: &str = "class";
pub const BOOSTER_CATEGORY_COL: &str = "Booster Version Category";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("Missing value in column '{column}' at row {row}")]
    MissingValue { column: &'static str, row: usize },
    #[error("Invalid outcome class {value} at row {row}, expected 0 or 1")]
    InvalidOutcome { value: f64, row: usize },
    #[error("Invalid payload mass {value} at row {row}")]
    InvalidPayload { value: f64, row: usize },
    #[error("No data loaded")]
    NoData,
}

/// Binary launch outcome, stored as `class` 0/1 in the CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    pub fn from_class(value: f64) -> Option<Self> {
        if value == 0.0 {
            Some(Outcome::Failure)
        } else if value == 1.0 {
            Some(Outcome::Success)
        } else {
            None
        }
    }

    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Failure => "Failure",
            Outcome::Success => "Success",
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

/// One launch attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchRecord {
    pub launch_site: String,
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_version_category: String,
}

/// Read-only launch table. Clones share the same rows.
#[derive(Debug, Clone)]
pub struct LaunchTable {
    records: Arc<[LaunchRecord]>,
}

impl LaunchTable {
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load the launch CSV and convert it into typed records.
    pub fn load_csv(file_path: &Path) -> Result<LaunchTable, LoaderError> {
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;

        info!(
            "Read {} rows, {} columns from {}",
            df.height(),
            df.width(),
            file_path.display()
        );

        let table = Self::from_dataframe(&df)?;
        if table.is_empty() {
            return Err(LoaderError::NoData);
        }
        Ok(table)
    }

    /// Extract the four launch columns from a DataFrame.
    pub fn from_dataframe(df: &DataFrame) -> Result<LaunchTable, LoaderError> {
        let sites = Self::string_column(df, LAUNCH_SITE_COL)?;
        let payloads = Self::float_column(df, PAYLOAD_MASS_COL)?;
        let classes = Self::float_column(df, CLASS_COL)?;
        let boosters = Self::string_column(df, BOOSTER_CATEGORY_COL)?;

        let mut records = Vec::with_capacity(df.height());
        for (row, (((site, payload), class), booster)) in sites
            .into_iter()
            .zip(payloads)
            .zip(classes)
            .zip(boosters)
            .enumerate()
        {
            if !payload.is_finite() || payload < 0.0 {
                return Err(LoaderError::InvalidPayload {
                    value: payload,
                    row,
                });
            }
            let outcome = Outcome::from_class(class)
                .ok_or(LoaderError::InvalidOutcome { value: class, row })?;

            records.push(LaunchRecord {
                launch_site: site,
                payload_mass_kg: payload,
                outcome,
                booster_version_category: booster,
            });
        }

        debug!("Converted {} launch records", records.len());
        Ok(LaunchTable::from_records(records))
    }

    fn string_column(df: &DataFrame, name: &'static str) -> Result<Vec<String>, LoaderError> {
        let column = df
            .column(name)
            .map_err(|_| LoaderError::MissingColumn(name))?;
        let as_str = column.cast(&DataType::String)?;
        let ca = as_str.as_materialized_series().str()?;

        ca.into_iter()
            .enumerate()
            .map(|(row, v)| {
                v.map(|s| s.trim().to_string())
                    .ok_or(LoaderError::MissingValue { column: name, row })
            })
            .collect()
    }

    fn float_column(df: &DataFrame, name: &'static str) -> Result<Vec<f64>, LoaderError> {
        let column = df
            .column(name)
            .map_err(|_| LoaderError::MissingColumn(name))?;
        let value_f64 = column.cast(&DataType::Float64)?;
        let ca = value_f64.as_materialized_series().f64()?;

        ca.into_iter()
            .enumerate()
            .map(|(row, v)| v.ok_or(LoaderError::MissingValue { column: name, row }))
            .collect()
    }
}

/// Small fixture table shared by unit tests across the crate.
#[cfg(test)]
pub(crate) fn sample_table() -> LaunchTable {
    let rows = [
        ("CCAFS LC-40", 0.0, 0, "v1.0"),
        ("CCAFS LC-40", 525.0, 0, "v1.0"),
        ("CCAFS LC-40", 677.0, 1, "v1.0"),
        ("CCAFS LC-40", 3170.0, 0, "v1.1"),
        ("VAFB SLC-4E", 500.0, 0, "v1.1"),
        ("VAFB SLC-4E", 9600.0, 1, "FT"),
        ("KSC LC-39A", 2490.0, 1, "FT"),
        ("KSC LC-39A", 5300.0, 1, "FT"),
        ("KSC LC-39A", 3136.0, 1, "B4"),
        ("KSC LC-39A", 3136.0, 0, "FT"),
        ("CCAFS SLC-40", 4707.0, 1, "B4"),
        ("CCAFS SLC-40", 2205.0, 0, "B5"),
    ];

    LaunchTable::from_records(
        rows.iter()
            .map(|&(site, payload, class, booster)| LaunchRecord {
                launch_site: site.to_string(),
                payload_mass_kg: payload,
                outcome: if class == 1 {
                    Outcome::Success
                } else {
                    Outcome::Failure
                },
                booster_version_category: booster.to_string(),
            })
            .collect(),
    )
}
