//! Loaders for payroll rate tables.
//!
//! ## CSV Format
//!
//! One row per tax year. Headers are matched by name, so column order does
//! not matter. Every column is required.
//!
//! | Column | Type | Notes |
//! |-----------------------------------|---------|------------------------|
//! | `year` | integer | e.g. `2026` |
//! | `max_insurable_income` | decimal | BGN, e.g. `4600` |
//! | `employee_pension` | decimal | fraction, e.g. `0.0747` |
//! | `employee_sickness` | decimal | |
//! | `employee_unemployment` | decimal | |
//! | `employee_supplementary_pension` | decimal | |
//! | `employee_health` | decimal | |
//! | `employer_pension` | decimal | |
//! | `employer_sickness` | decimal | |
//! | `employer_unemployment` | decimal | |
//! | `employer_supplementary_pension` | decimal | |
//! | `employer_occupational_accidents` | decimal | |
//! | `employer_health` | decimal | |
//! | `income_tax_rate` | decimal | |
//!
//! ## TOML Format
//!
//! An array of `tax_year` tables shaped like [`TaxConfig`]. TOML reads bare
//! numbers as 64-bit floats, so a rate written as `0.123456789012345678`
//! keeps only about 17 significant digits. Quote a value
//! (`health = "0.123456789012345678"`) to load it exactly.
//!
//! ```toml
//! [[tax_year]]
//! year = 2027
//! max_insurable_income = 5000
//! income_tax_rate = 0.10
//!
//! [tax_year.employee]
//! pension = 0.08
//! sickness = 0.014
//! unemployment = 0.004
//! supplementary_pension = 0.022
//! health = 0.032
//!
//! [tax_year.employer]
//! pension = 0.10
//! sickness = 0.021
//! unemployment = 0.006
//! supplementary_pension = 0.028
//! occupational_accidents = 0.004
//! health = 0.048
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use salary_core::{EmployeeRates, EmployerRates, TaxConfig, TaxConfigError};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config_set::TaxConfigSet;

/// Errors that can occur when loading rate tables.
#[derive(Debug, Error)]
pub enum TaxConfigLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported rate table format '{0}' (expected .csv or .toml)")]
    UnsupportedFormat(PathBuf),

    #[error("invalid configuration for year {year}: {source}")]
    InvalidConfig {
        year: i32,
        #[source]
        source: TaxConfigError,
    },

    #[error("tax year {0} appears more than once")]
    DuplicateYear(i32),

    #[error("no tax configuration for year {0}")]
    YearNotFound(i32),
}

impl From<csv::Error> for TaxConfigLoaderError {
    fn from(err: csv::Error) -> Self {
        TaxConfigLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of the CSV rate table.
///
/// Decimal cells are parsed from their text, so every digit written in the
/// file is kept.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TaxConfigRecord {
    pub year: i32,
    #[serde(with = "rust_decimal::serde::str")]
    pub max_insurable_income: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub employee_pension: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub employee_sickness: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub employee_unemployment: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub employee_supplementary_pension: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub employee_health: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub employer_pension: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub employer_sickness: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub employer_unemployment: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub employer_supplementary_pension: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub employer_occupational_accidents: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub employer_health: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub income_tax_rate: Decimal,
}

impl From<TaxConfigRecord> for TaxConfig {
    fn from(record: TaxConfigRecord) -> Self {
        TaxConfig {
            year: record.year,
            max_insurable_income: record.max_insurable_income,
            employee: EmployeeRates {
                pension: record.employee_pension,
                sickness: record.employee_sickness,
                unemployment: record.employee_unemployment,
                supplementary_pension: record.employee_supplementary_pension,
                health: record.employee_health,
            },
            employer: EmployerRates {
                pension: record.employer_pension,
                sickness: record.employer_sickness,
                unemployment: record.employer_unemployment,
                supplementary_pension: record.employer_supplementary_pension,
                occupational_accidents: record.employer_occupational_accidents,
                health: record.employer_health,
            },
            income_tax_rate: record.income_tax_rate,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TomlRateTable {
    #[serde(default)]
    tax_year: Vec<TaxConfig>,
}

/// Loader for payroll rate tables from CSV or TOML.
///
/// Every configuration is validated with [`TaxConfig::validate`] and years
/// must be unique within one file.
pub struct TaxConfigLoader;

impl TaxConfigLoader {
    /// Parse and validate a CSV rate table from any reader.
    pub fn parse_csv<R: Read>(reader: R) -> Result<TaxConfigSet, TaxConfigLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut configs = Vec::new();

        for result in csv_reader.deserialize() {
            let record: TaxConfigRecord = result?;
            configs.push(TaxConfig::from(record));
        }

        Self::collect(configs)
    }

    /// Parse and validate a TOML rate table.
    pub fn parse_toml(input: &str) -> Result<TaxConfigSet, TaxConfigLoaderError> {
        let table: TomlRateTable = toml::from_str(input)?;
        Self::collect(table.tax_year)
    }

    /// Read a rate table from disk, choosing the parser by file extension.
    pub fn load_path(path: &Path) -> Result<TaxConfigSet, TaxConfigLoaderError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let read = |path: &Path| {
            std::fs::read_to_string(path).map_err(|source| TaxConfigLoaderError::Io {
                path: path.to_path_buf(),
                source,
            })
        };

        let set = match extension.as_deref() {
            Some("csv") => Self::parse_csv(read(path)?.as_bytes())?,
            Some("toml") => Self::parse_toml(&read(path)?)?,
            _ => return Err(TaxConfigLoaderError::UnsupportedFormat(path.to_path_buf())),
        };

        debug!(path = %path.display(), years = ?set.years(), "Loaded rate table");
        Ok(set)
    }

    fn collect(configs: Vec<TaxConfig>) -> Result<TaxConfigSet, TaxConfigLoaderError> {
        let mut set = TaxConfigSet::new();

        for config in configs {
            config
                .validate()
                .map_err(|source| TaxConfigLoaderError::InvalidConfig {
                    year: config.year,
                    source,
                })?;

            let year = config.year;
            if set.insert(config).is_some() {
                return Err(TaxConfigLoaderError::DuplicateYear(year));
            }
        }

        Ok(set)
    }
}
