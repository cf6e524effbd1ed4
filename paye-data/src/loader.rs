//! CSV loader for filer scenarios.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Values are
//! trimmed. A file missing a required column is rejected as a whole; any
//! other problem is reported against its own row and the remaining rows
//! still load. Amount cells accept thousands separators and a currency symbol
//! (`"1,200,000"`, `"₦450000"`).
//!
//! | Column | Required | Notes |
//! |------------------|----------|-----------------------------------------------|
//! | `label` | yes | Free text shown in reports |
//! | `tax_year` | yes | `2025`/`legacy` or `2026`/`reform` |
//! | `category` | yes | `salary`, `freelancer`, `both`, `crypto` |
//! | `period` | yes | `monthly` or `yearly` |
//! | `income` | yes | Amount for one period |
//! | `internet` | no | Business expense, same period as income |
//! | `tools` | no | Business expense |
//! | `workspace_rent` | no | Business expense |
//! | `other_expenses` | no | Business expense |
//! | `crypto_method` | no | `capital_gains` or `personal_income` |
//! | `rent_annual` | no | Annual housing rent |
//!
//! ### Example
//!
//! ```csv
//! label,tax_year,category,period,income,internet,rent_annual
//! Designer,2026,freelancer,monthly,"450,000",20000,
//! Renter,2026,salary,yearly,5000000,,"1,000,000"
//! ```

use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use paye_core::input::parse_amount;
use paye_core::{BusinessExpenses, CryptoMethod, FilerCategory, IncomePeriod, TaxProfile, TaxRegime};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

const REQUIRED_COLUMNS: [&str; 5] = ["label", "tax_year", "category", "period", "income"];

/// Errors that can occur while loading a scenario file.
#[derive(Debug, Error)]
pub enum ScenarioLoadError {
    /// Structurally invalid CSV, for the header line or a single record.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// The header line lacks a required column.
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    /// A cell held a value the field does not accept. `row` is 1-based,
    /// counting data rows only.
    #[error("invalid {field} '{value}' on row {row}")]
    InvalidField {
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),
}

/// One named profile from a scenario file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub label: String,
    pub profile: TaxProfile,
}

/// One data row of a scenario file, loaded or rejected on its own.
#[derive(Debug)]
pub struct ScenarioRow {
    /// 1-based, counting data rows only.
    pub row: usize,
    /// The row's label, or `row N` when the record could not be read.
    pub label: String,
    pub scenario: Result<Scenario, ScenarioLoadError>,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    label: String,
    tax_year: String,
    category: String,
    period: String,
    income: String,
    #[serde(default)]
    internet: Option<String>,
    #[serde(default)]
    tools: Option<String>,
    #[serde(default)]
    workspace_rent: Option<String>,
    #[serde(default)]
    other_expenses: Option<String>,
    #[serde(default)]
    crypto_method: Option<String>,
    #[serde(default)]
    rent_annual: Option<String>,
}

fn invalid(
    row: usize,
    field: &'static str,
    value: &str,
) -> ScenarioLoadError {
    ScenarioLoadError::InvalidField {
        row,
        field,
        value: value.to_string(),
    }
}

fn non_empty(cell: Option<&str>) -> Option<&str> {
    cell.filter(|s| !s.trim().is_empty())
}

fn amount(
    row: usize,
    field: &'static str,
    value: &str,
) -> Result<Decimal, ScenarioLoadError> {
    parse_amount(value).map_err(|_| invalid(row, field, value))
}

fn optional_amount(
    row: usize,
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<Decimal>, ScenarioLoadError> {
    non_empty(value)
        .map(|v| amount(row, field, v))
        .transpose()
}

/// Convert one CSV row into a scenario. `row_number` is 1-based.
fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<Scenario, ScenarioLoadError> {
    let tax_year = TaxRegime::parse(&row.tax_year)
        .ok_or_else(|| invalid(row_number, "tax_year", &row.tax_year))?;
    let category = FilerCategory::parse(&row.category)
        .ok_or_else(|| invalid(row_number, "category", &row.category))?;
    let period = IncomePeriod::parse(&row.period)
        .ok_or_else(|| invalid(row_number, "period", &row.period))?;
    let income = amount(row_number, "income", &row.income)?;

    let expense = |field: &'static str, cell: &Option<String>| {
        optional_amount(row_number, field, cell.as_deref()).map(Option::unwrap_or_default)
    };
    let expenses = BusinessExpenses {
        internet: expense("internet", &row.internet)?,
        tools: expense("tools", &row.tools)?,
        workspace_rent: expense("workspace_rent", &row.workspace_rent)?,
        other: expense("other_expenses", &row.other_expenses)?,
    };

    let crypto_method = non_empty(row.crypto_method.as_deref())
        .map(|m| CryptoMethod::parse(m).ok_or_else(|| invalid(row_number, "crypto_method", m)))
        .transpose()?;
    let rent_annual = optional_amount(row_number, "rent_annual", row.rent_annual.as_deref())?;

    Ok(Scenario {
        label: row.label,
        profile: TaxProfile {
            tax_year,
            category,
            income,
            period,
            expenses,
            crypto_method,
            rent_annual,
        },
    })
}

/// Checks the header line and returns the position of the `label` column.
fn check_headers(headers: &StringRecord) -> Result<usize, ScenarioLoadError> {
    let position = |name: &str| headers.iter().position(|h| h == name);
    for column in REQUIRED_COLUMNS {
        if position(column).is_none() {
            return Err(ScenarioLoadError::MissingColumn(column));
        }
    }
    position("label").ok_or(ScenarioLoadError::MissingColumn("label"))
}

fn load_record(
    record: &StringRecord,
    headers: &StringRecord,
    row: usize,
) -> Result<Scenario, ScenarioLoadError> {
    let csv_row: CsvRow = record.deserialize(Some(headers))?;
    convert_row(csv_row, row)
}

/// Reads scenario files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Parse scenario rows from any reader, in file order.
    ///
    /// Only an unreadable header line or a missing required column fails the
    /// whole parse. Each data row carries its own result, so one bad row does
    /// not hide the rows around it.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<ScenarioRow>, ScenarioLoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(false)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let label_index = check_headers(&headers)?;

        let rows: Vec<ScenarioRow> = csv_reader
            .records()
            .enumerate()
            .map(|(idx, record)| {
                let row = idx + 1;
                let (label, scenario) = match record {
                    Ok(record) => (
                        record
                            .get(label_index)
                            .filter(|l| !l.is_empty())
                            .map_or_else(|| format!("row {row}"), str::to_string),
                        load_record(&record, &headers, row),
                    ),
                    Err(e) => (format!("row {row}"), Err(e.into())),
                };
                if let Err(e) = &scenario {
                    warn!(row, label = %label, error = %e, "rejected scenario row");
                }
                ScenarioRow {
                    row,
                    label,
                    scenario,
                }
            })
            .collect();

        debug!(
            count = rows.len(),
            rejected = rows.iter().filter(|r| r.scenario.is_err()).count(),
            "parsed scenario rows"
        );
        Ok(rows)
    }

    pub fn load_from_str(input: &str) -> Result<Vec<ScenarioRow>, ScenarioLoadError> {
        Self::parse(input.as_bytes())
    }

    /// Read a file from disk and delegate to [`ScenarioLoader::load_from_str`].
    pub fn load_from_file(path: &Path) -> Result<Vec<ScenarioRow>, ScenarioLoadError> {
        let contents = std::fs::read_to_string(path)?;
        Self::load_from_str(&contents)
    }
}
