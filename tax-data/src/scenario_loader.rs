//! CSV loader for batches of split scenarios.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter.
//!
//! | Column              | Required | Type    | Notes                                  |
//! |---------------------|----------|---------|----------------------------------------|
//! | `name`              | yes      | string  | Label shown in reports                 |
//! | `total_income`      | yes      | decimal | e.g. `200000.00`                       |
//! | `individual_amount` | yes      | decimal |                                        |
//! | `company_amount`    | yes      | decimal |                                        |
//! | `fund_amount`       | yes      | decimal |                                        |
//! | `company_rate`      | no       | decimal | Empty or absent uses the default rate  |
//!
//! ```csv
//! name,total_income,individual_amount,company_amount,fund_amount,company_rate
//! moderate,200000,60000,110000,30000,
//! larger,350000,100000,180000,70000,0.25
//! ```
//!
//! Amounts are not reconciled here. A row whose amounts miss the total loads
//! fine and fails later, when the scenario is composed.

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tax_core::{InputRangeError, ScenarioInput};

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    name: String,
    total_income: Decimal,
    individual_amount: Decimal,
    company_amount: Decimal,
    fund_amount: Decimal,
    company_rate: Option<Decimal>,
}

/// A scenario input with the label it was loaded under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedScenario {
    pub name: String,
    pub input: ScenarioInput,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading scenario rows.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioLoadError {
    /// Bad structure, missing required column, or a cell of the wrong type.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// The `name` cell was blank. `row` is 1-based, not counting the header.
    #[error("scenario on row {row} has no name")]
    MissingName { row: usize },

    /// An amount or the company rate is too large to tax. `row` is 1-based.
    #[error("scenario on row {row}: {source}")]
    OutOfRange {
        row: usize,
        #[source]
        source: InputRangeError,
    },

    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<NamedScenario, ScenarioLoadError> {
    if row.name.is_empty() {
        return Err(ScenarioLoadError::MissingName { row: row_number });
    }

    let input = ScenarioInput {
        total_income: row.total_income,
        individual_amount: row.individual_amount,
        company_amount: row.company_amount,
        fund_amount: row.fund_amount,
        company_rate: row.company_rate,
    };
    input
        .check_bounds()
        .map_err(|source| ScenarioLoadError::OutOfRange {
            row: row_number,
            source,
        })?;

    Ok(NamedScenario {
        name: row.name,
        input,
    })
}

pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Parse CSV text into scenarios, in file order.
    ///
    /// # Errors
    ///
    /// * [`ScenarioLoadError::Parse`] if the CSV is structurally invalid or a
    ///   required field cannot be deserialised.
    /// * [`ScenarioLoadError::MissingName`] if a row has a blank name.
    /// * [`ScenarioLoadError::OutOfRange`] if an amount or rate is too large.
    pub fn load_from_str(input: &str) -> Result<Vec<NamedScenario>, ScenarioLoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(false)
            .from_reader(input.as_bytes());

        reader
            .deserialize::<CsvRow>()
            .enumerate()
            .map(|(idx, result)| {
                let row = result?;
                convert_row(row, idx + 1)
            })
            .collect()
    }

    /// Read a file from disk and delegate to [`ScenarioLoader::load_from_str`].
    pub fn load_from_file(path: &Path) -> Result<Vec<NamedScenario>, ScenarioLoadError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ScenarioLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_str(&contents)
    }
}
