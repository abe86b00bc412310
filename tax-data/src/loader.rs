use std::fs::File;
use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{BracketSchedule, BracketScheduleError, TaxBracket};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading a bracket table.
#[derive(Debug, Error)]
pub enum TaxBracketLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("cannot open '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid bracket schedule: {0}")]
    Schedule(#[from] BracketScheduleError),
}

impl From<csv::Error> for TaxBracketLoaderError {
    fn from(err: csv::Error) -> Self {
        TaxBracketLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of a bracket CSV file.
///
/// - `min_income`: first whole dollar taxed in this bracket
/// - `max_income`: last dollar taxed in this bracket (empty for unlimited)
/// - `rate`: the marginal rate as a fraction (e.g. `0.16` for 16%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TaxBracketRecord {
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

impl From<&TaxBracketRecord> for TaxBracket {
    fn from(record: &TaxBracketRecord) -> Self {
        TaxBracket::new(record.min_income, record.max_income, record.rate)
    }
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for bracket tables stored as CSV.
///
/// ```
/// use tax_data::TaxBracketLoader;
///
/// let csv = "min_income,max_income,rate\n0,18200,0\n18201,,0.16\n";
/// let schedule = TaxBracketLoader::load(csv.as_bytes()).unwrap();
///
/// assert_eq!(schedule.len(), 2);
/// ```
pub struct TaxBracketLoader;

impl TaxBracketLoader {
    /// Parse bracket records from a CSV reader, in file order.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<TaxBracketRecord>, TaxBracketLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: TaxBracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Parse and validate a full schedule.
    ///
    /// Rows must already be in ascending order; the loader does not sort, so
    /// a misordered file is reported as a gap rather than silently fixed.
    pub fn load<R: Read>(reader: R) -> Result<BracketSchedule, TaxBracketLoaderError> {
        let records = Self::parse(reader)?;
        debug!(rows = records.len(), "parsed bracket rows");

        let brackets = records.iter().map(TaxBracket::from).collect();
        Ok(BracketSchedule::new(brackets)?)
    }

    /// Read a bracket table from disk and delegate to [`TaxBracketLoader::load`].
    pub fn load_from_file(path: &Path) -> Result<BracketSchedule, TaxBracketLoaderError> {
        let file = File::open(path).map_err(|source| TaxBracketLoaderError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load(file)
    }
}
