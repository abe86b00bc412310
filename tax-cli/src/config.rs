//! Optional TOML configuration for the `tax-split` binary.
//!
//! ```toml
//! financial_year = "2025-26"
//! medicare_levy_rate = 0.02
//! company_rate = 0.25
//! fund_rate = 0.15
//! allocation_tolerance = 1.00
//! brackets = "brackets/resident_2025_26.csv"
//! ```
//!
//! Every key is optional. Missing keys take the built-in 2025-26 values. A
//! relative `brackets` path is resolved against the directory holding the
//! config file.

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::TaxYearConfig;
use tax_data::{TaxBracketLoader, TaxBracketLoaderError};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("cannot load brackets: {0}")]
    Brackets(#[from] TaxBracketLoaderError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    pub financial_year: Option<String>,
    pub medicare_levy_rate: Option<Decimal>,
    pub company_rate: Option<Decimal>,
    pub fund_rate: Option<Decimal>,
    pub allocation_tolerance: Option<Decimal>,
    pub brackets: Option<PathBuf>,
}

impl CliConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Reads `path`, resolving a relative `brackets` entry against its directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut config = Self::from_toml_str(&contents)?;

        if let Some(dir) = path.parent() {
            config.brackets = config
                .brackets
                .map(|b| if b.is_relative() { dir.join(b) } else { b });
        }

        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Overlays this file's settings on the built-in defaults.
    ///
    /// `brackets_override` (from the command line) wins over the file's
    /// `brackets` entry.
    pub fn into_tax_year_config(
        self,
        brackets_override: Option<&Path>,
    ) -> Result<TaxYearConfig, ConfigError> {
        let defaults = TaxYearConfig::default();

        let brackets = match brackets_override.or(self.brackets.as_deref()) {
            Some(path) => {
                debug!(path = %path.display(), "loading bracket table");
                TaxBracketLoader::load_from_file(path)?
            }
            None => defaults.brackets,
        };

        Ok(TaxYearConfig {
            financial_year: self.financial_year.unwrap_or(defaults.financial_year),
            medicare_levy_rate: self
                .medicare_levy_rate
                .unwrap_or(defaults.medicare_levy_rate),
            company_rate: self.company_rate.unwrap_or(defaults.company_rate),
            fund_rate: self.fund_rate.unwrap_or(defaults.fund_rate),
            allocation_tolerance: self
                .allocation_tolerance
                .unwrap_or(defaults.allocation_tolerance),
            brackets,
        })
    }
}
