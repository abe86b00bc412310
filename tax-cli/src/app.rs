//! Glue between the command line and the calculators.

use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use tax_core::calculations::IndividualTaxCalculator;
use tax_core::{ScenarioComposer, ScenarioInput, TaxYearConfig};
use tax_data::NamedScenario;
use tracing::{error, info};

use crate::config::CliConfig;
use crate::report::{OutputFormat, ScenarioReport, render_reports};
use crate::utils::format_currency;

/// Builds the year's parameters from an optional config file and an optional
/// bracket table override.
pub fn build_config(
    config_path: Option<&Path>,
    brackets: Option<&Path>,
) -> Result<TaxYearConfig> {
    let file_config = match config_path {
        Some(path) => CliConfig::load(path)
            .with_context(|| format!("failed to load config: {}", path.display()))?,
        None => CliConfig::default(),
    };

    Ok(file_config.into_tax_year_config(brackets)?)
}

/// The two sample splits shipped with the tool.
pub fn illustrative_scenarios() -> Vec<NamedScenario> {
    vec![
        NamedScenario {
            name: "moderate split".to_string(),
            input: ScenarioInput::new(
                Decimal::from(200_000),
                Decimal::from(60_000),
                Decimal::from(110_000),
                Decimal::from(30_000),
            ),
        },
        NamedScenario {
            // Individual share stays below the 45% bracket.
            name: "larger split".to_string(),
            input: ScenarioInput::new(
                Decimal::from(350_000),
                Decimal::from(100_000),
                Decimal::from(180_000),
                Decimal::from(70_000),
            ),
        },
    ]
}

/// Rendered output for a batch plus the number of scenarios that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutput {
    pub rendered: String,
    pub failed: usize,
}

/// Composes and renders every scenario.
///
/// Scenarios that fail to compose are logged and counted; the rest are still
/// rendered.
pub fn render_scenarios(
    config: &TaxYearConfig,
    scenarios: &[NamedScenario],
    format: OutputFormat,
) -> Result<BatchOutput> {
    let composer = ScenarioComposer::new(config);
    let mut results = Vec::with_capacity(scenarios.len());
    let mut failed = 0;

    for scenario in scenarios {
        match composer.compose(&scenario.input) {
            Ok(result) => results.push((scenario.name.as_str(), result)),
            Err(e) => {
                error!(scenario = %scenario.name, "{e}");
                failed += 1;
            }
        }
    }
    info!(
        composed = results.len(),
        failed, "scenarios processed"
    );

    let reports: Vec<ScenarioReport<'_>> = results
        .iter()
        .map(|(name, result)| ScenarioReport::new(&config.financial_year, result).named(name))
        .collect();

    let rendered = render_reports(&reports, format)?;

    Ok(BatchOutput { rendered, failed })
}

#[derive(Debug, Serialize)]
struct IndividualTaxReport<'a> {
    financial_year: &'a str,
    income: Decimal,
    tax: Decimal,
}

/// Individual tax (levy inclusive) on one income.
pub fn render_individual_tax(
    config: &TaxYearConfig,
    income: Decimal,
    format: OutputFormat,
) -> Result<String> {
    let tax = IndividualTaxCalculator::new(&config.brackets, config.medicare_levy_rate)
        .calculate(income);

    Ok(match format {
        OutputFormat::Text => format!(
            "Individual tax + Medicare on {} ({} FY): {}\n",
            format_currency(income),
            config.financial_year,
            format_currency(tax)
        ),
        OutputFormat::Json => serde_json::to_string_pretty(&IndividualTaxReport {
            financial_year: &config.financial_year,
            income,
            tax,
        })?,
    })
}
