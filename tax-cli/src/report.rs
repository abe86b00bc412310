//! Human-readable and JSON renderings of a composed scenario.

use std::fmt;

use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::Serialize;
use tax_core::{EntityKind, ScenarioResult};

use crate::utils::{format_currency, format_rate};

const WIDTH: usize = 70;
const LABEL_WIDTH: usize = 31;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// A scenario result plus the context needed to present it.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    pub financial_year: &'a str,
    pub result: &'a ScenarioResult,
}

impl<'a> ScenarioReport<'a> {
    pub fn new(
        financial_year: &'a str,
        result: &'a ScenarioResult,
    ) -> Self {
        Self {
            name: None,
            financial_year,
            result,
        }
    }

    pub fn named(
        mut self,
        name: &'a str,
    ) -> Self {
        self.name = Some(name);
        self
    }

    fn savings_line(&self) -> String {
        let savings = self.result.tax_savings_vs_all_individual;
        if savings >= Decimal::ZERO {
            format!("SAVING {}", format_currency(savings))
        } else {
            format!("COSTS {}", format_currency(savings.abs()))
        }
    }
}

fn line(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    value: impl fmt::Display,
) -> fmt::Result {
    writeln!(f, "{label:<LABEL_WIDTH$}{value}")
}

fn rate_suffix(rate: Option<Decimal>) -> String {
    rate.map(|r| format!(" ({})", format_rate(r)))
        .unwrap_or_default()
}

fn portion_line(
    f: &mut fmt::Formatter<'_>,
    kind: EntityKind,
    rate: Option<Decimal>,
    income: Decimal,
) -> fmt::Result {
    line(
        f,
        &format!("{}{}:", kind.portion_label(), rate_suffix(rate)),
        format_currency(income),
    )
}

fn tax_line(
    f: &mut fmt::Formatter<'_>,
    kind: EntityKind,
    rate: Option<Decimal>,
    tax: Decimal,
) -> fmt::Result {
    line(
        f,
        &format!(" → {}{}:", kind.tax_label(), rate_suffix(rate)),
        format_currency(tax),
    )
}

/// Renders reports in order: text blocks separated by a blank line, or one
/// JSON array.
pub fn render_reports(
    reports: &[ScenarioReport<'_>],
    format: OutputFormat,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(reports
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => serde_json::to_string_pretty(reports),
    }
}

impl fmt::Display for ScenarioReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let r = self.result;
        let title = format!(" Tax Split Scenario - {} FY ", self.financial_year);
        let rule = "-".repeat(WIDTH);

        writeln!(f, "{title:=^WIDTH$}")?;
        if let Some(name) = self.name {
            line(f, "Scenario:", name)?;
        }
        line(f, "Total Income:", format_currency(r.total_income))?;
        writeln!(f, "{rule}")?;
        portion_line(f, EntityKind::Individual, None, r.individual_income)?;
        tax_line(f, EntityKind::Individual, None, r.individual_tax)?;
        portion_line(f, EntityKind::Company, Some(r.company_rate), r.company_income)?;
        tax_line(f, EntityKind::Company, None, r.company_tax)?;
        portion_line(f, EntityKind::Fund, None, r.fund_income)?;
        tax_line(f, EntityKind::Fund, Some(r.fund_rate), r.fund_tax)?;
        writeln!(f, "{rule}")?;
        line(f, "TOTAL TAX ACROSS ENTITIES:", format_currency(r.total_tax))?;
        line(
            f,
            "Effective overall rate:",
            format!("{}%", r.effective_overall_rate),
        )?;
        line(f, "Compared to 100% individual:", self.savings_line())?;
        writeln!(f, "{}", "=".repeat(WIDTH))
    }
}
