use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::BracketSchedule;

/// Rates and limits for one financial year.
///
/// Passed explicitly to [`ScenarioComposer`](crate::ScenarioComposer); nothing
/// reads it from global state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearConfig {
    /// Financial year label, e.g. `2025-26`.
    pub financial_year: String,
    /// Flat levy charged on the whole of a positive individual income.
    pub medicare_levy_rate: Decimal,
    /// Default company rate, used when a scenario does not override it.
    pub company_rate: Decimal,
    /// Rate applied to fund earnings in accumulation phase.
    pub fund_rate: Decimal,
    /// Absolute amount by which an allocation may miss the stated total.
    pub allocation_tolerance: Decimal,
    pub brackets: BracketSchedule,
}

impl TaxYearConfig {
    pub const DEFAULT_FINANCIAL_YEAR: &'static str = "2025-26";

    pub fn default_medicare_levy_rate() -> Decimal {
        Decimal::new(2, 2)
    }

    pub fn default_company_rate() -> Decimal {
        Decimal::new(25, 2)
    }

    pub fn default_fund_rate() -> Decimal {
        Decimal::new(15, 2)
    }

    pub fn default_allocation_tolerance() -> Decimal {
        Decimal::ONE
    }
}

impl Default for TaxYearConfig {
    fn default() -> Self {
        Self {
            financial_year: Self::DEFAULT_FINANCIAL_YEAR.to_string(),
            medicare_levy_rate: Self::default_medicare_levy_rate(),
            company_rate: Self::default_company_rate(),
            fund_rate: Self::default_fund_rate(),
            allocation_tolerance: Self::default_allocation_tolerance(),
            brackets: BracketSchedule::resident_2025_26(),
        }
    }
}
