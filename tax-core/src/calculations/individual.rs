//! Progressive income tax for individuals, plus the Medicare levy.
//!
//! Income is walked through the bracket schedule in ascending order. Each
//! bracket taxes the slice of income between its floor and its inclusive
//! upper bound at the bracket's marginal rate. The floor of a bracket is the
//! larger of the previous bracket's upper bound and `min_income - 1` (the
//! published tables start each bracket one dollar above the last), so whole
//! and fractional incomes are taxed without gaps.
//!
//! A flat levy on the whole income is added on top of the bracket tax.
//! Incomes of zero or less short-circuit to zero *before* the levy, so no
//! levy is charged on them either.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::individual_tax;
//!
//! // 26,800 × 16% + 15,000 × 30% = 8,788, plus 2% of 60,000
//! assert_eq!(individual_tax(dec!(60000)), dec!(9988.00));
//! assert_eq!(individual_tax(dec!(-500)), dec!(0));
//! ```

use rust_decimal::Decimal;
use tracing::trace;

use crate::calculations::common::{max, min, round_half_up};
use crate::{BracketSchedule, TaxYearConfig};

/// Individual income tax under the built-in 2025-26 schedule with the 2% levy.
pub fn individual_tax(income: Decimal) -> Decimal {
    let schedule = BracketSchedule::resident_2025_26();
    IndividualTaxCalculator::new(&schedule, TaxYearConfig::default_medicare_levy_rate())
        .calculate(income)
}

/// Calculator for individual tax over a given bracket schedule.
#[derive(Debug, Clone)]
pub struct IndividualTaxCalculator<'a> {
    schedule: &'a BracketSchedule,
    levy_rate: Decimal,
}

impl<'a> IndividualTaxCalculator<'a> {
    pub fn new(
        schedule: &'a BracketSchedule,
        levy_rate: Decimal,
    ) -> Self {
        Self {
            schedule,
            levy_rate,
        }
    }

    /// Bracket tax plus levy, rounded to cents. Zero for `income <= 0`.
    pub fn calculate(
        &self,
        income: Decimal,
    ) -> Decimal {
        if income <= Decimal::ZERO {
            return round_half_up(Decimal::ZERO);
        }

        let bracket_tax = self.bracket_tax(income);
        let levy = self.levy(income);
        trace!(%income, %bracket_tax, %levy, "individual tax");

        round_half_up(bracket_tax.saturating_add(levy))
    }

    /// Unrounded progressive tax across all brackets the income reaches.
    ///
    /// Saturates at the `Decimal` limits rather than overflowing.
    fn bracket_tax(
        &self,
        income: Decimal,
    ) -> Decimal {
        let mut tax = Decimal::ZERO;
        let mut previous_upper = Decimal::ZERO;

        for bracket in self.schedule {
            if income <= previous_upper {
                break;
            }

            let lower = if bracket.min_income > Decimal::ZERO {
                bracket.min_income - Decimal::ONE
            } else {
                Decimal::ZERO
            };
            let floor = max(previous_upper, lower);
            let ceiling = bracket
                .max_income
                .map_or(income, |upper| min(income, upper));

            let taxable = ceiling - floor;
            if taxable > Decimal::ZERO {
                tax = tax.saturating_add(taxable.saturating_mul(bracket.tax_rate));
            }

            match bracket.max_income {
                Some(upper) => previous_upper = upper,
                None => break,
            }
        }

        tax
    }

    /// Unrounded levy on the raw income.
    fn levy(
        &self,
        income: Decimal,
    ) -> Decimal {
        income.saturating_mul(self.levy_rate)
    }
}
