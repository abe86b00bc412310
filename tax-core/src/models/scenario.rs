use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest magnitude accepted for an amount read from user input (10^15 dollars).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Largest magnitude accepted for a rate read from user input.
pub const MAX_RATE: Decimal = Decimal::ONE_HUNDRED;

/// An amount or rate too large to be taxed without overflow.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum InputRangeError {
    #[error("amount {0} exceeds the limit of {max}", max = MAX_AMOUNT)]
    Amount(Decimal),

    #[error("rate {0} exceeds the limit of {max}", max = MAX_RATE)]
    Rate(Decimal),
}

/// Returns `value` if its magnitude is at most [`MAX_AMOUNT`].
pub fn check_amount(value: Decimal) -> Result<Decimal, InputRangeError> {
    if value.abs() > MAX_AMOUNT {
        return Err(InputRangeError::Amount(value));
    }
    Ok(value)
}

/// Returns `value` if its magnitude is at most [`MAX_RATE`].
pub fn check_rate(value: Decimal) -> Result<Decimal, InputRangeError> {
    if value.abs() > MAX_RATE {
        return Err(InputRangeError::Rate(value));
    }
    Ok(value)
}

/// A total income and the amounts proposed for each entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioInput {
    pub total_income: Decimal,
    pub individual_amount: Decimal,
    pub company_amount: Decimal,
    pub fund_amount: Decimal,

    /// Overrides the configured company rate when set.
    #[serde(default)]
    pub company_rate: Option<Decimal>,
}

impl ScenarioInput {
    pub fn new(
        total_income: Decimal,
        individual_amount: Decimal,
        company_amount: Decimal,
        fund_amount: Decimal,
    ) -> Self {
        Self {
            total_income,
            individual_amount,
            company_amount,
            fund_amount,
            company_rate: None,
        }
    }

    pub fn with_company_rate(
        mut self,
        rate: Decimal,
    ) -> Self {
        self.company_rate = Some(rate);
        self
    }

    /// Sum of the three entity amounts, unrounded. Saturates at the
    /// `Decimal` limits.
    pub fn allocated(&self) -> Decimal {
        self.individual_amount
            .saturating_add(self.company_amount)
            .saturating_add(self.fund_amount)
    }

    /// Checks every amount against [`MAX_AMOUNT`] and the company rate, if
    /// any, against [`MAX_RATE`].
    pub fn check_bounds(&self) -> Result<(), InputRangeError> {
        check_amount(self.total_income)?;
        check_amount(self.individual_amount)?;
        check_amount(self.company_amount)?;
        check_amount(self.fund_amount)?;
        if let Some(rate) = self.company_rate {
            check_rate(rate)?;
        }
        Ok(())
    }
}

/// Outcome of splitting an income across the three entities.
///
/// Every monetary field is rounded to cents; `effective_overall_rate` is a
/// percentage rounded to two places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub total_income: Decimal,

    pub individual_income: Decimal,
    /// Bracket tax plus the Medicare levy.
    pub individual_tax: Decimal,

    pub company_income: Decimal,
    pub company_rate: Decimal,
    pub company_tax: Decimal,

    pub fund_income: Decimal,
    pub fund_rate: Decimal,
    pub fund_tax: Decimal,

    pub total_tax: Decimal,
    pub effective_overall_rate: Decimal,

    /// Tax on the whole amount as individual income, minus `total_tax`.
    /// Negative when the split costs more.
    pub tax_savings_vs_all_individual: Decimal,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn max_amount_is_one_quadrillion() {
        assert_eq!(MAX_AMOUNT, dec!(1000000000000000));
    }

    #[test]
    fn allocated_saturates() {
        let input = ScenarioInput::new(Decimal::MAX, Decimal::MAX, Decimal::MAX, dec!(0));

        assert_eq!(input.allocated(), Decimal::MAX);
    }

    #[test]
    fn check_bounds_accepts_limits() {
        let input = ScenarioInput::new(MAX_AMOUNT, MAX_AMOUNT, -MAX_AMOUNT, dec!(0))
            .with_company_rate(MAX_RATE);

        assert_eq!(input.check_bounds(), Ok(()));
    }

    #[test]
    fn check_bounds_rejects_oversized_amount() {
        let input = ScenarioInput::new(dec!(0), dec!(0), dec!(1000000000000000.01), dec!(0));

        assert_eq!(
            input.check_bounds(),
            Err(InputRangeError::Amount(dec!(1000000000000000.01)))
        );
    }

    #[test]
    fn check_bounds_rejects_oversized_rate() {
        let input = ScenarioInput::new(dec!(0), dec!(0), dec!(0), dec!(0))
            .with_company_rate(dec!(-101));

        assert_eq!(input.check_bounds(), Err(InputRangeError::Rate(dec!(-101))));
    }
}
