//! Splits one income across an individual, a company and a super fund.
//!
//! The composer checks that the three amounts reconcile to the stated total,
//! taxes each amount independently, and reports the combined tax alongside
//! what the whole amount would have cost as individual income.
//!
//! The reconciliation tolerance is an absolute dollar amount
//! ([`TaxYearConfig::allocation_tolerance`], $1.00 by default). It does not
//! scale with the total, so large totals can hide proportionally larger
//! allocation errors.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::{ScenarioComposer, ScenarioInput, TaxYearConfig};
//!
//! let config = TaxYearConfig::default();
//! let composer = ScenarioComposer::new(&config);
//! let input = ScenarioInput::new(dec!(200000), dec!(60000), dec!(110000), dec!(30000));
//!
//! let result = composer.compose(&input).unwrap();
//!
//! assert_eq!(result.individual_tax, dec!(9988.00));
//! assert_eq!(result.company_tax, dec!(27500.00));
//! assert_eq!(result.fund_tax, dec!(4500.00));
//! assert_eq!(result.total_tax, dec!(41988.00));
//! assert_eq!(result.effective_overall_rate, dec!(20.99));
//! assert_eq!(result.tax_savings_vs_all_individual, dec!(18150.00));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::common::round_half_up;
use crate::calculations::flat_rate::FlatRateCalculator;
use crate::calculations::individual::IndividualTaxCalculator;
use crate::{ScenarioInput, ScenarioResult, TaxYearConfig};

/// Errors that can occur while composing a scenario.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScenarioError {
    /// The entity amounts miss the stated total by more than the tolerance.
    #[error("amounts do not add up: {allocated} != {requested}")]
    AllocationMismatch {
        allocated: Decimal,
        requested: Decimal,
    },
}

/// Composes a scenario under the default 2025-26 parameters.
///
/// `company_rate` of `None` uses the 25% default.
///
/// # Errors
///
/// Returns [`ScenarioError::AllocationMismatch`] when
/// `individual + company + fund` differs from `total_income` by more than $1.00.
pub fn compose_scenario(
    total_income: Decimal,
    individual_amount: Decimal,
    company_amount: Decimal,
    fund_amount: Decimal,
    company_rate: Option<Decimal>,
) -> Result<ScenarioResult, ScenarioError> {
    let config = TaxYearConfig::default();
    let input = ScenarioInput {
        total_income,
        individual_amount,
        company_amount,
        fund_amount,
        company_rate,
    };

    ScenarioComposer::new(&config).compose(&input)
}

/// Composer bound to one financial year's parameters.
#[derive(Debug, Clone)]
pub struct ScenarioComposer<'a> {
    config: &'a TaxYearConfig,
}

impl<'a> ScenarioComposer<'a> {
    pub fn new(config: &'a TaxYearConfig) -> Self {
        Self { config }
    }

    /// Validates the allocation and taxes each entity's share.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::AllocationMismatch`] if the allocation does not
    /// reconcile to the total within the configured tolerance.
    pub fn compose(
        &self,
        input: &ScenarioInput,
    ) -> Result<ScenarioResult, ScenarioError> {
        self.check_allocation(input)?;

        let individual = self.individual_calculator();
        let company = FlatRateCalculator::company(
            input.company_rate.unwrap_or(self.config.company_rate),
        );
        let fund = FlatRateCalculator::fund(self.config.fund_rate);

        let individual_tax = individual.calculate(input.individual_amount);
        let company_tax = company.calculate(input.company_amount);
        let fund_tax = fund.calculate(input.fund_amount);
        let total_tax = round_half_up(
            individual_tax
                .saturating_add(company_tax)
                .saturating_add(fund_tax),
        );

        let effective_overall_rate = self.effective_rate(total_tax, input.total_income);
        let tax_savings_vs_all_individual =
            round_half_up(individual.calculate(input.total_income).saturating_sub(total_tax));

        debug!(
            total_income = %input.total_income,
            %total_tax,
            %effective_overall_rate,
            savings = %tax_savings_vs_all_individual,
            "scenario composed"
        );

        Ok(ScenarioResult {
            total_income: round_half_up(input.total_income),
            individual_income: round_half_up(input.individual_amount),
            individual_tax,
            company_income: round_half_up(input.company_amount),
            company_rate: company.rate,
            company_tax,
            fund_income: round_half_up(input.fund_amount),
            fund_rate: fund.rate,
            fund_tax,
            total_tax,
            effective_overall_rate,
            tax_savings_vs_all_individual,
        })
    }

    fn individual_calculator(&self) -> IndividualTaxCalculator<'a> {
        IndividualTaxCalculator::new(&self.config.brackets, self.config.medicare_levy_rate)
    }

    /// Rejects allocations further than the tolerance from the total, or too
    /// large to sum at all.
    fn check_allocation(
        &self,
        input: &ScenarioInput,
    ) -> Result<(), ScenarioError> {
        let reconciles = input
            .individual_amount
            .checked_add(input.company_amount)
            .and_then(|sum| sum.checked_add(input.fund_amount))
            .and_then(|sum| sum.checked_sub(input.total_income))
            .is_some_and(|diff| diff.abs() <= self.config.allocation_tolerance);

        if !reconciles {
            let allocated = input.allocated();
            debug!(%allocated, requested = %input.total_income, "allocation mismatch");
            return Err(ScenarioError::AllocationMismatch {
                allocated,
                requested: input.total_income,
            });
        }
        Ok(())
    }

    /// Total tax as a percentage of total income; zero when there is no income.
    ///
    /// A ratio too large for `Decimal` saturates in the direction of its sign.
    fn effective_rate(
        &self,
        total_tax: Decimal,
        total_income: Decimal,
    ) -> Decimal {
        if total_income <= Decimal::ZERO {
            return round_half_up(Decimal::ZERO);
        }

        match total_tax
            .checked_div(total_income)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        {
            Some(rate) => round_half_up(rate),
            None => {
                warn!(%total_tax, %total_income, "effective rate out of range");
                if total_tax.is_sign_negative() {
                    Decimal::MIN
                } else {
                    Decimal::MAX
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::{flat_rate_tax, individual_tax};

    fn compose(input: &ScenarioInput) -> Result<ScenarioResult, ScenarioError> {
        let config = TaxYearConfig::default();
        ScenarioComposer::new(&config).compose(input)
    }

    // =========================================================================
    // check_allocation tests
    // =========================================================================

    #[test]
    fn allocation_short_by_a_thousand_is_rejected() {
        let input = ScenarioInput::new(dec!(200000), dec!(60000), dec!(110000), dec!(29000));

        assert_eq!(
            compose(&input),
            Err(ScenarioError::AllocationMismatch {
                allocated: dec!(199000),
                requested: dec!(200000),
            })
        );
    }

    #[test]
    fn allocation_within_a_dollar_is_accepted() {
        let input = ScenarioInput::new(dec!(200000), dec!(60000), dec!(110000), dec!(29999.50));

        assert!(compose(&input).is_ok());
    }

    #[test]
    fn allocation_exactly_one_dollar_off_is_accepted() {
        let over = ScenarioInput::new(dec!(200000), dec!(60001), dec!(110000), dec!(30000));
        let under = ScenarioInput::new(dec!(200000), dec!(59999), dec!(110000), dec!(30000));

        assert!(compose(&over).is_ok());
        assert!(compose(&under).is_ok());
    }

    #[test]
    fn allocation_just_over_one_dollar_is_rejected() {
        let input = ScenarioInput::new(dec!(200000), dec!(60001.01), dec!(110000), dec!(30000));

        assert!(matches!(
            compose(&input),
            Err(ScenarioError::AllocationMismatch { .. })
        ));
    }

    #[test]
    fn allocation_tolerance_comes_from_config() {
        let config = TaxYearConfig {
            allocation_tolerance: dec!(1000),
            ..TaxYearConfig::default()
        };
        let input = ScenarioInput::new(dec!(200000), dec!(60000), dec!(110000), dec!(29000));

        assert!(ScenarioComposer::new(&config).compose(&input).is_ok());
    }

    #[test]
    fn mismatch_message_names_both_totals() {
        let err = compose(&ScenarioInput::new(dec!(100), dec!(50), dec!(0), dec!(0))).unwrap_err();

        assert_eq!(err.to_string(), "amounts do not add up: 50 != 100");
    }

    // =========================================================================
    // effective_rate tests
    // =========================================================================

    #[test]
    fn effective_rate_is_zero_for_zero_income() {
        let result = compose(&ScenarioInput::new(dec!(0), dec!(0), dec!(0), dec!(0))).unwrap();

        assert_eq!(result.effective_overall_rate, Decimal::ZERO);
        assert_eq!(result.total_tax, Decimal::ZERO);
    }

    #[test]
    fn effective_rate_is_zero_for_negative_income() {
        let input = ScenarioInput::new(dec!(-1000), dec!(0), dec!(-1000), dec!(0));

        let result = compose(&input).unwrap();

        assert_eq!(result.company_tax, dec!(-250.00));
        assert_eq!(result.effective_overall_rate, Decimal::ZERO);
    }

    #[test]
    fn effective_rate_is_percentage_rounded() {
        let config = TaxYearConfig::default();
        let composer = ScenarioComposer::new(&config);

        assert_eq!(composer.effective_rate(dec!(78288), dec!(350000)), dec!(22.37));
        assert_eq!(composer.effective_rate(dec!(1), dec!(3)), dec!(33.33));
    }

    // =========================================================================
    // compose tests
    // =========================================================================

    #[test]
    fn compose_first_illustrative_split() {
        let input = ScenarioInput::new(dec!(200000), dec!(60000), dec!(110000), dec!(30000))
            .with_company_rate(dec!(0.25));

        let result = compose(&input).unwrap();

        assert_eq!(
            result,
            ScenarioResult {
                total_income: dec!(200000.00),
                individual_income: dec!(60000.00),
                individual_tax: dec!(9988.00),
                company_income: dec!(110000.00),
                company_rate: dec!(0.25),
                company_tax: dec!(27500.00),
                fund_income: dec!(30000.00),
                fund_rate: dec!(0.15),
                fund_tax: dec!(4500.00),
                total_tax: dec!(41988.00),
                effective_overall_rate: dec!(20.99),
                tax_savings_vs_all_individual: dec!(18150.00),
            }
        );
    }

    #[test]
    fn compose_second_illustrative_split() {
        let input = ScenarioInput::new(dec!(350000), dec!(100000), dec!(180000), dec!(70000));

        let result = compose(&input).unwrap();

        assert_eq!(result.individual_tax, dec!(22788.00));
        assert_eq!(result.company_tax, dec!(45000.00));
        assert_eq!(result.fund_tax, dec!(10500.00));
        assert_eq!(result.total_tax, dec!(78288.00));
        assert_eq!(result.effective_overall_rate, dec!(22.37));
        assert_eq!(result.tax_savings_vs_all_individual, dec!(52350.00));
        assert!(result.tax_savings_vs_all_individual >= Decimal::ZERO);
    }

    #[test]
    fn compose_total_is_sum_of_independent_entity_taxes() {
        let splits = [
            (dec!(200000), dec!(60000), dec!(110000), dec!(30000), dec!(0.25)),
            (dec!(90000), dec!(90000), dec!(0), dec!(0), dec!(0.25)),
            (dec!(123456.78), dec!(45000.01), dec!(50000), dec!(28456.77), dec!(0.30)),
            (dec!(500000), dec!(18200), dec!(400000), dec!(81800), dec!(0.275)),
        ];

        for (total, individual, company, fund, rate) in splits {
            let input = ScenarioInput::new(total, individual, company, fund).with_company_rate(rate);

            let result = compose(&input).unwrap();

            assert_eq!(
                result.total_tax,
                individual_tax(individual)
                    + flat_rate_tax(company, rate)
                    + flat_rate_tax(fund, dec!(0.15)),
                "split {individual}/{company}/{fund}"
            );
        }
    }

    #[test]
    fn compose_uses_company_rate_override() {
        let input = ScenarioInput::new(dec!(100000), dec!(0), dec!(100000), dec!(0))
            .with_company_rate(dec!(0.30));

        let result = compose(&input).unwrap();

        assert_eq!(result.company_rate, dec!(0.30));
        assert_eq!(result.company_tax, dec!(30000.00));
    }

    #[test]
    fn compose_falls_back_to_configured_company_rate() {
        let config = TaxYearConfig {
            company_rate: dec!(0.30),
            ..TaxYearConfig::default()
        };
        let input = ScenarioInput::new(dec!(100000), dec!(0), dec!(100000), dec!(0));

        let result = ScenarioComposer::new(&config).compose(&input).unwrap();

        assert_eq!(result.company_tax, dec!(30000.00));
    }

    #[test]
    fn compose_reports_negative_savings_when_split_costs_more() {
        let input = ScenarioInput::new(dec!(10000), dec!(0), dec!(10000), dec!(0));

        let result = compose(&input).unwrap();

        // 200 levy as an individual vs 2500 company tax
        assert_eq!(result.tax_savings_vs_all_individual, dec!(-2300.00));
    }

    #[test]
    fn compose_echoes_inputs_rounded_to_cents() {
        let input = ScenarioInput::new(dec!(1000.004), dec!(1000.004), dec!(0), dec!(0));

        let result = compose(&input).unwrap();

        assert_eq!(result.total_income, dec!(1000.00));
        assert_eq!(result.individual_income, dec!(1000.00));
        assert_eq!(result.individual_tax, dec!(20.00));
    }

    #[test]
    fn compose_scenario_free_function_uses_defaults() {
        let result = compose_scenario(
            dec!(200000),
            dec!(60000),
            dec!(110000),
            dec!(30000),
            None,
        )
        .unwrap();

        assert_eq!(result.company_rate, dec!(0.25));
        assert_eq!(result.fund_rate, dec!(0.15));
        assert_eq!(result.total_tax, dec!(41988.00));
    }

    // =========================================================================
    // extreme inputs
    // =========================================================================

    #[test]
    fn tiny_total_saturates_effective_rate() {
        let smallest = dec!(0.0000000000000000000000000001);
        let input = ScenarioInput::new(smallest, dec!(0), dec!(1), dec!(0));

        let result = compose(&input).unwrap();

        assert_eq!(result.company_tax, dec!(0.25));
        assert_eq!(result.effective_overall_rate, Decimal::MAX);
    }

    #[test]
    fn largest_amounts_are_rejected_not_overflowed() {
        let input = ScenarioInput::new(Decimal::MAX, Decimal::MAX, Decimal::MAX, dec!(0));

        assert_eq!(
            compose(&input),
            Err(ScenarioError::AllocationMismatch {
                allocated: Decimal::MAX,
                requested: Decimal::MAX,
            })
        );
    }

    #[test]
    fn largest_single_entity_split_composes() {
        let input = ScenarioInput::new(Decimal::MAX, dec!(0), Decimal::MAX, dec!(0))
            .with_company_rate(dec!(1.5));

        let result = compose(&input).unwrap();

        assert_eq!(result.company_tax, Decimal::MAX);
        assert_eq!(result.total_tax, Decimal::MAX);
    }

    #[test]
    fn zero_effective_rate_carries_cents() {
        let result = compose(&ScenarioInput::new(dec!(0), dec!(0), dec!(0), dec!(0))).unwrap();

        assert_eq!(result.effective_overall_rate.to_string(), "0.00");
        assert_eq!(result.individual_tax.to_string(), "0.00");
    }
}
