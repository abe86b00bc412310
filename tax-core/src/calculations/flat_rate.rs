//! Single-rate taxes for companies and superannuation funds.
//!
//! Rates are not range-checked. A rate above one or below zero simply
//! multiplies through; callers own the choice of rate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::calculations::common::round_half_up;
use crate::{EntityKind, TaxYearConfig};

/// `income × rate`, rounded to cents. Saturates at the `Decimal` limits.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::flat_rate_tax;
///
/// assert_eq!(flat_rate_tax(dec!(110000), dec!(0.25)), dec!(27500.00));
/// ```
pub fn flat_rate_tax(
    income: Decimal,
    rate: Decimal,
) -> Decimal {
    round_half_up(income.saturating_mul(rate))
}

/// Company tax at the 25% base-rate-entity rate.
pub fn company_tax(income: Decimal) -> Decimal {
    flat_rate_tax(income, TaxYearConfig::default_company_rate())
}

/// Fund tax on accumulation-phase earnings at 15%.
pub fn fund_tax(income: Decimal) -> Decimal {
    flat_rate_tax(income, TaxYearConfig::default_fund_rate())
}

/// A flat-rate tax bound to the entity it applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRateCalculator {
    pub kind: EntityKind,
    pub rate: Decimal,
}

impl FlatRateCalculator {
    pub fn new(
        kind: EntityKind,
        rate: Decimal,
    ) -> Self {
        Self { kind, rate }
    }

    pub fn company(rate: Decimal) -> Self {
        Self::new(EntityKind::Company, rate)
    }

    pub fn fund(rate: Decimal) -> Self {
        Self::new(EntityKind::Fund, rate)
    }

    pub fn calculate(
        &self,
        income: Decimal,
    ) -> Decimal {
        let tax = flat_rate_tax(income, self.rate);
        trace!(entity = %self.kind, %income, rate = %self.rate, %tax, "flat-rate tax");
        tax
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn flat_rate_tax_matches_rounded_product() {
        let cases = [
            (dec!(110000), dec!(0.25), dec!(27500.00)),
            (dec!(30000), dec!(0.15), dec!(4500.00)),
            (dec!(1234.57), dec!(0.15), dec!(185.19)),
            (dec!(0.03), dec!(0.25), dec!(0.01)),
        ];

        for (income, rate, expected) in cases {
            assert_eq!(flat_rate_tax(income, rate), expected, "{income} @ {rate}");
        }
    }

    #[test]
    fn flat_rate_tax_zero_rate_is_zero() {
        assert_eq!(flat_rate_tax(dec!(500000), dec!(0)), dec!(0));
    }

    #[test]
    fn flat_rate_tax_zero_income_is_zero() {
        assert_eq!(flat_rate_tax(dec!(0), dec!(0.25)), dec!(0));
    }

    #[test]
    fn flat_rate_tax_accepts_out_of_range_rate() {
        assert_eq!(flat_rate_tax(dec!(1000), dec!(1.5)), dec!(1500.00));
        assert_eq!(flat_rate_tax(dec!(1000), dec!(-0.1)), dec!(-100.00));
    }

    #[test]
    fn flat_rate_tax_negative_income_multiplies_through() {
        assert_eq!(flat_rate_tax(dec!(-2000), dec!(0.25)), dec!(-500.00));
    }

    #[test]
    fn flat_rate_tax_saturates_instead_of_overflowing() {
        assert_eq!(flat_rate_tax(Decimal::MAX, dec!(1.5)), Decimal::MAX);
        assert_eq!(flat_rate_tax(Decimal::MIN, dec!(1.5)), Decimal::MIN);
    }

    #[test]
    fn company_and_fund_defaults() {
        assert_eq!(company_tax(dec!(180000)), dec!(45000.00));
        assert_eq!(fund_tax(dec!(70000)), dec!(10500.00));
    }

    #[test]
    fn calculator_carries_kind_and_rate() {
        let company = FlatRateCalculator::company(dec!(0.30));
        let fund = FlatRateCalculator::fund(dec!(0.15));

        assert_eq!(company.kind, EntityKind::Company);
        assert_eq!(company.calculate(dec!(1000)), dec!(300.00));
        assert_eq!(fund.kind, EntityKind::Fund);
        assert_eq!(fund.calculate(dec!(1000)), dec!(150.00));
    }
}
