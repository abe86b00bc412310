use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One contiguous income range taxed at a single marginal rate.
///
/// `max_income` is inclusive; `None` marks the open-ended top bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
}

impl TaxBracket {
    pub fn new(
        min_income: Decimal,
        max_income: Option<Decimal>,
        tax_rate: Decimal,
    ) -> Self {
        Self {
            min_income,
            max_income,
            tax_rate,
        }
    }
}

/// Defects that make a bracket table unusable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketScheduleError {
    #[error("bracket schedule is empty")]
    Empty,

    #[error("first bracket must start at 0, got {0}")]
    FirstBracketNotAtZero(Decimal),

    #[error("bracket {index} must start at {expected}, got {found}")]
    Gap {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    #[error("bracket {index} has no upper bound but is not the last bracket")]
    MissingUpperBound { index: usize },

    #[error("bracket {index} has an upper bound below its lower bound")]
    InvertedBounds { index: usize },

    #[error("final bracket must be unbounded")]
    FinalBracketBounded,

    #[error("bracket {index} has rate {rate} outside 0..=1")]
    InvalidRate { index: usize, rate: Decimal },
}

/// An ordered, gap-free sequence of brackets covering `[0, ∞)`.
///
/// Published tables use whole-dollar bounds, so each bracket starts one
/// dollar above the previous bracket's inclusive upper bound.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::{BracketSchedule, TaxBracket};
///
/// let schedule = BracketSchedule::new(vec![
///     TaxBracket::new(dec!(0), Some(dec!(10000)), dec!(0)),
///     TaxBracket::new(dec!(10001), None, dec!(0.20)),
/// ])
/// .unwrap();
///
/// assert_eq!(schedule.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxBracket>", into = "Vec<TaxBracket>")]
pub struct BracketSchedule {
    brackets: Vec<TaxBracket>,
}

impl BracketSchedule {
    /// Validates and wraps `brackets`.
    ///
    /// # Errors
    ///
    /// Returns [`BracketScheduleError`] naming the first defect found.
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, BracketScheduleError> {
        let first = brackets.first().ok_or(BracketScheduleError::Empty)?;
        if !first.min_income.is_zero() {
            return Err(BracketScheduleError::FirstBracketNotAtZero(
                first.min_income,
            ));
        }

        let last_index = brackets.len() - 1;
        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.tax_rate < Decimal::ZERO || bracket.tax_rate > Decimal::ONE {
                return Err(BracketScheduleError::InvalidRate {
                    index,
                    rate: bracket.tax_rate,
                });
            }

            match bracket.max_income {
                Some(max) if max < bracket.min_income => {
                    return Err(BracketScheduleError::InvertedBounds { index });
                }
                Some(_) if index == last_index => {
                    return Err(BracketScheduleError::FinalBracketBounded);
                }
                None if index != last_index => {
                    return Err(BracketScheduleError::MissingUpperBound { index });
                }
                _ => {}
            }

            if let Some(next) = brackets.get(index + 1) {
                // Bounded here; checked above.
                let expected = bracket.max_income.unwrap_or_default() + Decimal::ONE;
                if next.min_income != expected {
                    return Err(BracketScheduleError::Gap {
                        index: index + 1,
                        expected,
                        found: next.min_income,
                    });
                }
            }
        }

        Ok(Self { brackets })
    }

    /// Australian resident individual rates for the 2025-26 financial year.
    pub fn resident_2025_26() -> Self {
        Self {
            brackets: vec![
                TaxBracket::new(Decimal::ZERO, Some(Decimal::from(18_200)), Decimal::ZERO),
                TaxBracket::new(
                    Decimal::from(18_201),
                    Some(Decimal::from(45_000)),
                    Decimal::new(16, 2),
                ),
                TaxBracket::new(
                    Decimal::from(45_001),
                    Some(Decimal::from(135_000)),
                    Decimal::new(30, 2),
                ),
                TaxBracket::new(
                    Decimal::from(135_001),
                    Some(Decimal::from(190_000)),
                    Decimal::new(37, 2),
                ),
                TaxBracket::new(Decimal::from(190_001), None, Decimal::new(45, 2)),
            ],
        }
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TaxBracket> {
        self.brackets.iter()
    }
}

impl TryFrom<Vec<TaxBracket>> for BracketSchedule {
    type Error = BracketScheduleError;

    fn try_from(brackets: Vec<TaxBracket>) -> Result<Self, Self::Error> {
        Self::new(brackets)
    }
}

impl From<BracketSchedule> for Vec<TaxBracket> {
    fn from(schedule: BracketSchedule) -> Self {
        schedule.brackets
    }
}

impl<'a> IntoIterator for &'a BracketSchedule {
    type Item = &'a TaxBracket;
    type IntoIter = std::slice::Iter<'a, TaxBracket>;

    fn into_iter(self) -> Self::IntoIter {
        self.brackets.iter()
    }
}
