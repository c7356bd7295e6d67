use rust_decimal::Decimal;
use thiserror::Error;

/// Caller contract violations rejected by the calculators.
///
/// Nothing in this crate clamps bad input into a plausible value; every
/// operation that receives a negative amount or an unrecognised regime code
/// returns one of these instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("gross income must be non-negative, got {0}")]
    NegativeIncome(Decimal),

    #[error("deductions must be non-negative, got {0}")]
    NegativeDeductions(Decimal),

    #[error("unknown tax regime '{0}' (expected NEW or OLD)")]
    UnknownRegime(String),

    #[error("tax liability must be non-negative, got {0}")]
    NegativeTaxLiability(Decimal),

    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    #[error("{0} must be greater than zero")]
    ZeroAmount(&'static str),

    #[error("{field} of {value} is larger than the calculators support")]
    AmountTooLarge { field: &'static str, value: Decimal },
}
