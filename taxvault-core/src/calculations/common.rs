//! Common helpers shared by the calculators.
//!
//! Rounding lives here so that the calculators themselves never round:
//! only presentation code (and the [`crate::format`] module) calls these.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::InvalidInput;

/// Rounds a decimal value to the nearest whole rupee, halves away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use taxvault_core::calculations::common::round_to_rupee;
///
/// assert_eq!(round_to_rupee(dec!(68750.49)), dec!(68750));
/// assert_eq!(round_to_rupee(dec!(68750.50)), dec!(68751));
/// assert_eq!(round_to_rupee(dec!(-0.5)), dec!(-1));
/// ```
pub fn round_to_rupee(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use taxvault_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(0.754)), dec!(0.75));
/// assert_eq!(round_half_up(dec!(0.755)), dec!(0.76));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `max(value, 0)`.
pub fn floor_at_zero(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Largest amount (₹10^20) any calculator accepts. Products of such an
/// amount with a percentage stay well inside [`Decimal`]'s range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0x6310_0000, 0x6BC7_5E2D, 0x5, false, 0);

/// `value × percentage / 100`.
///
/// Callers keep `value` within [`MAX_AMOUNT`] and `percentage` within 0..=100.
pub fn percent_of(
    value: Decimal,
    percentage: Decimal,
) -> Decimal {
    value * percentage / Decimal::ONE_HUNDRED
}

/// Rejects an amount above [`MAX_AMOUNT`], naming the offending field.
pub(crate) fn require_within_limit(
    field: &'static str,
    value: Decimal,
) -> Result<Decimal, InvalidInput> {
    if value > MAX_AMOUNT {
        tracing::warn!(field, %value, "rejecting oversized amount");
        return Err(InvalidInput::AmountTooLarge { field, value });
    }
    Ok(value)
}

/// Rejects a negative or oversized amount, naming the offending field.
pub(crate) fn require_non_negative(
    field: &'static str,
    value: Decimal,
) -> Result<Decimal, InvalidInput> {
    if value < Decimal::ZERO {
        tracing::warn!(field, %value, "rejecting negative amount");
        return Err(InvalidInput::NegativeAmount { field, value });
    }
    require_within_limit(field, value)
}

/// `part / whole × 100`, or [`InvalidInput::AmountTooLarge`] when the ratio
/// leaves `Decimal` range (a tiny `whole`). `whole` must be non-zero.
pub(crate) fn percentage_of_whole(
    field: &'static str,
    part: Decimal,
    whole: Decimal,
) -> Result<Decimal, InvalidInput> {
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or(InvalidInput::AmountTooLarge { field, value: part })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_to_rupee tests
    // =========================================================================

    #[test]
    fn round_to_rupee_rounds_down_below_midpoint() {
        assert_eq!(round_to_rupee(dec!(9099.49)), dec!(9099));
    }

    #[test]
    fn round_to_rupee_rounds_up_at_midpoint() {
        assert_eq!(round_to_rupee(dec!(9099.50)), dec!(9100));
    }

    #[test]
    fn round_to_rupee_handles_negative_values() {
        assert_eq!(round_to_rupee(dec!(-9099.50)), dec!(-9100)); // Away from zero
    }

    #[test]
    fn round_to_rupee_preserves_whole_values() {
        assert_eq!(round_to_rupee(dec!(9100)), dec!(9100));
    }

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
    }

    #[test]
    fn round_half_up_handles_small_values() {
        assert_eq!(round_half_up(dec!(0.001)), dec!(0.00));
    }

    // =========================================================================
    // floor_at_zero / percent_of tests
    // =========================================================================

    #[test]
    fn floor_at_zero_clamps_negatives() {
        assert_eq!(floor_at_zero(dec!(-75000)), Decimal::ZERO);
        assert_eq!(floor_at_zero(dec!(12)), dec!(12));
    }

    #[test]
    fn percent_of_is_exact() {
        assert_eq!(percent_of(dec!(8750), dec!(4)), dec!(350));
        assert_eq!(percent_of(dec!(0.25), dec!(5)), dec!(0.0125));
    }

    // =========================================================================
    // require_non_negative tests
    // =========================================================================

    #[test]
    fn require_non_negative_accepts_zero() {
        assert_eq!(require_non_negative("balance", Decimal::ZERO), Ok(Decimal::ZERO));
    }

    #[test]
    fn require_non_negative_names_the_field() {
        assert_eq!(
            require_non_negative("balance", dec!(-1)),
            Err(InvalidInput::NegativeAmount {
                field: "balance",
                value: dec!(-1),
            })
        );
    }

    #[test]
    fn max_amount_is_ten_to_the_twentieth() {
        assert_eq!(MAX_AMOUNT, dec!(100000000000000000000));
    }

    #[test]
    fn require_non_negative_rejects_amounts_above_the_limit() {
        assert_eq!(require_non_negative("balance", MAX_AMOUNT), Ok(MAX_AMOUNT));
        assert_eq!(
            require_non_negative("balance", Decimal::MAX),
            Err(InvalidInput::AmountTooLarge {
                field: "balance",
                value: Decimal::MAX,
            })
        );
    }

    // =========================================================================
    // percentage_of_whole tests
    // =========================================================================

    #[test]
    fn percentage_of_whole_is_exact() {
        assert_eq!(percentage_of_whole("balance", dec!(4550), dec!(9100)), Ok(dec!(50)));
    }

    #[test]
    fn percentage_of_whole_reports_overflow() {
        assert_eq!(
            percentage_of_whole("balance", MAX_AMOUNT, dec!(0.0000000001)),
            Err(InvalidInput::AmountTooLarge {
                field: "balance",
                value: MAX_AMOUNT,
            })
        );
    }
}
