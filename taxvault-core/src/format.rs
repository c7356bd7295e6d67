//! Display formatting for rupee amounts and rates.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::calculations::common::round_to_rupee;

/// Formats `amount` as whole rupees with Indian digit grouping.
///
/// The last three digits form one group and every two digits before that
/// form another, so twelve lakh prints as `₹12,00,000`.
///
/// ```
/// use rust_decimal_macros::dec;
/// use taxvault_core::format::format_inr;
///
/// assert_eq!(format_inr(dec!(1200000)), "₹12,00,000");
/// assert_eq!(format_inr(dec!(9099.5)), "₹9,100");
/// assert_eq!(format_inr(dec!(-500)), "-₹500");
/// ```
pub fn format_inr(amount: Decimal) -> String {
    let rounded = round_to_rupee(amount);
    let digits = rounded.abs().normalize().to_string();
    let grouped = group_indian(&digits);

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}

/// Formats a percentage with `dp` decimal places, e.g. `0.76%`.
pub fn format_percent(
    rate: Decimal,
    dp: u32,
) -> String {
    let rounded = rate.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.prec$}%", prec = dp as usize)
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{tail}", groups.join(","))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn small_amounts_are_not_grouped() {
        assert_eq!(format_inr(dec!(0)), "₹0");
        assert_eq!(format_inr(dec!(350)), "₹350");
    }

    #[test]
    fn groups_thousands_lakhs_and_crores() {
        assert_eq!(format_inr(dec!(9100)), "₹9,100");
        assert_eq!(format_inr(dec!(68750)), "₹68,750");
        assert_eq!(format_inr(dec!(1125000)), "₹11,25,000");
        assert_eq!(format_inr(dec!(12345678)), "₹1,23,45,678");
        assert_eq!(format_inr(dec!(1000000000)), "₹1,00,00,00,000");
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(format_inr(dec!(83200.208)), "₹83,200");
        assert_eq!(format_inr(dec!(999.5)), "₹1,000");
        assert_eq!(format_inr(dec!(-2.5)), "-₹3");
    }

    #[test]
    fn tiny_negative_rounds_to_plain_zero() {
        assert_eq!(format_inr(dec!(-0.4)), "₹0");
    }

    #[test]
    fn percent_formatting() {
        assert_eq!(format_percent(dec!(0.758333), 2), "0.76%");
        assert_eq!(format_percent(dec!(5), 0), "5%");
        assert_eq!(format_percent(dec!(4), 1), "4.0%");
    }
}
