use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a rupee amount.
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseAmountError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

const LAKH: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);
const CRORE: Decimal = Decimal::from_parts(10_000_000, 0, 0, false, 0);

/// Trims whitespace, a leading `₹` and comma digit separators.
fn normalize_amount_input(s: &str) -> String {
    s.trim().trim_start_matches('₹').trim().replace(',', "")
}

/// Parses a rupee amount as typed on the command line.
///
/// Accepts either grouping style (`12,00,000` or `1,200,000`), an optional
/// `₹`, and the `L` (lakh) and `Cr` (crore) suffixes, so `12L` and
/// `1.2Cr` both work. Empty input is treated as 0.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let lower = normalized.to_ascii_lowercase();
    let (number, multiplier) = if let Some(n) = lower.strip_suffix("cr") {
        (n.trim(), CRORE)
    } else if let Some(n) = lower.strip_suffix('l') {
        (n.trim(), LAKH)
    } else {
        (lower.as_str(), Decimal::ONE)
    };

    number
        .parse::<Decimal>()
        .and_then(|value| {
            value
                .checked_mul(multiplier)
                .ok_or(rust_decimal::Error::ExceedsMaximumPossibleValue)
        })
        .map_err(|e| {
            tracing::error!(input = %s, "invalid amount: {}", e);
            ParseAmountError {
                input: s.to_string(),
                source: e,
            }
        })
}
