//! The tax vault: money set aside from each payment to meet the year's tax.
//!
//! Everything here reports on a vault balance the caller tracks; nothing is
//! stored. Percentages are unrounded unless stated otherwise.

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{
    floor_at_zero, percent_of, percentage_of_whole, require_non_negative, require_within_limit,
};
use crate::error::InvalidInput;
use crate::models::TaxSettings;

/// Share of every business payment moved into the vault, as a percentage.
pub const AUTO_SAVE_PERCENTAGE: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Amount to vault from a single `payment`.
///
/// # Errors
///
/// [`InvalidInput::NegativeAmount`] if `payment` is negative.
pub fn auto_save_amount(payment: Decimal) -> Result<Decimal, InvalidInput> {
    let payment = require_non_negative("payment", payment)?;
    Ok(percent_of(payment, AUTO_SAVE_PERCENTAGE))
}

/// How far the vault goes towards `settings.target_vault_amount`, as a
/// percentage. `None` when no target is set.
///
/// # Errors
///
/// [`InvalidInput::NegativeAmount`] if `vault_balance` is negative, or
/// [`InvalidInput::AmountTooLarge`] if the percentage cannot be represented.
pub fn target_progress(
    vault_balance: Decimal,
    settings: &TaxSettings,
) -> Result<Option<Decimal>, InvalidInput> {
    let vault_balance = require_non_negative("vault_balance", vault_balance)?;
    if settings.target_vault_amount <= Decimal::ZERO {
        return Ok(None);
    }
    percentage_of_whole("vault_balance", vault_balance, settings.target_vault_amount).map(Some)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoverageLevel {
    /// 100% or more of the liability is vaulted.
    FullyCovered,
    /// At least half.
    Partial,
    Low,
}

impl CoverageLevel {
    fn from_percentage(coverage: Decimal) -> Self {
        if coverage >= Decimal::ONE_HUNDRED {
            Self::FullyCovered
        } else if coverage >= Decimal::from(50) {
            Self::Partial
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for CoverageLevel {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let label = match self {
            Self::FullyCovered => "Fully covered",
            Self::Partial => "Partially covered",
            Self::Low => "Low",
        };
        f.write_str(label)
    }
}

/// Vault balance measured against the year's total tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultCoverage {
    pub vault_balance: Decimal,
    pub total_tax: Decimal,
    pub percentage: Decimal,
    pub level: CoverageLevel,
    /// Still to be vaulted before the liability is covered.
    pub shortfall: Decimal,
    /// Vaulted beyond the liability.
    pub surplus: Decimal,
}

impl VaultCoverage {
    /// Measures `vault_balance` against `total_tax`.
    ///
    /// Nothing owed counts as fully covered; an empty vault against a
    /// non-zero liability is 0%.
    ///
    /// # Errors
    ///
    /// [`InvalidInput`] if either amount is negative.
    pub fn assess(
        vault_balance: Decimal,
        total_tax: Decimal,
    ) -> Result<Self, InvalidInput> {
        let vault_balance = require_non_negative("vault_balance", vault_balance)?;
        if total_tax < Decimal::ZERO {
            return Err(InvalidInput::NegativeTaxLiability(total_tax));
        }
        let total_tax = require_within_limit("total_tax", total_tax)?;

        let percentage = if total_tax.is_zero() {
            Decimal::ONE_HUNDRED
        } else if vault_balance.is_zero() {
            Decimal::ZERO
        } else {
            percentage_of_whole("vault_balance", vault_balance, total_tax)?
        };

        Ok(Self {
            vault_balance,
            total_tax,
            percentage,
            level: CoverageLevel::from_percentage(percentage),
            shortfall: floor_at_zero(total_tax - vault_balance),
            surplus: floor_at_zero(vault_balance - total_tax),
        })
    }

    pub fn is_fully_covered(&self) -> bool {
        self.level == CoverageLevel::FullyCovered
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthStatus {
    Good,
    Fair,
    NeedsAttention,
}

impl HealthStatus {
    fn from_score(score: u8) -> Self {
        match score {
            71.. => Self::Good,
            41..=70 => Self::Fair,
            _ => Self::NeedsAttention,
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let label = match self {
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::NeedsAttention => "Needs Attention",
        };
        f.write_str(label)
    }
}

/// A 0-100 score blending the savings rate with vault coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialHealth {
    /// `(income - expenses) / income`, as a whole percentage.
    pub savings_rate: Decimal,
    /// `vault_balance / tax_liability`, as a whole percentage.
    pub vault_coverage: Decimal,
    pub score: u8,
    pub status: HealthStatus,
}

impl FinancialHealth {
    /// Scores a freelancer's year.
    ///
    /// Both component percentages are rounded to whole numbers before they
    /// are averaged; the average is rounded again and clamped to `0..=100`.
    ///
    /// # Errors
    ///
    /// [`InvalidInput`] if `income` or `tax_liability` is zero or negative,
    /// or if `expenses` or `vault_balance` is negative.
    pub fn score(
        income: Decimal,
        expenses: Decimal,
        vault_balance: Decimal,
        tax_liability: Decimal,
    ) -> Result<Self, InvalidInput> {
        let income = require_positive("income", income)?;
        let expenses = require_non_negative("expenses", expenses)?;
        let vault_balance = require_non_negative("vault_balance", vault_balance)?;
        if tax_liability < Decimal::ZERO {
            return Err(InvalidInput::NegativeTaxLiability(tax_liability));
        }
        let tax_liability = require_positive("tax_liability", tax_liability)?;

        let savings_rate = round_whole(percentage_of_whole("expenses", income - expenses, income)?);
        let vault_coverage =
            round_whole(percentage_of_whole("vault_balance", vault_balance, tax_liability)?);
        let average = savings_rate
            .checked_add(vault_coverage)
            .map(|sum| round_whole(sum / Decimal::TWO))
            .ok_or(InvalidInput::AmountTooLarge {
                field: "vault_balance",
                value: vault_balance,
            })?;
        let score = average
            .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
            .to_u8()
            .unwrap_or_default();

        debug!(%savings_rate, %vault_coverage, score, "financial health scored");

        Ok(Self {
            savings_rate,
            vault_coverage,
            score,
            status: HealthStatus::from_score(score),
        })
    }

    /// One-line advice matching the score.
    pub fn priority(&self) -> &'static str {
        if self.score < 50 {
            "Increase tax vault contributions"
        } else {
            "Maintain current savings"
        }
    }
}

fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

fn require_positive(
    field: &'static str,
    value: Decimal,
) -> Result<Decimal, InvalidInput> {
    let value = require_non_negative(field, value)?;
    if value.is_zero() {
        return Err(InvalidInput::ZeroAmount(field));
    }
    Ok(value)
}
