use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Regime, SlabSchedule, TaxSlab};

/// Section 87A-style rebate available under a regime.
///
/// When taxable income is at or below `ceiling`, tax is reduced by the
/// smaller of the computed tax and `cap`. Above the ceiling nothing is
/// rebated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rebate {
    pub ceiling: Decimal,
    pub cap: Decimal,
}

/// Policy parameters for a single regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeRules {
    pub regime: Regime,
    pub slabs: SlabSchedule,
    pub standard_deduction: Decimal,
    pub itemized_deductions_allowed: bool,
    pub rebate: Option<Rebate>,
}

/// The authoritative slab table and policy constants for a financial year.
///
/// Every consumer (calculator, planner, notification templates, CLI) reads
/// the same `TaxTable`; alternative slab tables are swapped in with
/// [`TaxTable::with_slabs`] rather than by editing code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxTable {
    pub financial_year: String,
    /// Health & education cess as a percentage of post-rebate tax.
    pub cess_rate: Decimal,
    pub new_regime: RegimeRules,
    pub old_regime: RegimeRules,
}

impl TaxTable {
    /// Built-in table for FY 2025-26.
    pub fn fy_2025_26() -> Self {
        Self {
            financial_year: "2025-26".to_string(),
            cess_rate: Decimal::from(4),
            new_regime: RegimeRules {
                regime: Regime::New,
                slabs: new_regime_slabs(),
                standard_deduction: Decimal::from(75_000),
                itemized_deductions_allowed: false,
                rebate: Some(Rebate {
                    ceiling: Decimal::from(1_200_000),
                    cap: Decimal::from(60_000),
                }),
            },
            old_regime: RegimeRules {
                regime: Regime::Old,
                slabs: old_regime_slabs(),
                standard_deduction: Decimal::from(50_000),
                itemized_deductions_allowed: true,
                rebate: None,
            },
        }
    }

    pub fn rules(
        &self,
        regime: Regime,
    ) -> &RegimeRules {
        match regime {
            Regime::New => &self.new_regime,
            Regime::Old => &self.old_regime,
        }
    }

    /// Returns a copy of this table with `regime`'s slabs replaced.
    pub fn with_slabs(
        mut self,
        regime: Regime,
        slabs: SlabSchedule,
    ) -> Self {
        match regime {
            Regime::New => self.new_regime.slabs = slabs,
            Regime::Old => self.old_regime.slabs = slabs,
        }
        self
    }

    /// Fiscal-year start, parsed from a label such as `"2025-26"`.
    pub fn start_year(&self) -> Option<i32> {
        self.financial_year.split('-').next()?.trim().parse().ok()
    }
}

impl Default for TaxTable {
    fn default() -> Self {
        Self::fy_2025_26()
    }
}

fn lakh(n: i64) -> Decimal {
    Decimal::from(n * 100_000)
}

fn new_regime_slabs() -> SlabSchedule {
    SlabSchedule::new(vec![
        TaxSlab::new(Decimal::ZERO, Some(lakh(3)), Decimal::ZERO, "Up to ₹3L"),
        TaxSlab::new(lakh(3), Some(lakh(7)), Decimal::from(5), "₹3L - ₹7L"),
        TaxSlab::new(lakh(7), Some(lakh(10)), Decimal::from(10), "₹7L - ₹10L"),
        TaxSlab::new(lakh(10), Some(lakh(12)), Decimal::from(15), "₹10L - ₹12L"),
        TaxSlab::new(lakh(12), Some(lakh(15)), Decimal::from(20), "₹12L - ₹15L"),
        TaxSlab::new(lakh(15), None, Decimal::from(30), "Above ₹15L"),
    ])
    .unwrap_or_else(|e| unreachable!("built-in NEW regime table is invalid: {e}"))
}

fn old_regime_slabs() -> SlabSchedule {
    let two_and_half_lakh = Decimal::from(250_000);
    SlabSchedule::new(vec![
        TaxSlab::new(Decimal::ZERO, Some(two_and_half_lakh), Decimal::ZERO, "Up to ₹2.5L"),
        TaxSlab::new(two_and_half_lakh, Some(lakh(5)), Decimal::from(5), "₹2.5L - ₹5L"),
        TaxSlab::new(lakh(5), Some(lakh(10)), Decimal::from(20), "₹5L - ₹10L"),
        TaxSlab::new(lakh(10), None, Decimal::from(30), "Above ₹10L"),
    ])
    .unwrap_or_else(|e| unreachable!("built-in OLD regime table is invalid: {e}"))
}
