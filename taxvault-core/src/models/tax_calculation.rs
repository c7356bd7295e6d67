use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Regime;

/// Tax contributed by the portion of income falling inside one slab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlabBreakdown {
    pub slab_label: String,
    /// Slab rate as a percentage.
    pub rate: Decimal,
    pub amount_taxed: Decimal,
    pub tax: Decimal,
}

/// Full outcome of one income-tax calculation.
///
/// Amounts are unrounded; rounding to whole rupees is a presentation concern
/// (see [`crate::format`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCalculationResult {
    pub regime: Regime,
    pub gross_income: Decimal,
    pub standard_deduction: Decimal,
    /// Itemized deductions actually subtracted (always zero under NEW).
    pub itemized_deductions: Decimal,
    pub taxable_income: Decimal,
    pub breakdown: Vec<SlabBreakdown>,
    /// Label of the highest slab the taxable income reached.
    pub marginal_slab: Option<String>,
    pub tax_before_rebate: Decimal,
    pub rebate: Decimal,
    pub tax_after_rebate: Decimal,
    pub cess: Decimal,
    pub total_tax: Decimal,
    /// `total_tax` as a percentage of `gross_income`.
    pub effective_rate: Decimal,
}

impl TaxCalculationResult {
    /// Result for income that never leaves the zero-rate band.
    pub(crate) fn zero_tax(
        regime: Regime,
        gross_income: Decimal,
        standard_deduction: Decimal,
        itemized_deductions: Decimal,
        taxable_income: Decimal,
    ) -> Self {
        Self {
            regime,
            gross_income,
            standard_deduction,
            itemized_deductions,
            taxable_income,
            breakdown: Vec::new(),
            marginal_slab: None,
            tax_before_rebate: Decimal::ZERO,
            rebate: Decimal::ZERO,
            tax_after_rebate: Decimal::ZERO,
            cess: Decimal::ZERO,
            total_tax: Decimal::ZERO,
            effective_rate: Decimal::ZERO,
        }
    }

    pub fn is_zero_tax(&self) -> bool {
        self.total_tax.is_zero()
    }

    /// Sum of the per-slab taxes; always equals `tax_before_rebate`.
    pub fn breakdown_total(&self) -> Decimal {
        self.breakdown.iter().map(|line| line.tax).sum()
    }
}
