//! Progressive income-tax calculation under the Indian slab system.
//!
//! # Calculation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Standard deduction for the regime |
//! | 2    | Taxable income = gross − standard − itemized (itemized only under OLD), minimum 0 |
//! | 3    | Taxable income within the zero-rate band → no tax, empty breakdown |
//! | 4    | Marginal tax, slab by slab |
//! | 5    | Section 87A rebate (NEW only, taxable income at or below the ceiling) |
//! | 6    | Health & education cess on post-rebate tax |
//! | 7    | Total tax and effective rate |
//!
//! No step rounds. Breakdown lines therefore sum exactly to the pre-rebate
//! tax; round with [`crate::format`] when displaying.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use taxvault_core::calculations::IncomeTaxCalculator;
//! use taxvault_core::{Regime, TaxTable};
//!
//! let table = TaxTable::fy_2025_26();
//! let calculator = IncomeTaxCalculator::new(&table);
//! let result = calculator
//!     .calculate(dec!(1200000), dec!(0), Regime::New)
//!     .unwrap();
//!
//! assert_eq!(result.taxable_income, dec!(1125000));
//! assert_eq!(result.tax_before_rebate, dec!(68750));
//! assert_eq!(result.rebate, dec!(60000));
//! assert_eq!(result.cess, dec!(350));
//! assert_eq!(result.total_tax, dec!(9100));
//! ```

use std::sync::LazyLock;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::{floor_at_zero, percent_of, require_within_limit};
use crate::error::InvalidInput;
use crate::models::{
    Rebate, Regime, RegimeRules, SlabBreakdown, SlabSchedule, TaxCalculationResult, TaxSettings,
    TaxTable,
};

static DEFAULT_TABLE: LazyLock<TaxTable> = LazyLock::new(TaxTable::default);

/// Calculates tax against the built-in FY 2025-26 table.
///
/// `itemized_deductions` is honoured only under [`Regime::Old`].
///
/// # Errors
///
/// [`InvalidInput`] when income or deductions are negative or above
/// [`MAX_AMOUNT`](crate::calculations::common::MAX_AMOUNT).
pub fn calculate_tax(
    gross_annual_income: Decimal,
    itemized_deductions: Decimal,
    regime: Regime,
) -> Result<TaxCalculationResult, InvalidInput> {
    IncomeTaxCalculator::new(&DEFAULT_TABLE).calculate(
        gross_annual_income,
        itemized_deductions,
        regime,
    )
}

/// Calculator bound to one [`TaxTable`].
#[derive(Debug, Clone, Copy)]
pub struct IncomeTaxCalculator<'a> {
    table: &'a TaxTable,
}

impl<'a> IncomeTaxCalculator<'a> {
    pub fn new(table: &'a TaxTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'a TaxTable {
        self.table
    }

    /// Runs every calculation step and returns the full breakdown.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput::NegativeIncome`] or
    /// [`InvalidInput::NegativeDeductions`]; negative amounts are never
    /// clamped to zero. Amounts above
    /// [`MAX_AMOUNT`](crate::calculations::common::MAX_AMOUNT) return
    /// [`InvalidInput::AmountTooLarge`].
    pub fn calculate(
        &self,
        gross_income: Decimal,
        itemized_deductions: Decimal,
        regime: Regime,
    ) -> Result<TaxCalculationResult, InvalidInput> {
        if gross_income < Decimal::ZERO {
            warn!(%gross_income, "rejecting negative gross income");
            return Err(InvalidInput::NegativeIncome(gross_income));
        }
        if itemized_deductions < Decimal::ZERO {
            warn!(%itemized_deductions, "rejecting negative deductions");
            return Err(InvalidInput::NegativeDeductions(itemized_deductions));
        }
        require_within_limit("gross_income", gross_income)?;
        require_within_limit("itemized_deductions", itemized_deductions)?;

        let rules = self.table.rules(regime);

        // Steps 1-2
        let itemized_applied = self.applicable_itemized(rules, itemized_deductions);
        let taxable_income =
            self.taxable_income(gross_income, rules.standard_deduction, itemized_applied);

        // Step 3
        if taxable_income <= rules.slabs.zero_rate_threshold() {
            debug!(%regime, %taxable_income, "taxable income within zero-rate band");
            return Ok(TaxCalculationResult::zero_tax(
                regime,
                gross_income,
                rules.standard_deduction,
                itemized_applied,
                taxable_income,
            ));
        }

        // Step 4
        let breakdown = self.slab_breakdown(&rules.slabs, taxable_income);
        let tax_before_rebate: Decimal = breakdown.iter().map(|line| line.tax).sum();

        // Step 5
        let rebate = self.rebate(rules.rebate, taxable_income, tax_before_rebate);
        let tax_after_rebate = floor_at_zero(tax_before_rebate - rebate);

        // Steps 6-7
        let cess = self.cess(tax_after_rebate);
        let total_tax = tax_after_rebate + cess;
        let effective_rate = self.effective_rate(total_tax, gross_income);

        debug!(
            %regime,
            %taxable_income,
            %tax_before_rebate,
            %rebate,
            %total_tax,
            "income tax calculated"
        );

        Ok(TaxCalculationResult {
            regime,
            gross_income,
            standard_deduction: rules.standard_deduction,
            itemized_deductions: itemized_applied,
            taxable_income,
            breakdown,
            marginal_slab: Some(rules.slabs.slab_for(taxable_income).label.clone()),
            tax_before_rebate,
            rebate,
            tax_after_rebate,
            cess,
            total_tax,
            effective_rate,
        })
    }

    /// Calculates with the regime and itemized deductions a taxpayer elected.
    ///
    /// # Errors
    ///
    /// Same as [`IncomeTaxCalculator::calculate`].
    pub fn calculate_with_settings(
        &self,
        gross_income: Decimal,
        settings: &TaxSettings,
    ) -> Result<TaxCalculationResult, InvalidInput> {
        self.calculate(gross_income, settings.itemized_deductions(), settings.regime)
    }

    /// Itemized deductions the regime honours (zero when it allows none).
    fn applicable_itemized(
        &self,
        rules: &RegimeRules,
        itemized: Decimal,
    ) -> Decimal {
        if rules.itemized_deductions_allowed {
            itemized
        } else {
            Decimal::ZERO
        }
    }

    fn taxable_income(
        &self,
        gross_income: Decimal,
        standard_deduction: Decimal,
        itemized: Decimal,
    ) -> Decimal {
        floor_at_zero(gross_income - standard_deduction - itemized)
    }

    /// One line per slab that holds a non-zero slice of the taxable income.
    fn slab_breakdown(
        &self,
        slabs: &SlabSchedule,
        taxable_income: Decimal,
    ) -> Vec<SlabBreakdown> {
        slabs
            .slabs()
            .iter()
            .take_while(|slab| slab.lower_bound < taxable_income)
            .filter_map(|slab| {
                let amount_taxed = slab.segment_of(taxable_income);
                (amount_taxed > Decimal::ZERO).then(|| SlabBreakdown {
                    slab_label: slab.label.clone(),
                    rate: slab.rate,
                    amount_taxed,
                    tax: percent_of(amount_taxed, slab.rate),
                })
            })
            .collect()
    }

    /// Rebate owed at this taxable income.
    ///
    /// Income exactly at the ceiling still qualifies; one rupee above loses
    /// the rebate entirely.
    fn rebate(
        &self,
        rebate: Option<Rebate>,
        taxable_income: Decimal,
        tax_before_rebate: Decimal,
    ) -> Decimal {
        match rebate {
            Some(rebate) if taxable_income <= rebate.ceiling => tax_before_rebate.min(rebate.cap),
            _ => Decimal::ZERO,
        }
    }

    fn cess(
        &self,
        tax_after_rebate: Decimal,
    ) -> Decimal {
        percent_of(tax_after_rebate, self.table.cess_rate)
    }

    fn effective_rate(
        &self,
        total_tax: Decimal,
        gross_income: Decimal,
    ) -> Decimal {
        if gross_income > Decimal::ZERO {
            total_tax / gross_income * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        }
    }
}
