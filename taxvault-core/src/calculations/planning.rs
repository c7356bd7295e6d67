//! Deduction planning: regime comparison and savings simulation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::IncomeTaxCalculator;
use crate::error::InvalidInput;
use crate::models::{Regime, TaxCalculationResult, TaxSettings, TaxTable};

/// Side-by-side liability under both regimes for the same elections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeComparison {
    pub new_regime: TaxCalculationResult,
    pub old_regime: TaxCalculationResult,
    /// Regime with the lower total tax; NEW on a tie.
    pub recommended: Regime,
    /// How much the recommended regime saves over the other one.
    pub savings: Decimal,
}

impl RegimeComparison {
    pub fn result_for(
        &self,
        regime: Regime,
    ) -> &TaxCalculationResult {
        match regime {
            Regime::New => &self.new_regime,
            Regime::Old => &self.old_regime,
        }
    }
}

/// Total tax for one income under three levels of planning, all in the
/// settings' regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsSimulation {
    pub regime: Regime,
    /// No itemized deductions at all.
    pub no_planning: Decimal,
    /// The deductions the settings elect.
    pub with_plan: Decimal,
    /// Every deduction at its statutory cap.
    pub fully_optimized: Decimal,
    pub plan_savings: Decimal,
    pub optimized_savings: Decimal,
}

/// Calculates `gross_income` under both regimes using the same elections.
///
/// # Errors
///
/// [`InvalidInput`] if `gross_income` is negative.
pub fn compare_regimes(
    gross_income: Decimal,
    settings: &TaxSettings,
    table: &TaxTable,
) -> Result<RegimeComparison, InvalidInput> {
    let calculator = IncomeTaxCalculator::new(table);
    let itemized = settings.itemized_deductions();

    let new_regime = calculator.calculate(gross_income, itemized, Regime::New)?;
    let old_regime = calculator.calculate(gross_income, itemized, Regime::Old)?;

    let (recommended, savings) = if old_regime.total_tax < new_regime.total_tax {
        (Regime::Old, new_regime.total_tax - old_regime.total_tax)
    } else {
        (Regime::New, old_regime.total_tax - new_regime.total_tax)
    };
    debug!(%gross_income, %recommended, %savings, "regimes compared");

    Ok(RegimeComparison {
        new_regime,
        old_regime,
        recommended,
        savings,
    })
}

/// Shows what the settings' deductions save, and what maxing them out would.
///
/// Under the NEW regime itemized deductions do not apply, so all three
/// totals coincide and both savings are zero.
///
/// # Errors
///
/// [`InvalidInput`] if `gross_income` is negative.
pub fn simulate_savings(
    gross_income: Decimal,
    settings: &TaxSettings,
    table: &TaxTable,
) -> Result<SavingsSimulation, InvalidInput> {
    let calculator = IncomeTaxCalculator::new(table);
    let regime = settings.regime;

    let no_planning = calculator
        .calculate(gross_income, Decimal::ZERO, regime)?
        .total_tax;
    let with_plan = calculator
        .calculate_with_settings(gross_income, settings)?
        .total_tax;
    let fully_optimized = calculator
        .calculate_with_settings(gross_income, &settings.fully_optimized())?
        .total_tax;

    Ok(SavingsSimulation {
        regime,
        no_planning,
        with_plan,
        fully_optimized,
        plan_savings: no_planning - with_plan,
        optimized_savings: no_planning - fully_optimized,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{SlabSchedule, TaxSlab};

    fn old_regime_plan() -> TaxSettings {
        TaxSettings::new(Regime::Old)
            .with_section_80c(dec!(150000))
            .with_section_80d(true)
    }

    // =========================================================================
    // simulate_savings
    // =========================================================================

    #[test]
    fn old_regime_savings_simulation() {
        let sim = simulate_savings(dec!(1000000), &old_regime_plan(), &TaxTable::default()).unwrap();

        assert_eq!(sim.no_planning, dec!(106600));
        assert_eq!(sim.with_plan, dec!(70200));
        assert_eq!(sim.fully_optimized, dec!(59800));
        assert_eq!(sim.plan_savings, dec!(36400));
        assert_eq!(sim.optimized_savings, dec!(46800));
    }

    #[test]
    fn new_regime_planning_saves_nothing() {
        let settings = old_regime_plan().with_regime(Regime::New);
        let sim = simulate_savings(dec!(1800000), &settings, &TaxTable::default()).unwrap();

        assert_eq!(sim.no_planning, sim.with_plan);
        assert_eq!(sim.no_planning, sim.fully_optimized);
        assert_eq!(sim.plan_savings, Decimal::ZERO);
        assert_eq!(sim.optimized_savings, Decimal::ZERO);
    }

    #[test]
    fn simulation_rejects_negative_income() {
        assert_eq!(
            simulate_savings(dec!(-5), &TaxSettings::default(), &TaxTable::default()),
            Err(InvalidInput::NegativeIncome(dec!(-5)))
        );
    }

    // =========================================================================
    // compare_regimes
    // =========================================================================

    #[test]
    fn new_regime_wins_at_twelve_lakh() {
        let comparison =
            compare_regimes(dec!(1200000), &TaxSettings::default(), &TaxTable::default()).unwrap();

        assert_eq!(comparison.new_regime.total_tax, dec!(9100));
        assert_eq!(comparison.old_regime.total_tax, dec!(163800));
        assert_eq!(comparison.recommended, Regime::New);
        assert_eq!(comparison.savings, dec!(154700));
    }

    #[test]
    fn tie_recommends_new_regime() {
        let comparison =
            compare_regimes(Decimal::ZERO, &TaxSettings::default(), &TaxTable::default()).unwrap();

        assert_eq!(comparison.recommended, Regime::New);
        assert_eq!(comparison.savings, Decimal::ZERO);
    }

    #[test]
    fn old_regime_recommended_when_cheaper() {
        let steep = SlabSchedule::new(vec![TaxSlab::new(dec!(0), None, dec!(30), "flat 30%")]).unwrap();
        let table = TaxTable::default().with_slabs(Regime::New, steep);
        let settings = old_regime_plan().with_nps(true);

        let comparison = compare_regimes(dec!(1000000), &settings, &table).unwrap();

        assert_eq!(comparison.new_regime.total_tax, dec!(226200));
        assert_eq!(comparison.old_regime.total_tax, dec!(59800));
        assert_eq!(comparison.recommended, Regime::Old);
        assert_eq!(comparison.savings, dec!(166400));
        assert_eq!(comparison.result_for(Regime::Old).total_tax, dec!(59800));
    }
}
