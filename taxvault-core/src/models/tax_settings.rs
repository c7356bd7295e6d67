use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Regime;

/// Statutory caps for the deductions a [`TaxSettings`] can elect.
pub mod limits {
    use rust_decimal::Decimal;

    /// Section 80C (PPF, ELSS, life insurance).
    pub const SECTION_80C_CAP: Decimal = Decimal::from_parts(150_000, 0, 0, false, 0);
    /// Section 80D health-insurance premium, simplified to a flat amount.
    pub const SECTION_80D_AMOUNT: Decimal = Decimal::from_parts(25_000, 0, 0, false, 0);
    /// Section 80CCD(1B) additional NPS contribution.
    pub const NPS_AMOUNT: Decimal = Decimal::from_parts(50_000, 0, 0, false, 0);
}

/// A taxpayer's elections, owned by the caller.
///
/// Values are immutable: the `with_*` methods consume the settings and
/// return an updated copy, so a calculation never observes a half-edited
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaxSettings {
    pub regime: Regime,
    pub section_80c: bool,
    pub section_80d: bool,
    pub nps: bool,
    pub annual_80c_investment: Decimal,
    pub target_vault_amount: Decimal,
}

impl TaxSettings {
    pub fn new(regime: Regime) -> Self {
        Self {
            regime,
            ..Self::default()
        }
    }

    pub fn with_regime(
        self,
        regime: Regime,
    ) -> Self {
        Self { regime, ..self }
    }

    /// Elects Section 80C with the amount actually invested this year.
    pub fn with_section_80c(
        self,
        annual_investment: Decimal,
    ) -> Self {
        Self {
            section_80c: true,
            annual_80c_investment: annual_investment,
            ..self
        }
    }

    pub fn with_section_80d(
        self,
        enabled: bool,
    ) -> Self {
        Self {
            section_80d: enabled,
            ..self
        }
    }

    pub fn with_nps(
        self,
        enabled: bool,
    ) -> Self {
        Self { nps: enabled, ..self }
    }

    pub fn with_target_vault_amount(
        self,
        target: Decimal,
    ) -> Self {
        Self {
            target_vault_amount: target,
            ..self
        }
    }

    /// Every deduction elected at its statutory maximum.
    pub fn fully_optimized(&self) -> Self {
        Self {
            section_80c: true,
            section_80d: true,
            nps: true,
            annual_80c_investment: limits::SECTION_80C_CAP,
            ..self.clone()
        }
    }

    /// Sum of the elected itemized deductions.
    ///
    /// The 80C amount is capped at [`limits::SECTION_80C_CAP`]; 80D and NPS
    /// contribute their flat amounts when elected. Whether the regime honours
    /// these deductions is decided by the calculator, not here.
    pub fn itemized_deductions(&self) -> Decimal {
        let mut total = Decimal::ZERO;
        if self.section_80c {
            total += self.annual_80c_investment.min(limits::SECTION_80C_CAP);
        }
        if self.section_80d {
            total += limits::SECTION_80D_AMOUNT;
        }
        if self.nps {
            total += limits::NPS_AMOUNT;
        }
        total
    }
}
