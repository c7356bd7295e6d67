use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single income band of a regime's slab table.
///
/// `upper_bound` of `None` means the band is unbounded. `rate` is a
/// percentage (`5` means 5%), matching how slab tables are published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSlab {
    pub lower_bound: Decimal,
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
    pub label: String,
}

impl TaxSlab {
    pub fn new(
        lower_bound: Decimal,
        upper_bound: Option<Decimal>,
        rate: Decimal,
        label: impl Into<String>,
    ) -> Self {
        Self {
            lower_bound,
            upper_bound,
            rate,
            label: label.into(),
        }
    }

    /// Portion of `taxable_income` that falls inside `[lower_bound, upper_bound)`.
    pub fn segment_of(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        if taxable_income <= self.lower_bound {
            return Decimal::ZERO;
        }
        let top = match self.upper_bound {
            Some(upper) => upper.min(taxable_income),
            None => taxable_income,
        };
        top - self.lower_bound
    }
}
