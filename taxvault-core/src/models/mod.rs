mod regime;
mod slab_schedule;
mod tax_calculation;
mod tax_settings;
mod tax_slab;
mod tax_table;

pub use regime::Regime;
pub use slab_schedule::{ScheduleError, SlabSchedule};
pub use tax_calculation::{SlabBreakdown, TaxCalculationResult};
pub use tax_settings::{TaxSettings, limits};
pub use tax_slab::TaxSlab;
pub use tax_table::{Rebate, RegimeRules, TaxTable};
