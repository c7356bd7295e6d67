//! Tax calculations for the Indian income-tax slab system.
//!
//! Every calculator here is a pure function of its inputs and the
//! [`TaxTable`](crate::TaxTable) it reads; nothing rounds or performs I/O.

pub mod advance_tax;
pub mod common;
pub mod income_tax;
pub mod planning;

pub use advance_tax::{
    AdvanceTaxSchedule, Installment, Quarter, advance_tax_schedule, financial_year_start,
};
pub use income_tax::{IncomeTaxCalculator, calculate_tax};
pub use planning::{RegimeComparison, SavingsSimulation, compare_regimes, simulate_savings};
