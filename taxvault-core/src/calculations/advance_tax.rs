//! Advance-tax installment schedule.
//!
//! Advance tax is paid in four cumulative installments over the financial
//! year: 15% by mid-June, 45% by mid-September, 75% by mid-December and the
//! full liability by mid-March.
//!
//! ```
//! use rust_decimal_macros::dec;
//! use taxvault_core::calculations::advance_tax_schedule;
//!
//! let schedule = advance_tax_schedule(dec!(100000)).unwrap();
//! let cumulative: Vec<_> = schedule
//!     .installments()
//!     .iter()
//!     .map(|i| i.cumulative_amount)
//!     .collect();
//!
//! assert_eq!(cumulative, vec![dec!(15000), dec!(45000), dec!(75000), dec!(100000)]);
//! ```

use std::fmt;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{percent_of, require_within_limit};
use crate::error::InvalidInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    pub const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

    /// Share of the annual liability due by this installment, as a percentage.
    pub fn cumulative_percentage(&self) -> Decimal {
        match self {
            Self::Q1 => Decimal::from(15),
            Self::Q2 => Decimal::from(45),
            Self::Q3 => Decimal::from(75),
            Self::Q4 => Decimal::ONE_HUNDRED,
        }
    }

    pub fn due_label(&self) -> &'static str {
        match self {
            Self::Q1 => "15-Jun",
            Self::Q2 => "15-Sep",
            Self::Q3 => "15-Dec",
            Self::Q4 => "15-Mar",
        }
    }

    /// Calendar due date for the financial year starting in April of `fy_start_year`.
    ///
    /// The March installment falls in the following calendar year.
    pub fn due_date(
        &self,
        fy_start_year: i32,
    ) -> Option<NaiveDate> {
        match self {
            Self::Q1 => NaiveDate::from_ymd_opt(fy_start_year, 6, 15),
            Self::Q2 => NaiveDate::from_ymd_opt(fy_start_year, 9, 15),
            Self::Q3 => NaiveDate::from_ymd_opt(fy_start_year, 12, 15),
            Self::Q4 => NaiveDate::from_ymd_opt(fy_start_year.checked_add(1)?, 3, 15),
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let label = match self {
            Self::Q1 => "Q1",
            Self::Q2 => "Q2",
            Self::Q3 => "Q3",
            Self::Q4 => "Q4",
        };
        f.write_str(label)
    }
}

/// One advance-tax installment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    pub quarter: Quarter,
    pub cumulative_percentage: Decimal,
    /// Total that must have been paid by this installment's due date.
    pub cumulative_amount: Decimal,
    /// What this installment adds on top of the previous ones.
    pub amount_due: Decimal,
}

impl Installment {
    pub fn due_label(&self) -> &'static str {
        self.quarter.due_label()
    }

    pub fn due_date(
        &self,
        fy_start_year: i32,
    ) -> Option<NaiveDate> {
        self.quarter.due_date(fy_start_year)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvanceTaxSchedule {
    pub annual_tax: Decimal,
    installments: Vec<Installment>,
}

impl AdvanceTaxSchedule {
    pub fn installments(&self) -> &[Installment] {
        &self.installments
    }

    /// First installment whose due date is on or after `today`.
    ///
    /// Returns `None` once the March installment has passed (or if the due
    /// dates cannot be represented for `fy_start_year`).
    pub fn next_due(
        &self,
        today: NaiveDate,
        fy_start_year: i32,
    ) -> Option<&Installment> {
        self.installments.iter().find(|installment| {
            installment
                .due_date(fy_start_year)
                .is_some_and(|due| due >= today)
        })
    }
}

/// Calendar year in which the financial year containing `date` began.
///
/// Financial years run April to March, so January to March belong to the
/// year that started the previous April.
pub fn financial_year_start(date: NaiveDate) -> i32 {
    if date.month() >= 4 {
        date.year()
    } else {
        date.year() - 1
    }
}

/// Splits `annual_tax` into the four cumulative advance-tax installments.
///
/// # Errors
///
/// [`InvalidInput::NegativeTaxLiability`] if `annual_tax` is negative, or
/// [`InvalidInput::AmountTooLarge`] above the supported limit.
pub fn advance_tax_schedule(annual_tax: Decimal) -> Result<AdvanceTaxSchedule, InvalidInput> {
    if annual_tax < Decimal::ZERO {
        return Err(InvalidInput::NegativeTaxLiability(annual_tax));
    }
    let annual_tax = require_within_limit("annual_tax", annual_tax)?;

    let mut paid_so_far = Decimal::ZERO;
    let installments = Quarter::ALL
        .iter()
        .map(|&quarter| {
            let cumulative_amount = match quarter {
                Quarter::Q4 => annual_tax,
                _ => percent_of(annual_tax, quarter.cumulative_percentage()),
            };
            let amount_due = cumulative_amount - paid_so_far;
            paid_so_far = cumulative_amount;
            Installment {
                quarter,
                cumulative_percentage: quarter.cumulative_percentage(),
                cumulative_amount,
                amount_due,
            }
        })
        .collect();

    Ok(AdvanceTaxSchedule {
        annual_tax,
        installments,
    })
}
