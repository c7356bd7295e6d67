//! Message builders for every notification the app sends.
//!
//! Amounts are rendered with [`format_inr`]; dates and times are passed in
//! by the caller so a builder's output depends only on its arguments.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use taxvault_core::calculations::Installment;
use taxvault_core::format::{format_inr, format_percent};
use taxvault_core::TaxCalculationResult;

use crate::notification::{Notification, TemplateError};

const SIGNATURE: &str = "- TaxVault";

pub fn tax_deadline_alert(
    phone: &str,
    deadline: &str,
    amount: Decimal,
) -> Result<Notification, TemplateError> {
    if deadline.trim().is_empty() {
        return Err(TemplateError::MissingField("deadline"));
    }
    let body = format!(
        "Tax Deadline Alert!\n\nYour tax payment of {} is due on {}.\n\nDon't miss the deadline!\n{SIGNATURE}",
        format_inr(amount),
        deadline.trim(),
    );
    Notification::sms(phone, body)
}

pub fn payment_confirmation(
    phone: &str,
    amount: Decimal,
    transaction_id: &str,
    paid_on: NaiveDate,
) -> Result<Notification, TemplateError> {
    if transaction_id.trim().is_empty() {
        return Err(TemplateError::MissingField("transaction id"));
    }
    let body = format!(
        "Payment Confirmed!\n\nAmount: {}\nTransaction ID: {}\nDate: {}\n\nThank you!\n{SIGNATURE}",
        format_inr(amount),
        transaction_id.trim(),
        paid_on.format("%d/%m/%Y"),
    );
    Notification::sms(phone, body)
}

/// Sent whenever money leaves the vault.
pub fn vault_unlock_alert(
    phone: &str,
    amount: Decimal,
    at: NaiveDateTime,
) -> Result<Notification, TemplateError> {
    let body = format!(
        "Vault Unlock Alert!\n\nAmount withdrawn: {}\nTime: {}\n\nIf this wasn't you, contact support immediately.\n{SIGNATURE}",
        format_inr(amount),
        at.format("%I:%M:%S %p"),
    );
    Notification::sms(phone, body)
}

/// Reminds the taxpayer of an upcoming advance-tax installment.
///
/// The due date is written out in full when it can be resolved for
/// `fy_start_year`, otherwise the short `15-Jun` style label is used.
pub fn advance_tax_reminder(
    phone: &str,
    installment: &Installment,
    fy_start_year: i32,
) -> Result<Notification, TemplateError> {
    let due = installment
        .due_date(fy_start_year)
        .map(|date| date.format("%d %b %Y").to_string())
        .unwrap_or_else(|| installment.due_label().to_string());
    let body = format!(
        "Advance Tax Reminder ({quarter})\n\nPay {due_now} by {due}.\nThat brings you to {cumulative} ({percent} of this year's tax).\n{SIGNATURE}",
        quarter = installment.quarter,
        due_now = format_inr(installment.amount_due),
        cumulative = format_inr(installment.cumulative_amount),
        percent = format_percent(installment.cumulative_percentage, 0),
    );
    Notification::sms(phone, body)
}

pub fn tax_summary_email(
    address: &str,
    result: &TaxCalculationResult,
) -> Result<Notification, TemplateError> {
    let mut body = format!(
        "Tax summary ({regime})\n\nGross income: {gross}\nStandard deduction: {std}\nOther deductions: {itemized}\nTaxable income: {taxable}\n\n",
        regime = result.regime.label(),
        gross = format_inr(result.gross_income),
        std = format_inr(result.standard_deduction),
        itemized = format_inr(result.itemized_deductions),
        taxable = format_inr(result.taxable_income),
    );
    for line in &result.breakdown {
        body.push_str(&format!(
            "{} @ {}: {}\n",
            line.slab_label,
            format_percent(line.rate, 0),
            format_inr(line.tax)
        ));
    }
    body.push_str(&format!(
        "\nTax before rebate: {}\nRebate: {}\nCess: {}\nTotal tax: {}\nEffective rate: {}\n\n{SIGNATURE}",
        format_inr(result.tax_before_rebate),
        format_inr(result.rebate),
        format_inr(result.cess),
        format_inr(result.total_tax),
        format_percent(result.effective_rate, 2),
    ));

    Notification::email(
        address,
        format!("Your tax summary: {} payable", format_inr(result.total_tax)),
        body,
    )
}

/// Month-end figures for [`monthly_summary_email`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// Free-form label such as `"March 2026"`.
    pub month: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub tax_saved: Decimal,
}

pub fn monthly_summary_email(
    address: &str,
    summary: &MonthlySummary,
) -> Result<Notification, TemplateError> {
    let month = summary.month.trim();
    if month.is_empty() {
        return Err(TemplateError::MissingField("month"));
    }
    let body = format!(
        "Monthly Financial Report - {month}\n\nTotal Income: {}\nTotal Expenses: {}\nTax Saved: {}\n\n{SIGNATURE}",
        format_inr(summary.income),
        format_inr(summary.expenses),
        format_inr(summary.tax_saved),
    );
    Notification::email(address, format!("Monthly Financial Report - {month}"), body)
}
