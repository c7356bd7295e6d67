//! Subcommand bodies. Each returns the report to print.

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use taxvault_core::calculations::{
    IncomeTaxCalculator, advance_tax_schedule, compare_regimes, financial_year_start,
    simulate_savings,
};
use taxvault_core::vault::{FinancialHealth, VaultCoverage, target_progress};
use taxvault_core::{InvalidInput, Regime, TaxSettings, TaxTable};
use taxvault_notify::NotificationGateway;
use taxvault_notify::templates::advance_tax_reminder;
use tracing::info;

use crate::render;

pub fn calculate(
    table: &TaxTable,
    income: Decimal,
    deductions: Decimal,
    regime: Regime,
) -> Result<String, InvalidInput> {
    let result = IncomeTaxCalculator::new(table).calculate(income, deductions, regime)?;
    Ok(render::calculation(&result, table.cess_rate))
}

/// Both regimes side by side, plus what the OLD-regime deductions are worth.
pub fn compare(
    table: &TaxTable,
    income: Decimal,
    settings: &TaxSettings,
) -> Result<String, InvalidInput> {
    let comparison = compare_regimes(income, settings, table)?;
    let simulation = simulate_savings(income, &settings.clone().with_regime(Regime::Old), table)?;
    Ok(render::comparison(&comparison, &simulation))
}

pub fn advance(
    annual_tax: Decimal,
    fy_start_year: i32,
) -> Result<String, InvalidInput> {
    let schedule = advance_tax_schedule(annual_tax)?;
    Ok(render::schedule(&schedule, fy_start_year))
}

/// One regime's slabs, or both when `regime` is `None`.
pub fn slabs(
    table: &TaxTable,
    regime: Option<Regime>,
) -> String {
    let regimes = match regime {
        Some(regime) => vec![regime],
        None => Regime::ALL.to_vec(),
    };
    regimes
        .into_iter()
        .map(|regime| render::slabs(table.rules(regime), &table.financial_year))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Vault coverage against this year's tax; the health score needs
/// `expenses` and a non-zero liability.
pub fn vault(
    table: &TaxTable,
    balance: Decimal,
    income: Decimal,
    expenses: Option<Decimal>,
    settings: &TaxSettings,
) -> Result<String, InvalidInput> {
    let total_tax = IncomeTaxCalculator::new(table)
        .calculate_with_settings(income, settings)?
        .total_tax;
    let coverage = VaultCoverage::assess(balance, total_tax)?;
    let progress = target_progress(balance, settings)?;
    let health = match expenses {
        Some(expenses) if total_tax > Decimal::ZERO && income > Decimal::ZERO => {
            Some(FinancialHealth::score(income, expenses, balance, total_tax)?)
        }
        _ => None,
    };
    Ok(render::vault(&coverage, progress, health.as_ref()))
}

/// Works out the next advance-tax installment after `today` and sends a
/// reminder for it through `gateway`.
pub async fn remind(
    table: &TaxTable,
    gateway: &dyn NotificationGateway,
    phone: &str,
    income: Decimal,
    settings: &TaxSettings,
    today: NaiveDate,
) -> Result<String> {
    let total_tax = IncomeTaxCalculator::new(table)
        .calculate_with_settings(income, settings)?
        .total_tax;
    if total_tax.is_zero() {
        return Ok("No tax due this year; no reminder sent.".to_string());
    }

    let fy_start_year = financial_year_start(today);
    let schedule = advance_tax_schedule(total_tax)?;
    let Some(installment) = schedule.next_due(today, fy_start_year) else {
        return Ok(format!(
            "No advance-tax installment left in FY {fy_start_year}; no reminder sent."
        ));
    };

    let notification = advance_tax_reminder(phone, installment, fy_start_year)?;
    let receipt = gateway.send(&notification).await?;
    info!(quarter = %installment.quarter, receipt = %receipt.id, "advance-tax reminder sent");

    Ok(render::receipt(&receipt))
}
