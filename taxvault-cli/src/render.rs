//! Plain-text reports printed by the subcommands.

use rust_decimal::Decimal;
use taxvault_core::calculations::{AdvanceTaxSchedule, RegimeComparison, SavingsSimulation};
use taxvault_core::format::{format_inr, format_percent};
use taxvault_core::vault::{FinancialHealth, VaultCoverage};
use taxvault_core::{RegimeRules, TaxCalculationResult};
use taxvault_notify::DeliveryReceipt;

fn row(
    label: &str,
    value: impl AsRef<str>,
) -> String {
    format!("{label:<22}{:>16}", value.as_ref())
}

pub fn calculation(
    result: &TaxCalculationResult,
    cess_rate: Decimal,
) -> String {
    let mut lines = vec![
        result.regime.label().to_string(),
        row("Gross income", format_inr(result.gross_income)),
        row("Standard deduction", format_inr(result.standard_deduction)),
        row("Other deductions", format_inr(result.itemized_deductions)),
        row("Taxable income", format_inr(result.taxable_income)),
    ];

    if !result.breakdown.is_empty() {
        lines.push(String::new());
        lines.push(format!("{:<16}{:>6}{:>16}{:>12}", "Slab", "Rate", "Taxed", "Tax"));
        for line in &result.breakdown {
            lines.push(format!(
                "{:<16}{:>6}{:>16}{:>12}",
                line.slab_label,
                format_percent(line.rate, 0),
                format_inr(line.amount_taxed),
                format_inr(line.tax)
            ));
        }
    }

    lines.push(String::new());
    lines.push(row("Tax before rebate", format_inr(result.tax_before_rebate)));
    lines.push(row("Rebate", format_inr(result.rebate)));
    lines.push(row("Tax after rebate", format_inr(result.tax_after_rebate)));
    lines.push(row(
        &format!("Cess ({})", format_percent(cess_rate, 0)),
        format_inr(result.cess),
    ));
    lines.push(row("Total tax", format_inr(result.total_tax)));
    lines.push(row("Effective rate", format_percent(result.effective_rate, 2)));
    if let Some(slab) = &result.marginal_slab {
        lines.push(row("Marginal slab", slab));
    }

    lines.join("\n")
}

pub fn comparison(
    comparison: &RegimeComparison,
    simulation: &SavingsSimulation,
) -> String {
    let new = &comparison.new_regime;
    let old = &comparison.old_regime;
    let lines = [
        format!("{:<22}{:>16}{:>16}", "", "NEW", "OLD"),
        format!(
            "{:<22}{:>16}{:>16}",
            "Taxable income",
            format_inr(new.taxable_income),
            format_inr(old.taxable_income)
        ),
        format!(
            "{:<22}{:>16}{:>16}",
            "Total tax",
            format_inr(new.total_tax),
            format_inr(old.total_tax)
        ),
        String::new(),
        format!(
            "Recommended: {} (saves {})",
            comparison.recommended.label(),
            format_inr(comparison.savings)
        ),
        String::new(),
        format!("Deduction planning under the {}", simulation.regime.label()),
        row("No planning", format_inr(simulation.no_planning)),
        row("With your plan", format_inr(simulation.with_plan)),
        row("Fully optimized", format_inr(simulation.fully_optimized)),
        row("Plan saves", format_inr(simulation.plan_savings)),
        row("Optimizing saves", format_inr(simulation.optimized_savings)),
    ];
    lines.join("\n")
}

pub fn schedule(
    schedule: &AdvanceTaxSchedule,
    fy_start_year: i32,
) -> String {
    let mut lines = vec![format!(
        "Advance tax for FY {}-{:02} on {}",
        fy_start_year,
        (fy_start_year + 1).rem_euclid(100),
        format_inr(schedule.annual_tax)
    )];
    lines.push(format!(
        "{:<4}{:>14}{:>8}{:>16}{:>16}",
        "", "Due", "Cum. %", "Cumulative", "This payment"
    ));
    for installment in schedule.installments() {
        let due = installment
            .due_date(fy_start_year)
            .map(|d| d.format("%d %b %Y").to_string())
            .unwrap_or_else(|| installment.due_label().to_string());
        lines.push(format!(
            "{:<4}{:>14}{:>8}{:>16}{:>16}",
            installment.quarter.to_string(),
            due,
            format_percent(installment.cumulative_percentage, 0),
            format_inr(installment.cumulative_amount),
            format_inr(installment.amount_due)
        ));
    }
    lines.join("\n")
}

pub fn slabs(
    rules: &RegimeRules,
    financial_year: &str,
) -> String {
    let mut lines = vec![format!("{} (FY {financial_year})", rules.regime.label())];
    for slab in rules.slabs.slabs() {
        lines.push(format!("{:<16}{:>6}", slab.label, format_percent(slab.rate, 0)));
    }
    lines.push(row("Standard deduction", format_inr(rules.standard_deduction)));
    lines.push(row(
        "Itemized deductions",
        if rules.itemized_deductions_allowed {
            "allowed"
        } else {
            "not allowed"
        },
    ));
    if let Some(rebate) = rules.rebate {
        lines.push(format!(
            "Rebate up to {} when taxable income is at most {}",
            format_inr(rebate.cap),
            format_inr(rebate.ceiling)
        ));
    }
    lines.join("\n")
}

pub fn vault(
    coverage: &VaultCoverage,
    target_progress: Option<Decimal>,
    health: Option<&FinancialHealth>,
) -> String {
    let mut lines = vec![
        row("Vault balance", format_inr(coverage.vault_balance)),
        row("Tax this year", format_inr(coverage.total_tax)),
        row("Coverage", format_percent(coverage.percentage, 0)),
        row("Status", coverage.level.to_string()),
    ];
    if coverage.shortfall > Decimal::ZERO {
        lines.push(row("Still to save", format_inr(coverage.shortfall)));
    }
    if coverage.surplus > Decimal::ZERO {
        lines.push(row("Surplus", format_inr(coverage.surplus)));
    }
    if let Some(progress) = target_progress {
        lines.push(row("Target progress", format_percent(progress, 0)));
    }
    if let Some(health) = health {
        lines.push(String::new());
        lines.push(row("Health score", format!("{}/100", health.score)));
        lines.push(row("Health status", health.status.to_string()));
        lines.push(row("Savings rate", format_percent(health.savings_rate, 0)));
        lines.push(format!("Priority: {}", health.priority()));
    }
    lines.join("\n")
}

pub fn receipt(receipt: &DeliveryReceipt) -> String {
    let mode = if receipt.demo { " (demo, not delivered)" } else { "" };
    format!(
        "Reminder sent via {}{mode}: {} to {}",
        receipt.backend, receipt.id, receipt.recipient
    )
}
