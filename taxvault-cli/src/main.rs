use std::path::PathBuf;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::debug;

use taxvault_cli::config::AppConfig;
use taxvault_cli::utils::parse_amount;
use taxvault_cli::{commands, logging};
use taxvault_core::{Regime, TaxSettings};
use taxvault_notify::default_registry;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Indian income-tax calculator and tax vault for freelancers.
///
/// Amounts accept Indian or international grouping and the `L` / `Cr`
/// suffixes, e.g. `12,00,000`, `1,200,000` or `12L`.
#[derive(Debug, Parser)]
#[command(name = "taxvault", version, about)]
struct Cli {
    /// Config file (defaults to ./taxvault.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Calculate tax on one year's gross income.
    Calculate {
        #[arg(long, value_parser = parse_amount)]
        income: Decimal,

        /// Itemized deductions (honoured only under the OLD regime).
        #[arg(long, value_parser = parse_amount, default_value = "0")]
        deductions: Decimal,

        #[arg(long, default_value = "new")]
        regime: Regime,
    },

    /// Compare both regimes and show what deduction planning saves.
    Compare {
        #[arg(long, value_parser = parse_amount)]
        income: Decimal,

        /// Amount invested under Section 80C this year.
        #[arg(long = "section-80c", value_parser = parse_amount)]
        section_80c: Option<Decimal>,

        /// Claim the Section 80D health-insurance deduction.
        #[arg(long = "section-80d")]
        section_80d: bool,

        /// Claim the additional NPS deduction.
        #[arg(long)]
        nps: bool,
    },

    /// Split an annual liability into advance-tax installments.
    Advance {
        #[arg(long, value_parser = parse_amount)]
        annual_tax: Decimal,

        /// Year the financial year starts in (defaults to the table's year).
        #[arg(long)]
        fy: Option<i32>,
    },

    /// Print the active slab table.
    Slabs {
        #[arg(long)]
        regime: Option<Regime>,
    },

    /// Show how well the vault covers this year's tax.
    Vault {
        #[arg(long, value_parser = parse_amount)]
        balance: Decimal,

        #[arg(long, value_parser = parse_amount)]
        income: Decimal,

        /// Business expenses; adds a financial health score.
        #[arg(long, value_parser = parse_amount)]
        expenses: Option<Decimal>,

        #[arg(long, default_value = "new")]
        regime: Regime,

        /// Savings goal for the vault.
        #[arg(long, value_parser = parse_amount)]
        target: Option<Decimal>,
    },

    /// Send a reminder for the next advance-tax installment.
    Remind {
        #[arg(long)]
        phone: String,

        #[arg(long, value_parser = parse_amount)]
        income: Decimal,

        #[arg(long, default_value = "new")]
        regime: Regime,

        /// Date to plan from, YYYY-MM-DD (defaults to today).
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    logging::init_logging(config.log_level.as_deref())?;
    debug!(?config, "starting");

    let table = config.tax_table()?;

    let report = match cli.command {
        Command::Calculate {
            income,
            deductions,
            regime,
        } => commands::calculate(&table, income, deductions, regime)?,

        Command::Compare {
            income,
            section_80c,
            section_80d,
            nps,
        } => {
            let mut settings = TaxSettings::new(Regime::Old)
                .with_section_80d(section_80d)
                .with_nps(nps);
            if let Some(amount) = section_80c {
                settings = settings.with_section_80c(amount);
            }
            commands::compare(&table, income, &settings)?
        }

        Command::Advance { annual_tax, fy } => {
            let fy = fy
                .or_else(|| table.start_year())
                .context("no financial year given and the slab table has none")?;
            commands::advance(annual_tax, fy)?
        }

        Command::Slabs { regime } => commands::slabs(&table, regime),

        Command::Vault {
            balance,
            income,
            expenses,
            regime,
            target,
        } => {
            let settings =
                TaxSettings::new(regime).with_target_vault_amount(target.unwrap_or_default());
            commands::vault(&table, balance, income, expenses, &settings)?
        }

        Command::Remind {
            phone,
            income,
            regime,
            today,
        } => {
            let gateway = default_registry()
                .create(&config.notifications)
                .await
                .context("Failed to set up notifications")?;
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            commands::remind(
                &table,
                gateway.as_ref(),
                &phone,
                income,
                &TaxSettings::new(regime),
                today,
            )
            .await?
        }
    };

    println!("{report}");
    Ok(())
}
