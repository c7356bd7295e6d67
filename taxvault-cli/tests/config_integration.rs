//! End-to-end checks driving the subcommands from an on-disk config file.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use taxvault_cli::commands;
use taxvault_cli::config::AppConfig;
use taxvault_core::{Regime, TaxSettings};
use taxvault_notify::default_registry;

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("taxvault.toml")
}

#[test]
fn fixture_config_loads_budget_slabs() {
    let config = AppConfig::load(Some(&fixture_path())).unwrap();
    let table = config.tax_table().unwrap();

    assert_eq!(config.log_level.as_deref(), Some("warn"));
    assert_eq!(table.new_regime.slabs.slabs().len(), 7);
}

#[test]
fn calculate_uses_configured_slabs() {
    let table = AppConfig::load(Some(&fixture_path()))
        .unwrap()
        .tax_table()
        .unwrap();

    let report = commands::calculate(&table, dec!(1675000), Decimal::ZERO, Regime::New).unwrap();

    assert!(report.contains("₹12L - ₹16L"), "{report}");
    assert!(report.contains("₹1,24,800"), "{report}");
}

#[tokio::test]
async fn remind_through_configured_gateway() {
    let config = AppConfig::load(Some(&fixture_path())).unwrap();
    let table = config.tax_table().unwrap();
    let gateway = default_registry().create(&config.notifications).await.unwrap();

    let report = commands::remind(
        &table,
        gateway.as_ref(),
        "+919876543210",
        dec!(1675000),
        &TaxSettings::new(Regime::New),
        NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
    )
    .await
    .unwrap();

    assert!(report.starts_with("Reminder sent via log"), "{report}");
}
