//! `taxvault.toml` configuration.
//!
//! ```toml
//! log_level = "info"
//! slab_file = "slabs.csv"
//!
//! [notifications]
//! backend = "outbox"
//! target = "outbox.jsonl"
//! ```
//!
//! Every key is optional. A relative `slab_file` is resolved against the
//! directory holding the config file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use taxvault_core::TaxTable;
use taxvault_data::SlabTableLoader;
use taxvault_notify::GatewayConfig;
use tracing::{debug, info};

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "taxvault.toml";

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_level: Option<String>,
    /// CSV slab table replacing the built-in slabs.
    pub slab_file: Option<PathBuf>,
    pub notifications: GatewayConfig,
}

impl AppConfig {
    /// Loads `path`, or [`DEFAULT_CONFIG_FILE`] if it exists, or defaults.
    ///
    /// An explicitly named file that cannot be read is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.exists() {
                    debug!("no config file, using defaults");
                    return Ok(Self::default());
                }
                fallback
            }
        };

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let mut config = Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        if let (Some(slab_file), Some(dir)) = (&config.slab_file, path.parent()) {
            if slab_file.is_relative() {
                config.slab_file = Some(dir.join(slab_file));
            }
        }

        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// The built-in table, with slabs from `slab_file` applied when set.
    pub fn tax_table(&self) -> Result<TaxTable> {
        let table = TaxTable::default();
        let Some(slab_file) = &self.slab_file else {
            return Ok(table);
        };

        let records = SlabTableLoader::load_from_file(slab_file)
            .with_context(|| format!("Failed to load slab file: {}", slab_file.display()))?;
        SlabTableLoader::apply(table, &records)
            .with_context(|| format!("Invalid slab file: {}", slab_file.display()))
    }
}
