//! Runtime configuration, read from a TOML file and `MATCHDAY__*` variables.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use matchday_core::{derive::DeriveOptions, season::DEFAULT_START_MONTH};
use serde::Deserialize;

pub const DEFAULT_TABLE_URL: &str = "https://www.bbc.com/sport/football/premier-league/table";
pub const DEFAULT_TABLE_SELECTOR: &str = r#"table[data-testid="football-table"]"#;

// ─── Sections ─────────────────────────────────────────────────────────────────

/// A team whose standings are appended to its own ledger file.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamConfig {
  /// Matched against the text of the standings row.
  pub name:   String,
  pub ledger: PathBuf,
}

/// A remote file copied verbatim to a local path.
#[derive(Debug, Clone, Deserialize)]
pub struct MirrorConfig {
  pub url:  String,
  pub path: PathBuf,
}

/// A listing page tracked as dated snapshots plus an appearance summary.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
  pub url:             String,
  #[serde(default = "default_registry_selector")]
  pub table_selector:  String,
  /// Header names whose values, joined, identify an entry.
  pub key_columns:     Vec<String>,
  pub name_column:     String,
  pub summary:         PathBuf,
  pub snapshot_dir:    PathBuf,
  #[serde(default = "default_snapshot_prefix")]
  pub snapshot_prefix: String,
}

/// The national address register, reduced to two derived files.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressesConfig {
  #[serde(default = "default_addresses_url")]
  pub url:     String,
  /// Selected columns with blank dative street names filled.
  pub trimmed: PathBuf,
  /// One line per street and house number.
  pub streets: PathBuf,
}

pub const DEFAULT_ADDRESSES_URL: &str = "https://fasteignaskra.is/Stadfangaskra.csv";

fn default_addresses_url() -> String { DEFAULT_ADDRESSES_URL.into() }

fn default_registry_selector() -> String { "table".into() }

fn default_snapshot_prefix() -> String { "snapshot".into() }

// ─── Settings ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
  pub table_url:          String,
  pub table_selector:     String,
  pub season_start_month: u32,
  pub user_agent:         String,
  pub timeout_secs:       u64,
  pub derive:             DeriveOptions,
  pub teams:              Vec<TeamConfig>,
  pub mirrors:            Vec<MirrorConfig>,
  pub registry:           Option<RegistryConfig>,
  pub addresses:          Option<AddressesConfig>,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      table_url:          DEFAULT_TABLE_URL.into(),
      table_selector:     DEFAULT_TABLE_SELECTOR.into(),
      season_start_month: DEFAULT_START_MONTH,
      user_agent:         concat!("matchday/", env!("CARGO_PKG_VERSION")).into(),
      timeout_secs:       30,
      derive:             DeriveOptions::default(),
      teams:              Vec::new(),
      mirrors:            Vec::new(),
      registry:           None,
      addresses:          None,
    }
  }
}

impl Settings {
  /// Layer `path` (optional) under `MATCHDAY__*` environment variables.
  pub fn load(path: &Path) -> Result<Self> {
    config::Config::builder()
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("MATCHDAY").separator("__"))
      .build()
      .with_context(|| format!("failed to read config file {}", path.display()))?
      .try_deserialize()
      .context("failed to deserialise settings")
  }
}
