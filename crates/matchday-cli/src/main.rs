//! `matchday`: keep league-table history in local CSV ledgers.
//!
//! # Usage
//!
//! ```text
//! matchday record                      # every [[teams]] entry in matchday.toml
//! matchday record --team "Arsenal" --ledger data/arsenal.csv
//! matchday mirror
//! matchday registry
//! matchday addresses
//! matchday show --ledger data/manchester_united.csv --season 2025-2026
//! ```

mod addresses;
mod fetch;
mod ledger;
mod locate;
mod mirror;
mod record;
mod registry;
mod settings;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use fetch::HttpFetcher;
use matchday_core::season::Season;
use settings::{Settings, TeamConfig};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "matchday", version, about = "League-table history in CSV ledgers")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "matchday.toml", env = "MATCHDAY_CONFIG")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Scrape the standings page and upsert each team's row into its ledger.
  Record(RecordArgs),
  /// Download every configured mirror.
  Mirror,
  /// Snapshot the configured listing page and update its appearance summary.
  Registry {
    /// Date to record the snapshot under (default: today).
    #[arg(long)]
    date: Option<NaiveDate>,
  },
  /// Download the address register and write its trimmed copy and street list.
  Addresses,
  /// Recompute derived columns of a ledger and rewrite it if they changed.
  Rederive {
    #[arg(long)]
    ledger: PathBuf,
  },
  /// Print a ledger's derived rows to stdout.
  Show {
    #[arg(long)]
    ledger: PathBuf,
    #[arg(long, value_parser = Season::parse)]
    season: Option<Season>,
  },
}

#[derive(Args, Debug)]
struct RecordArgs {
  /// Season to record under (default: derived from today's date).
  #[arg(long, value_parser = Season::parse)]
  season: Option<Season>,

  /// Standings page URL (overrides `table_url`).
  #[arg(long)]
  url: Option<String>,

  /// Record only this team; requires --ledger.
  #[arg(long, requires = "ledger")]
  team: Option<String>,

  #[arg(long, requires = "team")]
  ledger: Option<PathBuf>,
}

impl RecordArgs {
  fn teams(&self, settings: &Settings) -> Vec<TeamConfig> {
    match (&self.team, &self.ledger) {
      (Some(name), Some(ledger)) => vec![TeamConfig { name: name.clone(), ledger: ledger.clone() }],
      _ => settings.teams.clone(),
    }
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(&cli.config)?;
  let today = Local::now().date_naive();

  match cli.command {
    Command::Record(args) => {
      let season = match args.season {
        Some(season) => season,
        None => Season::containing(today, settings.season_start_month)?,
      };
      let url = args.url.clone().unwrap_or_else(|| settings.table_url.clone());
      let fetcher = HttpFetcher::new(&settings)?;
      record::run(&settings, &fetcher, &url, season, &args.teams(&settings)).await
    }
    Command::Mirror => {
      let fetcher = HttpFetcher::new(&settings)?;
      mirror::run(&fetcher, &settings.mirrors).await
    }
    Command::Registry { date } => {
      let cfg = settings
        .registry
        .as_ref()
        .context("no [registry] section in config")?;
      let fetcher = HttpFetcher::new(&settings)?;
      registry::run(&fetcher, cfg, date.unwrap_or(today)).await
    }
    Command::Addresses => {
      let cfg = settings
        .addresses
        .as_ref()
        .context("no [addresses] section in config")?;
      let fetcher = HttpFetcher::new(&settings)?;
      addresses::run(&fetcher, cfg).await
    }
    Command::Rederive { ledger: path } => ledger::rederive(&path, settings.derive).map(|_| ()),
    Command::Show { ledger: path, season } => {
      ledger::show(&path, settings.derive, season, std::io::stdout().lock())
    }
  }
}
