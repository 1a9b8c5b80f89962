//! `matchday record`: scrape the standings page into each team's ledger.

use anyhow::{Context as _, Result, bail};
use matchday_core::{extract::extract, ledger::UpsertResult, season::Season};
use matchday_store_file::FileStore;

use crate::{
  fetch::PageFetcher,
  locate::Page,
  settings::{Settings, TeamConfig},
};

/// Record today's row for every team, fetching the page once.
pub async fn run(
  settings: &Settings,
  fetcher: &impl PageFetcher,
  url: &str,
  season: Season,
  teams: &[TeamConfig],
) -> Result<()> {
  if teams.is_empty() {
    bail!("no teams configured; add a [[teams]] section or pass --team and --ledger");
  }

  let body = fetcher
    .fetch(url)
    .await
    .with_context(|| format!("fetching standings from {url}"))?;
  let page = Page::parse(&body);

  let mut failed = 0;
  for team in teams {
    match record_team(settings, &page, season, team) {
      Ok(outcome) => tracing::info!(
        team = %team.name,
        %season,
        ledger = %team.ledger.display(),
        ?outcome,
        "recorded"
      ),
      Err(e) => {
        tracing::error!(team = %team.name, "{e:#}");
        failed += 1;
      }
    }
  }

  if failed > 0 {
    bail!("{failed} of {} teams could not be recorded", teams.len());
  }
  Ok(())
}

/// Locate, extract and upsert one team. The ledger is only touched once a
/// complete observation exists.
pub fn record_team(
  settings: &Settings,
  page: &Page,
  season: Season,
  team: &TeamConfig,
) -> Result<UpsertResult> {
  let cells = page.locate_team_row(&settings.table_selector, &team.name)?;
  let obs = extract(season, &cells).with_context(|| format!("extracting row {cells:?}"))?;
  FileStore::record(&team.ledger, obs, settings.derive.clone())
    .with_context(|| format!("updating {}", team.ledger.display()))
}
