//! Offline ledger commands: `rederive` and `show`.

use std::{io::Write, path::Path};

use anyhow::{Context as _, Result, bail};
use matchday_core::{derive::DeriveOptions, season::Season, store::LedgerStore};
use matchday_store_file::FileStore;

/// Recompute every season and rewrite the file if anything changed.
pub fn rederive(path: &Path, options: DeriveOptions) -> Result<bool> {
  if !path.exists() {
    bail!("no ledger at {}", path.display());
  }
  let mut store = FileStore::open(path, options)
    .with_context(|| format!("opening ledger {}", path.display()))?;
  let written = store.commit()?;
  if !written {
    tracing::info!(path = %path.display(), "ledger already up to date");
  }
  Ok(written)
}

/// Write the derived rows of `season` (or all seasons) to `out`.
pub fn show(
  path: &Path,
  options: DeriveOptions,
  season: Option<Season>,
  mut out: impl Write,
) -> Result<()> {
  let store = FileStore::open(path, options.clone())
    .with_context(|| format!("opening ledger {}", path.display()))?;

  let seasons = match season {
    Some(season) => vec![season],
    None => store.seasons()?,
  };

  let mut rows = Vec::new();
  for season in seasons {
    rows.extend(store.derived_season(season, &options)?);
  }

  out.write_all(matchday_csv::render(&rows).as_bytes())?;
  out.flush()?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use std::fs;

  use matchday_core::derive::FormOrder;

  use super::*;

  const LEDGER: &str = "\
season,position,team,played,won,drawn,lost,goals_for,goals_against,goal_difference,points,last_result,form,scored_flag,conceded_flag,scoring_streak_count,clean_sheet_count
2024-2025,15,Manchester United,38,11,9,18,44,54,-10,42,,,0,0,0,0
2025-2026,8,Manchester United,1,1,0,0,2,0,2,3,W,W,1,0,1,1
2025-2026,8,Manchester United,2,1,0,1,2,1,1,3,L,WL,0,1,1,1
";

  #[test]
  fn rederive_only_writes_on_change() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("united.csv");
    fs::write(&path, LEDGER).unwrap();

    assert!(!rederive(&path, DeriveOptions::default()).unwrap());
    assert_eq!(fs::read_to_string(&path).unwrap(), LEDGER);

    let newest_first = DeriveOptions { form_order: FormOrder::NewestFirst, ..Default::default() };
    assert!(rederive(&path, newest_first).unwrap());
    assert!(fs::read_to_string(&path).unwrap().contains(",3,L,LW,0,1,1,1\n"));
  }

  #[test]
  fn rederive_missing_ledger_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.csv");
    assert!(rederive(&path, DeriveOptions::default()).is_err());
    assert!(!path.exists());
  }

  #[test]
  fn show_one_season() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("united.csv");
    fs::write(&path, LEDGER).unwrap();

    let mut out = Vec::new();
    show(&path, DeriveOptions::default(), Some(Season::starting(2025)), &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(text.lines().skip(1).all(|l| l.starts_with("2025-2026,")));
  }
}
