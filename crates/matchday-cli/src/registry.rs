//! `matchday registry`: dated snapshots of a listing page plus a summary of
//! when each entry was first and last listed.

use std::path::PathBuf;

use anyhow::{Context as _, Result, anyhow};
use chrono::{Datelike, NaiveDate};
use matchday_core::register::{AppearanceRegister, Observed, compose_id};
use matchday_store_file::{load_register, save_register, write_atomic};

use crate::{fetch::PageFetcher, locate::Page, settings::RegistryConfig};

/// Counts of what one snapshot did to the register.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Tally {
  pub new:       usize,
  pub extended:  usize,
  pub unchanged: usize,
  /// Rows whose key columns were all empty.
  pub skipped:   usize,
}

pub async fn run(fetcher: &impl PageFetcher, cfg: &RegistryConfig, date: NaiveDate) -> Result<()> {
  let body = fetcher
    .fetch(&cfg.url)
    .await
    .with_context(|| format!("fetching {}", cfg.url))?;
  let table = Page::parse(&body).locate_table(&cfg.table_selector)?;

  let (header, rows) = table
    .split_first()
    .ok_or_else(|| anyhow!("table {:?} is empty", cfg.table_selector))?;

  let mut register = load_register(&cfg.summary)?;
  let tally = observe_rows(&mut register, cfg, header, rows, date)?;

  // A dated snapshot never exists without its summary entries.
  save_register(&cfg.summary, &register)?;
  let path = snapshot_path(cfg, date);
  write_atomic(&path, snapshot(header, rows, date).as_bytes())?;

  tracing::info!(
    snapshot = %path.display(),
    summary = %cfg.summary.display(),
    new = tally.new,
    extended = tally.extended,
    unchanged = tally.unchanged,
    skipped = tally.skipped,
    "registry updated"
  );
  Ok(())
}

fn column(header: &[String], name: &str) -> Result<usize> {
  header
    .iter()
    .position(|h| h.trim() == name)
    .ok_or_else(|| anyhow!("column {name:?} not in table header {header:?}"))
}

fn cell(row: &[String], i: usize) -> &str { row.get(i).map(String::as_str).unwrap_or("") }

/// Fold every data row into `register` as seen on `date`.
pub fn observe_rows(
  register: &mut AppearanceRegister,
  cfg: &RegistryConfig,
  header: &[String],
  rows: &[Vec<String>],
  date: NaiveDate,
) -> Result<Tally> {
  let keys = cfg
    .key_columns
    .iter()
    .map(|name| column(header, name))
    .collect::<Result<Vec<_>>>()?;
  let name_col = column(header, &cfg.name_column)?;

  let mut tally = Tally::default();
  for row in rows {
    let id = compose_id(keys.iter().map(|&i| cell(row, i)));
    if id.is_empty() {
      tally.skipped += 1;
      continue;
    }
    match register.observe(&id, cell(row, name_col).trim(), date) {
      Observed::New => tally.new += 1,
      Observed::Extended => tally.extended += 1,
      Observed::Unchanged => tally.unchanged += 1,
    }
  }
  Ok(tally)
}

/// `<snapshot_dir>/<YYYY>/<prefix>_<YYYY-MM-DD>.csv`
pub fn snapshot_path(cfg: &RegistryConfig, date: NaiveDate) -> PathBuf {
  cfg
    .snapshot_dir
    .join(date.year().to_string())
    .join(format!("{}_{}.csv", cfg.snapshot_prefix, date.format("%Y-%m-%d")))
}

/// The scraped table with a trailing `Date` column; short rows are padded.
pub fn snapshot(header: &[String], rows: &[Vec<String>], date: NaiveDate) -> String {
  let date = date.format("%Y-%m-%d").to_string();

  let mut out_header = header.to_vec();
  out_header.push("Date".into());

  let out_rows: Vec<Vec<String>> = rows
    .iter()
    .map(|row| {
      let mut row = row.clone();
      row.resize(header.len().max(row.len()), String::new());
      row.push(date.clone());
      row
    })
    .collect();

  matchday_csv::render_table(&out_header, &out_rows)
}

#[cfg(test)]
mod tests {
  use std::fs;

  use super::*;
  use crate::fetch::fake::FakeFetcher;

  const URL: &str = "https://example.com/licences";

  const LISTING: &str = r#"
    <html><body><table>
      <tr><th>Nafn</th><th>Stöð</th><th>Stöðvarnúmer</th></tr>
      <tr><td>Anna Jónsdóttir</td><td>Hreyfill</td><td>112</td></tr>
      <tr><td>Bjarni Pálsson</td><td></td><td></td></tr>
      <tr><td></td><td></td><td></td></tr>
    </table></body></html>
  "#;

  fn config(dir: &tempfile::TempDir) -> RegistryConfig {
    RegistryConfig {
      url:             URL.into(),
      table_selector:  "table".into(),
      key_columns:     vec!["Nafn".into(), "Stöð".into(), "Stöðvarnúmer".into()],
      name_column:     "Nafn".into(),
      summary:         dir.path().join("summary.csv"),
      snapshot_dir:    dir.path().join("snapshots"),
      snapshot_prefix: "licences".into(),
    }
  }

  fn day(d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(2025, 6, d).unwrap() }

  #[tokio::test]
  async fn snapshot_and_summary_over_two_days() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(&dir);
    let fetcher = FakeFetcher::default().with(URL, LISTING);

    run(&fetcher, &cfg, day(1)).await.unwrap();
    run(&fetcher, &cfg, day(2)).await.unwrap();

    let snapshot = fs::read_to_string(dir.path().join("snapshots/2025/licences_2025-06-02.csv")).unwrap();
    assert_eq!(
      snapshot,
      "Nafn,Stöð,Stöðvarnúmer,Date\n\
       Anna Jónsdóttir,Hreyfill,112,2025-06-02\n\
       Bjarni Pálsson,,,2025-06-02\n\
       ,,,2025-06-02\n"
    );
    assert!(dir.path().join("snapshots/2025/licences_2025-06-01.csv").exists());

    assert_eq!(
      fs::read_to_string(&cfg.summary).unwrap(),
      "name,first_seen,last_seen,id\n\
       Anna Jónsdóttir,01.06.2025,02.06.2025,Anna Jónsdóttir - Hreyfill - 112\n\
       Bjarni Pálsson,01.06.2025,02.06.2025,Bjarni Pálsson\n"
    );
  }

  #[tokio::test]
  async fn failed_summary_write_leaves_no_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(&dir);
    let fetcher = FakeFetcher::default().with(URL, LISTING);
    // A directory where the summary's temporary sibling would go.
    fs::create_dir(dir.path().join(".summary.csv.tmp")).unwrap();

    assert!(run(&fetcher, &cfg, day(1)).await.is_err());
    assert!(!cfg.summary.exists());
    assert!(!dir.path().join("snapshots/2025/licences_2025-06-01.csv").exists());
  }

  #[test]
  fn tally_counts_outcomes() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(&dir);
    let header: Vec<String> = ["Nafn", "Stöð", "Stöðvarnúmer"].map(String::from).to_vec();
    let rows = vec![
      vec!["Anna".to_string(), "Hreyfill".into(), "1".into()],
      vec![String::new(), String::new(), String::new()],
    ];

    let mut register = AppearanceRegister::new();
    let first = observe_rows(&mut register, &cfg, &header, &rows, day(1)).unwrap();
    assert_eq!(first, Tally { new: 1, extended: 0, unchanged: 0, skipped: 1 });

    let again = observe_rows(&mut register, &cfg, &header, &rows, day(1)).unwrap();
    assert_eq!(again, Tally { new: 0, extended: 0, unchanged: 1, skipped: 1 });
  }

  #[test]
  fn missing_key_column_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(&dir);
    let header: Vec<String> = vec!["Nafn".into()];

    let mut register = AppearanceRegister::new();
    let err = observe_rows(&mut register, &cfg, &header, &[], day(1)).unwrap_err();
    assert!(err.to_string().contains("Stöð"));
  }
}
