//! A [`LedgerStore`] persisted as one CSV file: [`FileStore`].

use std::path::{Path, PathBuf};

use matchday_core::{
  derive::DeriveOptions,
  ledger::{Ledger, UpsertResult},
  observation::Observation,
  season::Season,
  store::LedgerStore,
};

use crate::{Error, Result, atomic};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A ledger loaded from, and written back to, a single CSV file.
///
/// Reads happen once in [`open`](Self::open); changes stay in memory until
/// [`commit`](Self::commit) renders every season and replaces the file.
#[derive(Debug)]
pub struct FileStore {
  path:    PathBuf,
  ledger:  Ledger,
  options: DeriveOptions,
  /// File content as of the last read or write; `None` if there is no file.
  on_disk: Option<String>,
}

impl FileStore {
  /// Open the ledger at `path`. A missing file is an empty ledger; a file
  /// that cannot be parsed is an error and is never overwritten.
  pub fn open(path: impl AsRef<Path>, options: DeriveOptions) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    let on_disk = atomic::read_optional(&path)?;

    let ledger = match &on_disk {
      Some(text) => matchday_csv::parse(text).map_err(|source| Error::Corrupt {
        path: path.clone(),
        source,
      })?,
      None => Ledger::new(),
    };

    tracing::debug!(
      path = %path.display(),
      rows = ledger.len(),
      exists = on_disk.is_some(),
      "opened ledger"
    );

    Ok(Self { path, ledger, options, on_disk })
  }

  /// Open `path`, upsert `obs`, and write the result back in one step.
  pub fn record(
    path: impl AsRef<Path>,
    obs: Observation,
    options: DeriveOptions,
  ) -> Result<UpsertResult> {
    let mut store = Self::open(path, options)?;
    let outcome = store.upsert(obs)?;
    store.commit()?;
    Ok(outcome)
  }

  pub fn path(&self) -> &Path { &self.path }

  pub fn ledger(&self) -> &Ledger { &self.ledger }

  pub fn options(&self) -> &DeriveOptions { &self.options }

  /// The full file content the ledger would be written as.
  pub fn render(&self) -> String { matchday_csv::render_ledger(&self.ledger, &self.options) }

  /// Recompute all seasons and replace the file if its content changed.
  ///
  /// Returns whether the file was written. An unchanged ledger leaves the
  /// file byte-identical and untouched.
  pub fn commit(&mut self) -> Result<bool> {
    let rendered = self.render();
    if self.on_disk.as_deref() == Some(rendered.as_str()) {
      tracing::debug!(path = %self.path.display(), "ledger unchanged; not writing");
      return Ok(false);
    }

    atomic::write_atomic(&self.path, rendered.as_bytes())?;
    tracing::info!(
      path = %self.path.display(),
      rows = self.ledger.len(),
      "wrote ledger"
    );
    self.on_disk = Some(rendered);
    Ok(true)
  }
}

// ─── LedgerStore impl ────────────────────────────────────────────────────────

impl LedgerStore for FileStore {
  type Error = Error;

  fn upsert(&mut self, obs: Observation) -> Result<UpsertResult> {
    let season = obs.season;
    let played = obs.played;
    let outcome = self.ledger.upsert(obs);
    tracing::debug!(%season, played, ?outcome, "upserted observation");
    Ok(outcome)
  }

  fn read_season(&self, season: Season) -> Result<Vec<Observation>> {
    Ok(self.ledger.read_season(season))
  }

  fn seasons(&self) -> Result<Vec<Season>> { Ok(self.ledger.seasons()) }
}
