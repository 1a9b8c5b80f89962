//! The `LedgerStore` trait.
//!
//! Implemented by persistence backends (e.g. `matchday-store-file`). The CLI
//! depends on this abstraction, not on a concrete backend.

use crate::{
  derive::{DeriveOptions, DerivedRow, recompute},
  ledger::{Ledger, UpsertResult},
  observation::Observation,
  season::Season,
};

/// Abstraction over a persisted ledger.
pub trait LedgerStore {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert or replace the observation with the same `(season, played)` key.
  ///
  /// Identical re-submissions report [`UpsertResult::Unchanged`] and must
  /// leave persisted state byte-identical.
  fn upsert(&mut self, obs: Observation) -> Result<UpsertResult, Self::Error>;

  /// One season's observations, strictly ascending by matches played.
  fn read_season(&self, season: Season) -> Result<Vec<Observation>, Self::Error>;

  /// All seasons with at least one observation, ascending.
  fn seasons(&self) -> Result<Vec<Season>, Self::Error>;

  /// Recompute and return the derived rows for one season.
  fn derived_season(
    &self,
    season: Season,
    options: &DeriveOptions,
  ) -> Result<Vec<DerivedRow>, Self::Error> {
    Ok(recompute(&self.read_season(season)?, options))
  }
}

/// The in-memory ledger is itself a store; nothing it does can fail.
impl LedgerStore for Ledger {
  type Error = std::convert::Infallible;

  fn upsert(&mut self, obs: Observation) -> Result<UpsertResult, Self::Error> {
    Ok(Ledger::upsert(self, obs))
  }

  fn read_season(&self, season: Season) -> Result<Vec<Observation>, Self::Error> {
    Ok(Ledger::read_season(self, season))
  }

  fn seasons(&self) -> Result<Vec<Season>, Self::Error> { Ok(Ledger::seasons(self)) }
}
