//! The in-memory ledger: every observation of every season, in total order.

use std::collections::BTreeMap;

use crate::{
  observation::{LedgerKey, Observation},
  season::Season,
};

/// Outcome of [`Ledger::upsert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertResult {
  /// No observation shared the key; the new one was added.
  Inserted,
  /// An observation with the same key but different values was replaced.
  Updated,
  /// An identical observation was already present; nothing changed.
  Unchanged,
}

impl UpsertResult {
  pub fn is_change(&self) -> bool { !matches!(self, Self::Unchanged) }
}

/// Observations keyed and ordered by `(season, played)`.
///
/// At most one observation exists per key. Observations are never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
  rows: BTreeMap<LedgerKey, Observation>,
}

impl Ledger {
  pub fn new() -> Self { Self::default() }

  pub fn upsert(&mut self, obs: Observation) -> UpsertResult {
    match self.rows.get_mut(&obs.key()) {
      None => {
        self.rows.insert(obs.key(), obs);
        UpsertResult::Inserted
      }
      Some(existing) if *existing == obs => UpsertResult::Unchanged,
      Some(existing) => {
        *existing = obs;
        UpsertResult::Updated
      }
    }
  }

  pub fn get(&self, key: &LedgerKey) -> Option<&Observation> { self.rows.get(key) }

  /// One season's observations, ascending by matches played.
  pub fn read_season(&self, season: Season) -> Vec<Observation> {
    self
      .rows
      .range((season, u32::MIN)..=(season, u32::MAX))
      .map(|(_, obs)| obs.clone())
      .collect()
  }

  /// All seasons present, ascending.
  pub fn seasons(&self) -> Vec<Season> {
    let mut seasons: Vec<Season> = self.rows.keys().map(|(season, _)| *season).collect();
    seasons.dedup();
    seasons
  }

  /// Every observation in `(season, played)` order.
  pub fn iter(&self) -> impl Iterator<Item = &Observation> { self.rows.values() }

  pub fn len(&self) -> usize { self.rows.len() }

  pub fn is_empty(&self) -> bool { self.rows.is_empty() }
}
