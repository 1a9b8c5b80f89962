//! Observation: one scraped snapshot of a team's league-table row.
//!
//! Observations are keyed by `(season, played)`: the matches-played count is
//! the row's position in the season's chronological order.

use serde::{Deserialize, Serialize};

use crate::season::Season;

/// The upsert key of an observation.
pub type LedgerKey = (Season, u32);

/// A team's standing at a given matches-played count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
  pub season:          Season,
  pub position:        u32,
  pub team:            String,
  /// Matches played; unique within a season.
  pub played:          u32,
  pub won:             u32,
  pub drawn:           u32,
  pub lost:            u32,
  pub goals_for:       u32,
  pub goals_against:   u32,
  pub goal_difference: i32,
  pub points:          u32,
}

impl Observation {
  pub fn key(&self) -> LedgerKey { (self.season, self.played) }
}
