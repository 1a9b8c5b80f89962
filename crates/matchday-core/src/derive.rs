//! Derived-Stats Engine.
//!
//! Every derived field of row N depends only on rows of the same season with
//! `played <= N`. The engine is always run over a whole season: a corrected
//! earlier row changes the form string and running counts of everything after
//! it.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::observation::Observation;

/// Most recent results kept in the form string.
pub const FORM_LENGTH: usize = 5;

// ─── Results ─────────────────────────────────────────────────────────────────

/// The outcome of a single match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum Outcome {
  #[strum(serialize = "W")]
  Win,
  #[strum(serialize = "D")]
  Draw,
  #[strum(serialize = "L")]
  Loss,
}

impl Outcome {
  /// Map points earned in one match to its outcome.
  ///
  /// Anything other than 3 or 1 counts as a loss, including deltas that a
  /// three-points-for-a-win table cannot produce.
  pub fn from_points(points: i64) -> Self {
    match points {
      3 => Self::Win,
      1 => Self::Draw,
      _ => Self::Loss,
    }
  }
}

// ─── Options ─────────────────────────────────────────────────────────────────

/// Order of results inside the form string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormOrder {
  /// Chronological: the latest match is the last character.
  #[default]
  OldestFirst,
  /// The latest match is the first character.
  NewestFirst,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeriveOptions {
  pub form_order:     FormOrder,
  /// Placed between results; empty by default (`WDLWW`).
  pub form_separator: String,
}

// ─── Derived rows ────────────────────────────────────────────────────────────

/// The computed statistics of one row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedStats {
  /// Outcome of the match that brought `played` to this row's value. `None`
  /// for matchday 0 and for rows whose predecessor is missing.
  pub last_result:          Option<Outcome>,
  pub form:                 String,
  pub scored:               bool,
  pub conceded:             bool,
  /// Matches with at least one goal scored since the start of the season.
  pub scoring_streak_count: u32,
  /// Matches without conceding since the start of the season.
  pub clean_sheet_count:    u32,
}

/// An observation together with its derived statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedRow {
  pub observation: Observation,
  pub stats:       DerivedStats,
}

// ─── Engine ──────────────────────────────────────────────────────────────────

/// Compute derived rows for one season.
///
/// `season_rows` must belong to a single season and be strictly ascending by
/// `played`, as returned by
/// [`LedgerStore::read_season`](crate::store::LedgerStore::read_season).
pub fn recompute(season_rows: &[Observation], options: &DeriveOptions) -> Vec<DerivedRow> {
  let mut derived: Vec<DerivedRow> = Vec::with_capacity(season_rows.len());

  for (i, obs) in season_rows.iter().enumerate() {
    let prev = i
      .checked_sub(1)
      .map(|j| &derived[j])
      .filter(|p| p.observation.season == obs.season && p.observation.played + 1 == obs.played);

    let mut stats = match (obs.played, prev) {
      (0, _) => DerivedStats::default(),
      (1, _) => first_match(obs),
      (_, Some(prev)) => following_match(obs, prev),
      // Gap in the ledger: nothing to diff against.
      (_, None) => DerivedStats::default(),
    };

    if let Some(current) = stats.last_result {
      stats.form = form(&derived, obs, current, options);
    }
    derived.push(DerivedRow { observation: obs.clone(), stats });
  }

  derived
}

fn first_match(obs: &Observation) -> DerivedStats {
  let scored = obs.goals_for > 0;
  let conceded = obs.goals_against > 0;
  DerivedStats {
    last_result: Some(Outcome::from_points(i64::from(obs.points))),
    form: String::new(),
    scored,
    conceded,
    scoring_streak_count: u32::from(scored),
    clean_sheet_count: u32::from(!conceded),
  }
}

fn following_match(obs: &Observation, prev: &DerivedRow) -> DerivedStats {
  let before = &prev.observation;
  let delta = i64::from(obs.points) - i64::from(before.points);
  let scored = obs.goals_for > before.goals_for;
  let conceded = obs.goals_against > before.goals_against;
  DerivedStats {
    last_result: Some(Outcome::from_points(delta)),
    form: String::new(),
    scored,
    conceded,
    scoring_streak_count: prev.stats.scoring_streak_count + u32::from(scored),
    clean_sheet_count: prev.stats.clean_sheet_count + u32::from(!conceded),
  }
}

/// Results of the last `min(played, 5)` rows ending at the current one.
///
/// Only called for rows with a result; matchday 0 and gap rows keep an empty
/// form.
fn form(
  earlier: &[DerivedRow],
  obs: &Observation,
  current: Outcome,
  options: &DeriveOptions,
) -> String {
  let window = (obs.played as usize).clamp(1, FORM_LENGTH);
  let start = earlier.len().saturating_sub(window - 1);
  let mut results: Vec<Outcome> = earlier[start..]
    .iter()
    .filter(|row| row.observation.season == obs.season)
    .filter_map(|row| row.stats.last_result)
    .chain(Some(current))
    .collect();

  if options.form_order == FormOrder::NewestFirst {
    results.reverse();
  }

  results
    .iter()
    .map(Outcome::to_string)
    .collect::<Vec<_>>()
    .join(&options.form_separator)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::season::Season;

  fn obs(played: u32, points: u32, goals_for: u32, goals_against: u32) -> Observation {
    Observation {
      season: Season::starting(2025),
      position: 10,
      team: "Manchester United".into(),
      played,
      won: 0,
      drawn: 0,
      lost: 0,
      goals_for,
      goals_against,
      goal_difference: goals_for as i32 - goals_against as i32,
      points,
    }
  }

  fn derive(rows: &[Observation]) -> Vec<DerivedRow> { recompute(rows, &DeriveOptions::default()) }

  #[test]
  fn first_matchday_win() {
    let rows = derive(&[obs(1, 3, 2, 0)]);
    let s = &rows[0].stats;

    assert_eq!(s.last_result, Some(Outcome::Win));
    assert!(s.scored);
    assert!(!s.conceded);
    assert_eq!(s.scoring_streak_count, 1);
    assert_eq!(s.clean_sheet_count, 1);
    assert_eq!(s.form, "W");
  }

  #[test]
  fn second_matchday_draw_from_point_delta() {
    let rows = derive(&[obs(1, 3, 2, 0), obs(2, 4, 2, 1)]);
    let s = &rows[1].stats;

    assert_eq!(s.last_result, Some(Outcome::Draw));
    assert!(!s.scored);
    assert!(s.conceded);
    assert_eq!(s.scoring_streak_count, 1);
    assert_eq!(s.clean_sheet_count, 1);
    assert_eq!(s.form, "WD");
  }

  #[test]
  fn corrected_first_row_changes_second_result() {
    let rows = derive(&[obs(1, 1, 2, 0), obs(2, 4, 2, 1)]);
    assert_eq!(rows[0].stats.last_result, Some(Outcome::Draw));
    assert_eq!(rows[1].stats.last_result, Some(Outcome::Win));
    assert_eq!(rows[1].stats.form, "DW");
  }

  #[test]
  fn matchday_zero_is_empty() {
    let rows = derive(&[obs(0, 0, 0, 0), obs(1, 0, 0, 2)]);
    assert_eq!(rows[0].stats, DerivedStats::default());

    // Matchday 1 reads its own points, not a delta against row 0.
    assert_eq!(rows[1].stats.last_result, Some(Outcome::Loss));
    assert_eq!(rows[1].stats.form, "L");
    assert_eq!(rows[1].stats.clean_sheet_count, 0);
  }

  #[test]
  fn gap_resets_to_empty_then_resumes() {
    let rows = derive(&[obs(1, 3, 1, 0), obs(3, 6, 3, 1), obs(4, 9, 4, 1)]);

    let gap = &rows[1].stats;
    assert_eq!(gap.last_result, None);
    assert!(!gap.scored && !gap.conceded);
    assert_eq!(gap.scoring_streak_count, 0);
    assert_eq!(gap.clean_sheet_count, 0);
    assert_eq!(gap.form, "");

    let after = &rows[2].stats;
    assert_eq!(after.last_result, Some(Outcome::Win));
    assert_eq!(after.scoring_streak_count, 1);
    assert_eq!(after.clean_sheet_count, 1);
    assert_eq!(after.form, "WW");
  }

  #[test]
  fn gap_after_several_results_has_empty_form() {
    let rows = derive(&[obs(1, 3, 1, 0), obs(2, 6, 2, 0), obs(4, 9, 3, 0)]);

    assert_eq!(rows[1].stats.form, "WW");
    assert_eq!(rows[2].stats.last_result, None);
    assert_eq!(rows[2].stats, DerivedStats::default());
  }

  #[test]
  fn unusual_point_delta_falls_back_to_loss() {
    let rows = derive(&[obs(1, 3, 1, 0), obs(2, 5, 2, 0)]);
    assert_eq!(rows[1].stats.last_result, Some(Outcome::Loss));

    assert_eq!(Outcome::from_points(-1), Outcome::Loss);
    assert_eq!(Outcome::from_points(2), Outcome::Loss);
  }

  #[test]
  fn form_keeps_last_five() {
    // W L D W W W D
    let rows = derive(&[
      obs(1, 3, 1, 0),
      obs(2, 3, 1, 2),
      obs(3, 4, 2, 3),
      obs(4, 7, 3, 3),
      obs(5, 10, 4, 3),
      obs(6, 13, 6, 3),
      obs(7, 14, 6, 3),
    ]);

    let forms: Vec<&str> = rows.iter().map(|r| r.stats.form.as_str()).collect();
    assert_eq!(forms, vec!["W", "WL", "WLD", "WLDW", "WLDWW", "LDWWW", "DWWWD"]);
    assert!(rows.iter().all(|r| r.stats.form.len() <= FORM_LENGTH));

    assert_eq!(rows[6].stats.scoring_streak_count, 5);
    assert_eq!(rows[6].stats.clean_sheet_count, 5);
  }

  #[test]
  fn form_order_and_separator_options() {
    let options = DeriveOptions {
      form_order:     FormOrder::NewestFirst,
      form_separator: "-".into(),
    };
    let rows = recompute(&[obs(1, 3, 1, 0), obs(2, 3, 1, 2), obs(3, 4, 2, 3)], &options);
    assert_eq!(rows[2].stats.form, "D-L-W");
  }

  #[test]
  fn later_rows_do_not_affect_earlier_ones() {
    let base = vec![obs(1, 3, 2, 0), obs(2, 4, 2, 1), obs(3, 7, 4, 1)];
    let mut changed = base.clone();
    changed[2] = obs(3, 4, 2, 5);

    let a = derive(&base);
    let b = derive(&changed);
    assert_eq!(a[..2], b[..2]);
    assert_ne!(a[2], b[2]);
  }

  #[test]
  fn outcome_round_trips_through_strings() {
    use std::str::FromStr;
    assert_eq!(Outcome::Win.to_string(), "W");
    assert_eq!(Outcome::from_str("D").unwrap(), Outcome::Draw);
    assert!(Outcome::from_str("X").is_err());
  }
}
