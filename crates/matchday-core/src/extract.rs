//! Row Extractor: plain text cells → [`Observation`].
//!
//! Expected layout (the HTML has already been stripped by the table locator):
//!
//! ```text
//! "7Manchester United" | P | W | D | L | F | A | GD | Pts | <form>
//! ```
//!
//! The leading cell carries the position and team name glued together. Cells
//! past the ninth (the form sparkline) are discarded.

use std::sync::LazyLock;

use regex::Regex;

use crate::{ExtractError, observation::Observation, season::Season};

/// Number of cells the layout above needs, not counting the form sparkline.
pub const REQUIRED_CELLS: usize = 9;

/// Leading digits, then a name that starts with a letter and may carry the
/// punctuation found in club names (`&`, `'`, `.`, `-`).
static POSITION_TEAM: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^\s*(\d+)\s*(\p{L}[\p{L}\s&'.\-]*)").unwrap());

/// Turn one scraped row into an [`Observation`] for `season`.
///
/// Pure; on error nothing is produced, so callers never see a partial row.
pub fn extract(season: Season, cells: &[String]) -> Result<Observation, ExtractError> {
  if cells.len() < REQUIRED_CELLS {
    return Err(ExtractError::TooFewCells {
      expected: REQUIRED_CELLS,
      found:    cells.len(),
    });
  }

  let (position, team) = split_position_team(&cells[0])?;

  Ok(Observation {
    season,
    position,
    team,
    played: count(&cells[1], "played")?,
    won: count(&cells[2], "won")?,
    drawn: count(&cells[3], "drawn")?,
    lost: count(&cells[4], "lost")?,
    goals_for: count(&cells[5], "goals_for")?,
    goals_against: count(&cells[6], "goals_against")?,
    goal_difference: signed(&cells[7], "goal_difference")?,
    points: count(&cells[8], "points")?,
  })
}

/// Split `"12Aston Villa"` into `(12, "Aston Villa")`.
pub fn split_position_team(cell: &str) -> Result<(u32, String), ExtractError> {
  let malformed = || ExtractError::MalformedPosition(cell.to_owned());

  let caps = POSITION_TEAM.captures(cell).ok_or_else(malformed)?;
  let position = caps[1].parse().map_err(|_| malformed())?;
  let team = caps[2].trim();
  if team.is_empty() {
    return Err(malformed());
  }
  Ok((position, team.to_owned()))
}

fn non_empty<'a>(cell: &'a str, column: &'static str) -> Result<&'a str, ExtractError> {
  let cell = cell.trim();
  if cell.is_empty() {
    Err(ExtractError::EmptyCell { column })
  } else {
    Ok(cell)
  }
}

fn count(cell: &str, column: &'static str) -> Result<u32, ExtractError> {
  let cell = non_empty(cell, column)?;
  cell.parse().map_err(|_| ExtractError::NonNumeric {
    column,
    value: cell.to_owned(),
  })
}

/// Goal difference is printed with an explicit sign on most tables (`+4`).
fn signed(cell: &str, column: &'static str) -> Result<i32, ExtractError> {
  let cell = non_empty(cell, column)?;
  let digits = cell.strip_prefix('+').unwrap_or(cell);
  digits.parse().map_err(|_| ExtractError::NonNumeric {
    column,
    value: cell.to_owned(),
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn cells(raw: &[&str]) -> Vec<String> { raw.iter().map(|c| c.to_string()).collect() }

  fn season() -> Season { Season::starting(2025) }

  #[test]
  fn extracts_full_row_and_drops_form() {
    let row = cells(&["7Manchester United", "10", "5", "2", "3", "17", "15", "+2", "17", "WWDLW"]);
    let obs = extract(season(), &row).unwrap();

    assert_eq!(obs.position, 7);
    assert_eq!(obs.team, "Manchester United");
    assert_eq!(obs.played, 10);
    assert_eq!((obs.won, obs.drawn, obs.lost), (5, 2, 3));
    assert_eq!((obs.goals_for, obs.goals_against), (17, 15));
    assert_eq!(obs.goal_difference, 2);
    assert_eq!(obs.points, 17);
    assert_eq!(obs.season, season());
  }

  #[test]
  fn negative_goal_difference() {
    let row = cells(&["18Burnley", "10", "2", "1", "7", "9", "20", "-11", "7"]);
    let obs = extract(season(), &row).unwrap();
    assert_eq!(obs.goal_difference, -11);
  }

  #[test]
  fn too_few_cells() {
    let row = cells(&["1Arsenal", "10", "8"]);
    assert_eq!(
      extract(season(), &row).unwrap_err(),
      ExtractError::TooFewCells { expected: 9, found: 3 }
    );
  }

  #[test]
  fn missing_position_prefix() {
    let row = cells(&["Arsenal", "10", "8", "1", "1", "20", "5", "+15", "25"]);
    assert_eq!(
      extract(season(), &row).unwrap_err(),
      ExtractError::MalformedPosition("Arsenal".into())
    );
  }

  #[test]
  fn position_without_team_is_malformed() {
    assert!(matches!(
      split_position_team("12"),
      Err(ExtractError::MalformedPosition(_))
    ));
  }

  #[test]
  fn non_numeric_field() {
    let row = cells(&["1Arsenal", "10", "eight", "1", "1", "20", "5", "+15", "25"]);
    assert_eq!(
      extract(season(), &row).unwrap_err(),
      ExtractError::NonNumeric { column: "won", value: "eight".into() }
    );
  }

  #[test]
  fn empty_field() {
    let row = cells(&["1Arsenal", "10", "8", "1", "1", "", "5", "+15", "25"]);
    assert_eq!(
      extract(season(), &row).unwrap_err(),
      ExtractError::EmptyCell { column: "goals_for" }
    );
  }

  #[test]
  fn team_name_keeps_punctuation() {
    assert_eq!(
      split_position_team("5Brighton & Hove Albion").unwrap(),
      (5, "Brighton & Hove Albion".into())
    );
    assert_eq!(split_position_team("16Nott'm Forest").unwrap(), (16, "Nott'm Forest".into()));
    assert_eq!(split_position_team("20St. Mirren").unwrap(), (20, "St. Mirren".into()));
    assert_eq!(split_position_team("9Wolverhampton-Wanderers").unwrap().1, "Wolverhampton-Wanderers");
  }

  #[test]
  fn team_name_is_trimmed() {
    assert_eq!(split_position_team("3 Chelsea ").unwrap(), (3, "Chelsea".into()));
  }
}
