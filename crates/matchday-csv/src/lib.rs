//! CSV codec for matchday ledgers, appearance registers and table snapshots.
//!
//! Pure synchronous; no filesystem or HTTP dependencies. Output is
//! deterministic: identical input renders byte-identical text, with `\n`
//! line endings and fields quoted only when they contain `,`, `"` or a line
//! break.
//!
//! # Ledger layout
//!
//! ```text
//! season,position,team,played,won,drawn,lost,goals_for,goals_against,goal_difference,points,last_result,form,scored_flag,conceded_flag,scoring_streak_count,clean_sheet_count
//! ```

pub mod error;
mod parse;
mod render;

pub use error::{Error, Result};
use matchday_core::{
  derive::{DeriveOptions, DerivedRow},
  ledger::Ledger,
  register::AppearanceRegister,
};

/// Column order of a persisted ledger.
pub const LEDGER_HEADER: [&str; 17] = [
  "season",
  "position",
  "team",
  "played",
  "won",
  "drawn",
  "lost",
  "goals_for",
  "goals_against",
  "goal_difference",
  "points",
  "last_result",
  "form",
  "scored_flag",
  "conceded_flag",
  "scoring_streak_count",
  "clean_sheet_count",
];

/// Column order of a persisted appearance register.
pub const REGISTER_HEADER: [&str; 4] = ["name", "first_seen", "last_seen", "id"];

/// Date format used in register files.
pub const REGISTER_DATE_FORMAT: &str = "%d.%m.%Y";

// ─── Ledger ──────────────────────────────────────────────────────────────────

/// Render derived rows under the ledger header, in the order given.
pub fn render(rows: &[DerivedRow]) -> String { render::ledger_rows(rows) }

/// Recompute every season of `ledger` and render the whole file.
pub fn render_ledger(ledger: &Ledger, options: &DeriveOptions) -> String {
  render::ledger(ledger, options)
}

/// Parse a persisted ledger.
///
/// Only the observation columns are read back; derived columns are
/// recomputed on the next write. Empty input is an empty ledger. Any other
/// irregularity is an error so that callers never overwrite history they
/// could not read.
pub fn parse(input: &str) -> Result<Ledger> { parse::ledger(input) }

// ─── Register ────────────────────────────────────────────────────────────────

pub fn render_register(register: &AppearanceRegister) -> String { render::register(register) }

pub fn parse_register(input: &str) -> Result<AppearanceRegister> { parse::register(input) }

// ─── Snapshots ───────────────────────────────────────────────────────────────

/// Read a CSV file produced elsewhere into its header and rows.
///
/// Unlike ledgers, rows are not checked against the header width. Input
/// without any record is [`Error::MissingHeader`].
pub fn parse_table(input: &str) -> Result<(Vec<String>, Vec<Vec<String>>)> { parse::table(input) }

/// Render an arbitrary table; `header` first.
pub fn render_table(header: &[String], rows: &[Vec<String>]) -> String {
  render::table(header, rows)
}



#[cfg(test)]
mod table_tests {
  use super::*;

  #[test]
  fn foreign_table_keeps_ragged_rows() {
    let text = "\u{feff}SVFNR,POSTNR,HEITI_NF\r\n0000,101,\"Aðalstræti\"\r\n1000,200\r\n";
    let (header, rows) = parse_table(text).unwrap();
    assert_eq!(header, ["SVFNR", "POSTNR", "HEITI_NF"]);
    assert_eq!(rows, [vec!["0000", "101", "Aðalstræti"], vec!["1000", "200"]]);
  }

  #[test]
  fn empty_table_has_no_header() {
    assert!(matches!(parse_table("\n\n").unwrap_err(), Error::MissingHeader));
  }
}
