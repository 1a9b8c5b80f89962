//! CSV writer.

use matchday_core::{
  derive::{DeriveOptions, DerivedRow, recompute},
  ledger::Ledger,
  register::AppearanceRegister,
};

use crate::{LEDGER_HEADER, REGISTER_DATE_FORMAT, REGISTER_HEADER};

// ─── Fields ──────────────────────────────────────────────────────────────────

fn needs_quotes(field: &str) -> bool {
  field.contains([',', '"', '\n', '\r'])
}

fn push_field(out: &mut String, field: &str) {
  if needs_quotes(field) {
    out.push('"');
    out.push_str(&field.replace('"', "\"\""));
    out.push('"');
  } else {
    out.push_str(field);
  }
}

fn push_row<S: AsRef<str>>(out: &mut String, row: &[S]) {
  for (i, field) in row.iter().enumerate() {
    if i > 0 {
      out.push(',');
    }
    push_field(out, field.as_ref());
  }
  out.push('\n');
}

fn flag(set: bool) -> String { if set { "1".into() } else { "0".into() } }

// ─── Ledger ──────────────────────────────────────────────────────────────────

fn ledger_fields(row: &DerivedRow) -> [String; 17] {
  let obs = &row.observation;
  let stats = &row.stats;
  [
    obs.season.to_string(),
    obs.position.to_string(),
    obs.team.clone(),
    obs.played.to_string(),
    obs.won.to_string(),
    obs.drawn.to_string(),
    obs.lost.to_string(),
    obs.goals_for.to_string(),
    obs.goals_against.to_string(),
    obs.goal_difference.to_string(),
    obs.points.to_string(),
    stats.last_result.map(|r| r.to_string()).unwrap_or_default(),
    stats.form.clone(),
    flag(stats.scored),
    flag(stats.conceded),
    stats.scoring_streak_count.to_string(),
    stats.clean_sheet_count.to_string(),
  ]
}

pub(crate) fn ledger_rows(rows: &[DerivedRow]) -> String {
  let mut out = String::new();
  push_row(&mut out, &LEDGER_HEADER);
  for row in rows {
    push_row(&mut out, &ledger_fields(row));
  }
  out
}

pub(crate) fn ledger(ledger: &Ledger, options: &DeriveOptions) -> String {
  let rows: Vec<DerivedRow> = ledger
    .seasons()
    .into_iter()
    .flat_map(|season| recompute(&ledger.read_season(season), options))
    .collect();
  ledger_rows(&rows)
}

// ─── Register ────────────────────────────────────────────────────────────────

pub(crate) fn register(register: &AppearanceRegister) -> String {
  let mut out = String::new();
  push_row(&mut out, &REGISTER_HEADER);
  for entry in register.by_name() {
    push_row(&mut out, &[
      entry.name.clone(),
      entry.first_seen.format(REGISTER_DATE_FORMAT).to_string(),
      entry.last_seen.format(REGISTER_DATE_FORMAT).to_string(),
      entry.id.clone(),
    ]);
  }
  out
}

// ─── Tables ──────────────────────────────────────────────────────────────────

pub(crate) fn table(header: &[String], rows: &[Vec<String>]) -> String {
  let mut out = String::new();
  push_row(&mut out, header);
  for row in rows {
    push_row(&mut out, row);
  }
  out
}
