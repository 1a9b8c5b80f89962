//! CSV reader.
//!
//! Strict by intent: a ledger or register that cannot be read completely is
//! reported, never partially loaded.

use std::mem::take;

use chrono::NaiveDate;
use matchday_core::{
  ledger::Ledger,
  observation::Observation,
  register::{Appearance, AppearanceRegister},
  season::Season,
};

use crate::{Error, LEDGER_HEADER, REGISTER_DATE_FORMAT, REGISTER_HEADER, Result};

// ─── Records ─────────────────────────────────────────────────────────────────

/// One logical CSV record and the physical line it starts on.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Record {
  pub line:   usize,
  pub fields: Vec<String>,
}

/// Split `input` into records. Handles quoted fields, doubled quotes,
/// embedded line breaks and CRLF. Blank lines are skipped.
pub(crate) fn records(input: &str) -> Result<Vec<Record>> {
  let input = input.strip_prefix('\u{feff}').unwrap_or(input);

  let mut records = Vec::new();
  let mut fields = Vec::new();
  let mut field = String::new();
  let mut in_quotes = false;
  let mut line = 1;
  let mut record_line = 1;
  let mut chars = input.chars().peekable();

  while let Some(ch) = chars.next() {
    match ch {
      '"' if in_quotes => {
        if chars.peek() == Some(&'"') {
          chars.next();
          field.push('"');
        } else {
          in_quotes = false;
        }
      }
      '"' if field.is_empty() => in_quotes = true,
      ',' if !in_quotes => fields.push(take(&mut field)),
      '\r' | '\n' if !in_quotes => {
        if ch == '\r' && chars.peek() == Some(&'\n') {
          chars.next();
        }
        fields.push(take(&mut field));
        if fields.len() == 1 && fields[0].is_empty() {
          fields.clear();
        } else {
          records.push(Record { line: record_line, fields: take(&mut fields) });
        }
        line += 1;
        record_line = line;
      }
      '\n' => {
        line += 1;
        field.push(ch);
      }
      _ => field.push(ch),
    }
  }

  if in_quotes {
    return Err(Error::UnterminatedQuote { line: record_line });
  }
  if !field.is_empty() || !fields.is_empty() {
    fields.push(field);
    records.push(Record { line: record_line, fields });
  }

  Ok(records)
}

/// Split off and check the header row. `None` when there are no records.
fn body<'a>(records: &'a [Record], expected: &[&str]) -> Result<Option<&'a [Record]>> {
  let Some((header, rest)) = records.split_first() else {
    return Ok(None);
  };

  let matches = header.fields.len() == expected.len()
    && header.fields.iter().zip(expected).all(|(f, e)| f.trim() == *e);
  if !matches {
    return Err(Error::UnexpectedHeader {
      expected: expected.join(","),
      found:    header.fields.join(","),
    });
  }

  for record in rest {
    if record.fields.len() != expected.len() {
      return Err(Error::ColumnCount {
        line:     record.line,
        expected: expected.len(),
        found:    record.fields.len(),
      });
    }
  }

  Ok(Some(rest))
}

// ─── Tables ──────────────────────────────────────────────────────────────────

/// Header and rows of a foreign CSV file. Rows keep whatever width they have.
pub(crate) fn table(input: &str) -> Result<(Vec<String>, Vec<Vec<String>>)> {
  let mut records = records(input)?.into_iter();
  let header = records.next().ok_or(Error::MissingHeader)?;
  Ok((header.fields, records.map(|r| r.fields).collect()))
}

// ─── Ledger ──────────────────────────────────────────────────────────────────

pub(crate) fn ledger(input: &str) -> Result<Ledger> {
  let records = records(input)?;
  let mut ledger = Ledger::new();

  let Some(rows) = body(&records, &LEDGER_HEADER)? else {
    return Ok(ledger);
  };

  for record in rows {
    let obs = observation(record)?;
    if ledger.get(&obs.key()).is_some() {
      return Err(Error::DuplicateKey {
        line:   record.line,
        season: obs.season.to_string(),
        played: obs.played,
      });
    }
    ledger.upsert(obs);
  }

  Ok(ledger)
}

fn observation(record: &Record) -> Result<Observation> {
  let f = &record.fields;
  let line = record.line;

  let season = Season::parse(f[0].trim()).map_err(|_| Error::InvalidSeason {
    line,
    value: f[0].clone(),
  })?;

  Ok(Observation {
    season,
    position: number(line, "position", &f[1])?,
    team: f[2].trim().to_owned(),
    played: number(line, "played", &f[3])?,
    won: number(line, "won", &f[4])?,
    drawn: number(line, "drawn", &f[5])?,
    lost: number(line, "lost", &f[6])?,
    goals_for: number(line, "goals_for", &f[7])?,
    goals_against: number(line, "goals_against", &f[8])?,
    goal_difference: signed(line, "goal_difference", &f[9])?,
    points: number(line, "points", &f[10])?,
  })
}

fn number(line: usize, column: &'static str, value: &str) -> Result<u32> {
  value.trim().parse().map_err(|_| Error::InvalidNumber {
    line,
    column,
    value: value.to_owned(),
  })
}

fn signed(line: usize, column: &'static str, value: &str) -> Result<i32> {
  let trimmed = value.trim();
  trimmed
    .strip_prefix('+')
    .unwrap_or(trimmed)
    .parse()
    .map_err(|_| Error::InvalidNumber {
      line,
      column,
      value: value.to_owned(),
    })
}

// ─── Register ────────────────────────────────────────────────────────────────

pub(crate) fn register(input: &str) -> Result<AppearanceRegister> {
  let records = records(input)?;
  let mut register = AppearanceRegister::new();

  let Some(rows) = body(&records, &REGISTER_HEADER)? else {
    return Ok(register);
  };

  for record in rows {
    let f = &record.fields;
    let id = f[3].clone();
    if register.get(&id).is_some() {
      return Err(Error::DuplicateId { line: record.line, id });
    }
    register.restore(Appearance {
      name: f[0].clone(),
      first_seen: date(record.line, "first_seen", &f[1])?,
      last_seen: date(record.line, "last_seen", &f[2])?,
      id,
    });
  }

  Ok(register)
}

fn date(line: usize, column: &'static str, value: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(value.trim(), REGISTER_DATE_FORMAT).map_err(|_| Error::InvalidDate {
    line,
    column,
    value: value.to_owned(),
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn fields(records: &[Record]) -> Vec<Vec<&str>> {
    records
      .iter()
      .map(|r| r.fields.iter().map(String::as_str).collect())
      .collect()
  }

  #[test]
  fn splits_plain_records() {
    let recs = records("a,b,c\n1,2,3\n").unwrap();
    assert_eq!(fields(&recs), vec![vec!["a", "b", "c"], vec!["1", "2", "3"]]);
    assert_eq!(recs[1].line, 2);
  }

  #[test]
  fn quoted_fields_with_separators_and_newlines() {
    let recs = records("\"a,b\",\"say \"\"hi\"\"\"\n\"multi\nline\",x\nlast,row").unwrap();
    assert_eq!(
      fields(&recs),
      vec![vec!["a,b", "say \"hi\""], vec!["multi\nline", "x"], vec!["last", "row"]]
    );
    assert_eq!(recs[2].line, 4);
  }

  #[test]
  fn blank_lines_are_skipped_and_empty_fields_kept() {
    let recs = records("a,,c\n\n,\n").unwrap();
    assert_eq!(fields(&recs), vec![vec!["a", "", "c"], vec!["", ""]]);
    assert_eq!(recs[1].line, 3);
  }
}
