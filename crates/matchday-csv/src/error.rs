//! Error types for the matchday-csv codec.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("file has content but no header row")]
  MissingHeader,

  #[error("unexpected header: expected {expected:?}, found {found:?}")]
  UnexpectedHeader { expected: String, found: String },

  #[error("line {line}: expected {expected} columns, found {found}")]
  ColumnCount { line: usize, expected: usize, found: usize },

  #[error("line {line}: {column} is not a number: {value:?}")]
  InvalidNumber { line: usize, column: &'static str, value: String },

  #[error("line {line}: invalid season {value:?}")]
  InvalidSeason { line: usize, value: String },

  #[error("line {line}: {column} is not a dd.mm.yyyy date: {value:?}")]
  InvalidDate { line: usize, column: &'static str, value: String },

  #[error("line {line}: second row for season {season} after {played} matches")]
  DuplicateKey { line: usize, season: String, played: u32 },

  #[error("line {line}: duplicate register id {id:?}")]
  DuplicateId { line: usize, id: String },

  #[error("line {line}: unterminated quoted field")]
  UnterminatedQuote { line: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
