//! Error types for `matchday-core`.

use thiserror::Error;

/// Why a scraped table row could not become an
/// [`Observation`](crate::observation::Observation).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
  #[error("expected at least {expected} cells, found {found}")]
  TooFewCells { expected: usize, found: usize },

  #[error("cell {column} is empty")]
  EmptyCell { column: &'static str },

  #[error("no position prefix in {0:?}")]
  MalformedPosition(String),

  #[error("{column} is not a number: {value:?}")]
  NonNumeric { column: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("extraction failed: {0}")]
  Extract(#[from] ExtractError),

  #[error("invalid season identifier: {0:?}")]
  InvalidSeason(String),

  #[error("invalid season start month: {0}")]
  InvalidStartMonth(u32),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
