//! Season identifiers of the form `"<startYear>-<startYear+1>"`.

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Error, Result};

/// The month in which a new season starts when nothing else is configured.
pub const DEFAULT_START_MONTH: u32 = 8;

/// A competition year, e.g. `2025-2026`.
///
/// Ordered by start year, so ledgers sort chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Season {
  start_year: i32,
}

impl Season {
  /// Build the season starting in `start_year`.
  pub fn starting(start_year: i32) -> Self { Self { start_year } }

  /// Parse a `YYYY-YYYY` identifier. The second year must follow the first.
  pub fn parse(s: &str) -> Result<Self> {
    let invalid = || Error::InvalidSeason(s.to_owned());

    let (start, end) = s.split_once('-').ok_or_else(invalid)?;
    if start.len() != 4
      || end.len() != 4
      || !start.bytes().all(|b| b.is_ascii_digit())
      || !end.bytes().all(|b| b.is_ascii_digit())
    {
      return Err(invalid());
    }

    let start: i32 = start.parse().map_err(|_| invalid())?;
    let end: i32 = end.parse().map_err(|_| invalid())?;
    if end != start + 1 {
      return Err(invalid());
    }
    Ok(Self { start_year: start })
  }

  /// The season that `date` falls into, given the month seasons start in.
  pub fn containing(date: NaiveDate, start_month: u32) -> Result<Self> {
    if !(1..=12).contains(&start_month) {
      return Err(Error::InvalidStartMonth(start_month));
    }
    let start_year = if date.month() >= start_month {
      date.year()
    } else {
      date.year() - 1
    };
    Ok(Self { start_year })
  }

  pub fn start_year(&self) -> i32 { self.start_year }

  pub fn end_year(&self) -> i32 { self.start_year + 1 }
}

impl fmt::Display for Season {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:04}-{:04}", self.start_year, self.end_year())
  }
}

impl FromStr for Season {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}

impl Serialize for Season {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

impl<'de> Deserialize<'de> for Season {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Self::parse(&raw).map_err(serde::de::Error::custom)
  }
}
