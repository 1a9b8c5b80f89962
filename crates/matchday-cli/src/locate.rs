//! Table Locator: parsed HTML → plain text cells.
//!
//! Nothing past this module sees HTML.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td, th").unwrap());

#[derive(Debug, Error)]
pub enum LocateError {
  #[error("invalid selector {0}")]
  InvalidSelector(String),

  #[error("no table matches {0:?}")]
  NoTable(String),

  #[error("no row for {0:?}")]
  NotFound(String),
}

/// A parsed HTML page.
pub struct Page {
  document: Html,
}

impl Page {
  /// Parse `body`, replacing invalid UTF-8.
  pub fn parse(body: &[u8]) -> Self {
    Self { document: Html::parse_document(&String::from_utf8_lossy(body)) }
  }

  fn table(&self, selector: &str) -> Result<ElementRef<'_>, LocateError> {
    let sel = Selector::parse(selector)
      .map_err(|e| LocateError::InvalidSelector(format!("{selector:?}: {e:?}")))?;
    self
      .document
      .select(&sel)
      .next()
      .ok_or_else(|| LocateError::NoTable(selector.to_owned()))
  }

  /// The cells of the first row in the table matching `selector` that
  /// mentions `team`.
  pub fn locate_team_row(&self, selector: &str, team: &str) -> Result<Vec<String>, LocateError> {
    self
      .table(selector)?
      .select(&ROW)
      .map(row_cells)
      .find(|cells| cells.iter().any(|c| c.contains(team)))
      .ok_or_else(|| LocateError::NotFound(team.to_owned()))
  }

  /// Every non-empty row of the table matching `selector`, header included.
  pub fn locate_table(&self, selector: &str) -> Result<Vec<Vec<String>>, LocateError> {
    Ok(
      self
        .table(selector)?
        .select(&ROW)
        .map(row_cells)
        .filter(|cells| !cells.is_empty())
        .collect(),
    )
  }
}

/// Cell texts with each text node trimmed and the pieces concatenated.
fn row_cells(row: ElementRef<'_>) -> Vec<String> {
  row
    .select(&CELL)
    .map(|cell| cell.text().map(str::trim).collect::<String>())
    .collect()
}
