//! `matchday addresses`: reduce the national address register to a trimmed
//! copy and a street list.

use anyhow::{Context as _, Result, anyhow};
use matchday_core::address::{Address, StreetLine, fill_dative, street_lines};
use matchday_csv::{parse_table, render_table};
use matchday_store_file::write_atomic;

use crate::{fetch::PageFetcher, settings::AddressesConfig};

const MUNICIPALITY: &str = "SVFNR";
const POSTCODE: &str = "POSTNR";
const STREET: &str = "HEITI_NF";
const STREET_DATIVE: &str = "HEITI_TGF";
const HOUSE_NUMBER: &str = "HUSMERKING";

pub async fn run(fetcher: &impl PageFetcher, cfg: &AddressesConfig) -> Result<()> {
  let body = fetcher
    .fetch(&cfg.url)
    .await
    .with_context(|| format!("fetching {}", cfg.url))?;
  let text = std::str::from_utf8(&body).context("address register is not UTF-8")?;

  let mut addresses = read_addresses(text)?;
  fill_dative(&mut addresses);
  let streets = street_lines(&addresses);

  write_atomic(&cfg.trimmed, render_trimmed(&addresses).as_bytes())?;
  write_atomic(&cfg.streets, render_streets(&streets).as_bytes())?;

  tracing::info!(
    addresses = addresses.len(),
    streets = streets.len(),
    trimmed = %cfg.trimmed.display(),
    street_list = %cfg.streets.display(),
    "address files written"
  );
  Ok(())
}

/// Pick the kept columns out of the downloaded file by header name.
pub fn read_addresses(text: &str) -> Result<Vec<Address>> {
  let (header, rows) = parse_table(text)?;
  let column = |name: &str| {
    header
      .iter()
      .position(|h| h.trim() == name)
      .ok_or_else(|| anyhow!("column {name:?} not in address header"))
  };
  let [m, p, s, d, h] =
    [MUNICIPALITY, POSTCODE, STREET, STREET_DATIVE, HOUSE_NUMBER].map(column);
  let (m, p, s, d, h) = (m?, p?, s?, d?, h?);

  Ok(
    rows
      .iter()
      .map(|row| Address {
        municipality:  cell(row, m),
        postcode:      cell(row, p),
        street:        cell(row, s),
        street_dative: cell(row, d),
        house_number:  cell(row, h),
      })
      .collect(),
  )
}

fn cell(row: &[String], i: usize) -> String {
  row.get(i).map(|c| c.trim().to_owned()).unwrap_or_default()
}

fn render_trimmed(addresses: &[Address]) -> String {
  let header = [MUNICIPALITY, POSTCODE, STREET, STREET_DATIVE, HOUSE_NUMBER].map(String::from);
  let rows: Vec<Vec<String>> = addresses
    .iter()
    .map(|a| {
      vec![
        a.municipality.clone(),
        a.postcode.clone(),
        a.street.clone(),
        a.street_dative.clone(),
        a.house_number.clone(),
      ]
    })
    .collect();
  render_table(&header, &rows)
}

fn render_streets(streets: &[StreetLine]) -> String {
  let header = [POSTCODE, STREET, STREET_DATIVE].map(String::from);
  let rows: Vec<Vec<String>> = streets
    .iter()
    .map(|l| vec![l.postcode.clone(), l.street.clone(), l.street_dative.clone()])
    .collect();
  render_table(&header, &rows)
}
