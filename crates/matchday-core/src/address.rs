//! Address list clean-up: blank dative street names filled from their
//! neighbours, and a per-house street list for lookups.

use std::collections::{HashMap, HashSet};

/// One row of the national address register, reduced to the columns kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
  pub municipality:  String,
  pub postcode:      String,
  /// Street name, nominative.
  pub street:        String,
  /// Street name, dative. Often blank upstream.
  pub street_dative: String,
  pub house_number:  String,
}

/// A street line with the house number appended, e.g. `"Laugavegur 12"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreetLine {
  pub postcode:      String,
  pub street:        String,
  pub street_dative: String,
}

/// Fill blank `street_dative` values from the first non-blank one sharing
/// the same postcode and street.
pub fn fill_dative(addresses: &mut [Address]) {
  let mut known: HashMap<(String, String), String> = HashMap::new();
  for a in addresses.iter() {
    if !a.street_dative.is_empty() {
      known
        .entry((a.postcode.clone(), a.street.clone()))
        .or_insert_with(|| a.street_dative.clone());
    }
  }

  for a in addresses.iter_mut().filter(|a| a.street_dative.is_empty()) {
    if let Some(dative) = known.get(&(a.postcode.clone(), a.street.clone())) {
      a.street_dative = dative.clone();
    }
  }
}

/// One line per distinct (postcode, street and house number), sorted by
/// postcode then street. The first occurrence of a duplicate wins.
///
/// Call [`fill_dative`] first; a dative that is still blank stays blank
/// rather than becoming a bare house number.
pub fn street_lines(addresses: &[Address]) -> Vec<StreetLine> {
  let mut seen = HashSet::new();
  let mut lines: Vec<StreetLine> = addresses
    .iter()
    .map(|a| StreetLine {
      postcode:      a.postcode.clone(),
      street:        with_number(&a.street, &a.house_number),
      street_dative: if a.street_dative.is_empty() {
        String::new()
      } else {
        with_number(&a.street_dative, &a.house_number)
      },
    })
    .filter(|line| seen.insert((line.postcode.clone(), line.street.clone())))
    .collect();

  lines.sort_by(|a, b| {
    postcode_order(&a.postcode)
      .cmp(&postcode_order(&b.postcode))
      .then_with(|| a.street.cmp(&b.street))
  });
  lines
}

fn with_number(street: &str, number: &str) -> String {
  if number.is_empty() { street.to_owned() } else { format!("{street} {number}") }
}

/// Numeric postcodes in numeric order; anything else after them.
fn postcode_order(postcode: &str) -> (bool, u32, &str) {
  match postcode.trim().parse::<u32>() {
    Ok(n) => (false, n, postcode),
    Err(_) => (true, 0, postcode),
  }
}
