//! Appearance register: first and last sighting of each entry in a
//! periodically scraped list.

use std::collections::BTreeMap;

use chrono::NaiveDate;

/// When an identifier was first and last seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appearance {
  pub id:         String,
  /// Name recorded at `first_seen`.
  pub name:       String,
  pub first_seen: NaiveDate,
  pub last_seen:  NaiveDate,
}

/// Outcome of [`AppearanceRegister::observe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observed {
  New,
  /// The sighting moved `first_seen` back or `last_seen` forward.
  Extended,
  Unchanged,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppearanceRegister {
  entries: BTreeMap<String, Appearance>,
}

impl AppearanceRegister {
  pub fn new() -> Self { Self::default() }

  /// Record that `id` (displayed as `name`) was listed on `date`.
  pub fn observe(&mut self, id: &str, name: &str, date: NaiveDate) -> Observed {
    let Some(entry) = self.entries.get_mut(id) else {
      self.entries.insert(id.to_owned(), Appearance {
        id:         id.to_owned(),
        name:       name.to_owned(),
        first_seen: date,
        last_seen:  date,
      });
      return Observed::New;
    };

    let mut outcome = Observed::Unchanged;
    if date < entry.first_seen {
      entry.first_seen = date;
      entry.name = name.to_owned();
      outcome = Observed::Extended;
    }
    if date > entry.last_seen {
      entry.last_seen = date;
      outcome = Observed::Extended;
    }
    outcome
  }

  /// Load a previously persisted entry, merging with anything already known.
  pub fn restore(&mut self, appearance: Appearance) {
    self.observe(&appearance.id, &appearance.name, appearance.first_seen);
    self.observe(&appearance.id, &appearance.name, appearance.last_seen);
  }

  pub fn get(&self, id: &str) -> Option<&Appearance> { self.entries.get(id) }

  /// Entries ordered by name, then id.
  pub fn by_name(&self) -> Vec<&Appearance> {
    let mut entries: Vec<&Appearance> = self.entries.values().collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
    entries
  }

  pub fn len(&self) -> usize { self.entries.len() }

  pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

/// Build an identifier from the non-empty parts, joined with `" - "`.
pub fn compose_id<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
  parts
    .into_iter()
    .map(str::trim)
    .filter(|p| !p.is_empty())
    .collect::<Vec<_>>()
    .join(" - ")
}
