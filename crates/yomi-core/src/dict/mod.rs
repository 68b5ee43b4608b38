//! Reading dictionary: literal substring → kana reading.
//!
//! Entries are curated by hand. The dictionary is the only source of
//! readings; nothing is derived linguistically. Keys are kept in a
//! `BTreeMap` so saving is always in key order, while lookup walks the
//! entries longest key first.

mod entry;
mod io;
#[cfg(test)]
mod tests;

pub use entry::DictEntry;
pub use io::DictFormat;
pub(crate) use io::{read_source, write_atomic};

use std::collections::BTreeMap;

use crate::error::SourceError;
use crate::unicode::is_kana_only;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadingDictionary {
    entries: BTreeMap<String, String>,
}

/// Outcome of folding accepted entries into a dictionary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub added: usize,
    pub updated: usize,
    pub unchanged: usize,
    /// Entries with an empty reading (unfilled template rows).
    pub skipped: usize,
}

impl ReadingDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from (key, reading) pairs. Later pairs win on duplicate keys.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Result<Self, SourceError>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut dict = Self::new();
        for (key, reading) in pairs {
            dict.insert(key, reading)?;
        }
        Ok(dict)
    }

    /// Insert or replace an entry. Returns the previous reading, if any.
    ///
    /// A reading is a single kana token. It may be empty, which marks a
    /// template row still waiting for its reading.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        reading: impl Into<String>,
    ) -> Result<Option<String>, SourceError> {
        let key = key.into();
        if key.is_empty() {
            return Err(SourceError::EmptyKey);
        }
        let reading = reading.into();
        if !is_valid_reading(&reading) {
            return Err(SourceError::InvalidReading { key, reading });
        }
        Ok(self.entries.insert(key, reading))
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = DictEntry<'_>> {
        self.entries.iter().map(|(k, v)| DictEntry::new(k, v))
    }

    /// All entries, longest key (in chars) first. Equal lengths keep key
    /// order. Recomputed from the live table on every call so edits are
    /// visible immediately.
    pub fn entries_by_descending_key_length(&self) -> impl Iterator<Item = DictEntry<'_>> {
        let mut entries: Vec<DictEntry<'_>> = self.iter().collect();
        entries.sort_by_key(|e| std::cmp::Reverse(e.key_len()));
        entries.into_iter()
    }

    /// Fold accepted entries from `accepted` into this dictionary.
    ///
    /// Rows with an empty reading are skipped so a partially filled gap
    /// template can be merged as-is.
    pub fn merge(&mut self, accepted: &ReadingDictionary) -> MergeStats {
        let mut stats = MergeStats::default();
        for entry in accepted.iter() {
            if entry.reading.is_empty() {
                stats.skipped += 1;
                continue;
            }
            match self.entries.get_mut(entry.key) {
                Some(existing) if existing == entry.reading => stats.unchanged += 1,
                Some(existing) => {
                    *existing = entry.reading.to_string();
                    stats.updated += 1;
                }
                None => {
                    self.entries
                        .insert(entry.key.to_string(), entry.reading.to_string());
                    stats.added += 1;
                }
            }
        }
        stats
    }
}

fn is_valid_reading(reading: &str) -> bool {
    reading.is_empty() || (!reading.contains(char::is_whitespace) && is_kana_only(reading))
}
