//! Reading index: the kana readings of every dictionary key found in a
//! record's text.
//!
//! Keys are visited longest first but matching is not exclusive. A key
//! nested inside a longer matched key still contributes its own reading,
//! so "ホロライブ4期生" yields both the group reading and the reading of
//! "ホロライブ". Search recall depends on that redundancy.

use std::collections::HashSet;

use tracing::{debug, debug_span};

use crate::dict::ReadingDictionary;
use crate::records::Record;
use crate::settings::Settings;

/// How a record's searchable text is assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexOptions {
    /// Joins the name and the free-text fields.
    pub separator: String,
    /// Record fields appended after the name, in order.
    pub text_fields: Vec<String>,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            separator: " ".to_string(),
            text_fields: vec!["tags".to_string(), "category".to_string()],
        }
    }
}

impl IndexOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            separator: settings.index.separator.clone(),
            text_fields: settings.index.text_fields.clone(),
        }
    }
}

/// Deduplicated set of readings, kept in accumulation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadingIndex {
    readings: Vec<String>,
}

impl ReadingIndex {
    /// Parse the persisted `reading` field.
    pub fn from_field(field: &str) -> Self {
        let mut index = Self::default();
        for reading in field.split_whitespace() {
            index.push(reading);
        }
        index
    }

    /// Space-joined form stored in `Record::reading`.
    pub fn to_field(&self) -> String {
        self.readings.join(" ")
    }

    fn push(&mut self, reading: &str) {
        if !self.contains(reading) {
            self.readings.push(reading.to_string());
        }
    }

    pub fn contains(&self, reading: &str) -> bool {
        self.readings.iter().any(|r| r == reading)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.readings.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

/// Name followed by the configured free-text fields.
pub fn searchable_text(record: &Record, options: &IndexOptions) -> String {
    let mut text = record.name.clone();
    for field in record.text_fields(&options.text_fields) {
        text.push_str(&options.separator);
        text.push_str(field);
    }
    text
}

/// Readings of every dictionary key that occurs literally in `text`.
///
/// Entries without a reading are ignored. Each reading is one member,
/// taken whole.
pub fn readings_in(text: &str, dict: &ReadingDictionary) -> ReadingIndex {
    let mut index = ReadingIndex::default();
    for entry in dict.entries_by_descending_key_length() {
        if entry.reading.is_empty() || !text.contains(entry.key) {
            continue;
        }
        index.push(entry.reading);
    }
    index
}

pub fn compute_reading(
    record: &Record,
    dict: &ReadingDictionary,
    options: &IndexOptions,
) -> ReadingIndex {
    readings_in(&searchable_text(record, options), dict)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    pub records: usize,
    /// Records whose persisted reading differs from before the pass.
    pub changed: usize,
    /// Records left with an empty reading.
    pub empty: usize,
}

/// Full batch pass: overwrite `reading` on every record.
pub fn reindex(
    records: &mut [Record],
    dict: &ReadingDictionary,
    options: &IndexOptions,
) -> IndexStats {
    let _span = debug_span!("reindex", records = records.len(), entries = dict.len()).entered();
    let mut stats = IndexStats {
        records: records.len(),
        ..IndexStats::default()
    };
    for record in records.iter_mut() {
        let field = compute_reading(record, dict, options).to_field();
        if field != record.reading {
            stats.changed += 1;
        }
        if field.is_empty() {
            stats.empty += 1;
        }
        record.reading = field;
    }
    debug!(changed = stats.changed, empty = stats.empty);
    stats
}

/// Dictionary keys that occur in no record's searchable text, in key order.
pub fn unused_keys<'a>(
    records: &[Record],
    dict: &'a ReadingDictionary,
    options: &IndexOptions,
) -> Vec<&'a str> {
    let texts: Vec<String> = records
        .iter()
        .map(|r| searchable_text(r, options))
        .collect();
    let mut used: HashSet<&str> = HashSet::new();
    for entry in dict.iter() {
        if texts.iter().any(|t| t.contains(entry.key)) {
            used.insert(entry.key);
        }
    }
    dict.iter()
        .map(|e| e.key)
        .filter(|k| !used.contains(k))
        .collect()
}
