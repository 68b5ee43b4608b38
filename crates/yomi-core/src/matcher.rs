//! Query matching used on every keystroke.
//!
//! A record matches when the canonical query occurs as a contiguous
//! substring of the canonical name. Three independent tests are OR'd:
//!
//! - raw: katakana form in katakana form, or hiragana form in hiragana form;
//! - loose: the stripped katakana query in either stripped name form;
//! - reading: the same two tests against each member of the record's
//!   reading index, so a kana query can reach a name written in kanji or
//!   Latin letters.
//!
//! The loose test only ever strips the katakana form of the query, and that
//! single value is compared against both stripped name forms. Against the
//! hiragana name form it can only hit when the query has no kana letters.
//! Existing search results depend on this exact pairing.

use tracing::{debug, debug_span};

use crate::index::ReadingIndex;
use crate::normalize::{canonical_forms, strip_decorations, CanonicalForms};
use crate::records::Record;

/// A user query, canonicalized once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    forms: CanonicalForms,
    stripped_katakana: String,
}

impl Query {
    pub fn new(text: &str) -> Self {
        let forms = canonical_forms(text);
        let stripped_katakana = strip_decorations(&forms.katakana);
        Self {
            forms,
            stripped_katakana,
        }
    }

    pub fn forms(&self) -> &CanonicalForms {
        &self.forms
    }

    /// An empty query matches every record.
    pub fn is_empty(&self) -> bool {
        self.forms.katakana.is_empty()
    }
}

/// Which tests accepted a record. `is_match` is their OR.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOutcome {
    pub raw: bool,
    pub loose: bool,
    pub reading: bool,
}

impl MatchOutcome {
    pub fn is_match(&self) -> bool {
        self.raw || self.loose || self.reading
    }
}

/// Canonical and stripped forms of one piece of record text.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TextForms {
    canonical: CanonicalForms,
    stripped: CanonicalForms,
}

impl TextForms {
    fn new(text: &str) -> Self {
        let canonical = canonical_forms(text);
        let stripped = canonical.stripped();
        Self {
            canonical,
            stripped,
        }
    }

    fn raw_match(&self, query: &Query) -> bool {
        self.canonical.katakana.contains(&query.forms.katakana)
            || self.canonical.hiragana.contains(&query.forms.hiragana)
    }

    fn loose_match(&self, query: &Query) -> bool {
        self.stripped.katakana.contains(&query.stripped_katakana)
            || self.stripped.hiragana.contains(&query.stripped_katakana)
    }
}

/// Memoized forms of a record's name and reading index. A record's name
/// does not change between keystrokes, so these are built once per
/// result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchKey {
    name: TextForms,
    readings: Vec<TextForms>,
}

impl SearchKey {
    pub fn new(name: &str, reading: &ReadingIndex) -> Self {
        Self {
            name: TextForms::new(name),
            readings: reading.iter().map(TextForms::new).collect(),
        }
    }

    pub fn from_record(record: &Record) -> Self {
        Self::new(&record.name, &ReadingIndex::from_field(&record.reading))
    }

    pub fn evaluate(&self, query: &Query) -> MatchOutcome {
        MatchOutcome {
            raw: self.name.raw_match(query),
            loose: self.name.loose_match(query),
            reading: self
                .readings
                .iter()
                .any(|r| r.raw_match(query) || r.loose_match(query)),
        }
    }

    pub fn matches(&self, query: &Query) -> bool {
        self.evaluate(query).is_match()
    }
}

/// Match a name alone, without a reading index.
pub fn matches(name: &str, query: &str) -> MatchOutcome {
    SearchKey::new(name, &ReadingIndex::default()).evaluate(&Query::new(query))
}

/// Match a name together with its persisted `reading` field.
pub fn matches_with_reading(name: &str, reading: &str, query: &str) -> MatchOutcome {
    SearchKey::new(name, &ReadingIndex::from_field(reading)).evaluate(&Query::new(query))
}

/// Search keys for a whole record set, reused across queries.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    keys: Vec<SearchKey>,
}

impl SearchIndex {
    pub fn build(records: &[Record]) -> Self {
        Self {
            keys: records.iter().map(SearchKey::from_record).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Positions of the matching records, in store order.
    pub fn search(&self, query: &str) -> Vec<usize> {
        let _span = debug_span!("search", query, candidates = self.keys.len()).entered();
        let query = Query::new(query);
        let hits: Vec<usize> = self
            .keys
            .iter()
            .enumerate()
            .filter(|(_, key)| key.matches(&query))
            .map(|(i, _)| i)
            .collect();
        debug!(hits = hits.len());
        hits
    }
}

/// One-shot filter over a record slice, keeping store order.
pub fn search<'a>(records: &'a [Record], query: &str) -> Vec<&'a Record> {
    let query = Query::new(query);
    records
        .iter()
        .filter(|r| SearchKey::from_record(r).matches(&query))
        .collect()
}
