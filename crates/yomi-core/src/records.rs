//! Card records as stored in the catalog file.
//!
//! The store is a JSON array of objects. Only `id`, `name` and `reading`
//! are interpreted here; every other field is carried through untouched so
//! a reindex pass can rewrite the file without losing data.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::dict::{read_source, write_atomic};
use crate::error::SourceError;

/// Record identifier as it appears in the store (number or string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Str(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{n}"),
            RecordId::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Int(n)
    }
}

impl From<i32> for RecordId {
    fn from(n: i32) -> Self {
        RecordId::Int(i64::from(n))
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Str(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    /// Space-joined reading index, written only by a full reindex pass.
    #[serde(default)]
    pub reading: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            reading: String::new(),
            fields: Map::new(),
        }
    }

    pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    /// String values of the named free-text fields, in the order given.
    /// A field may hold a string or an array of strings; anything else is
    /// ignored.
    pub fn text_fields<'a>(&'a self, names: &'a [String]) -> impl Iterator<Item = &'a str> {
        names
            .iter()
            .filter_map(|name| self.fields.get(name))
            .flat_map(|value| match value {
                Value::String(s) => vec![s.as_str()],
                Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
                _ => Vec::new(),
            })
    }
}

pub fn parse_records(text: &str) -> Result<Vec<Record>, SourceError> {
    let records: Vec<Record> = serde_json::from_str(text)?;
    let mut seen = HashSet::with_capacity(records.len());
    for record in &records {
        if !seen.insert(&record.id) {
            return Err(SourceError::Parse(format!(
                "duplicate record id {}",
                record.id
            )));
        }
    }
    Ok(records)
}

pub fn load_records(path: &Path) -> Result<Vec<Record>, SourceError> {
    let records = parse_records(&read_source(path)?)?;
    debug!(path = %path.display(), records = records.len(), "loaded records");
    Ok(records)
}

/// Atomic write of the whole store as pretty JSON.
pub fn save_records(path: &Path, records: &[Record]) -> Result<(), SourceError> {
    let mut text = serde_json::to_string_pretty(records)?;
    text.push('\n');
    write_atomic(path, text.as_bytes())?;
    debug!(path = %path.display(), records = records.len(), "saved records");
    Ok(())
}
