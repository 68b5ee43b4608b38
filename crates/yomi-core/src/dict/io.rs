use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use tracing::{debug, warn};

use super::ReadingDictionary;
use crate::error::SourceError;

/// On-disk dictionary layout, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictFormat {
    /// `{ "key": "reading", ... }`
    Json,
    /// `key\treading` per line; blank lines and `#` comments are skipped.
    Tsv,
}

impl DictFormat {
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(DictFormat::Json),
            Some("tsv") | Some("txt") => Ok(DictFormat::Tsv),
            _ => Err(SourceError::UnknownFormat(path.display().to_string())),
        }
    }
}

impl ReadingDictionary {
    /// Load a dictionary file, picking the format from its extension.
    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let format = DictFormat::from_path(path)?;
        let text = read_source(path)?;
        let dict = Self::parse(&text, format)?;
        debug!(path = %path.display(), entries = dict.len(), "loaded dictionary");
        Ok(dict)
    }

    pub fn parse(text: &str, format: DictFormat) -> Result<Self, SourceError> {
        match format {
            DictFormat::Json => Self::from_json_str(text),
            DictFormat::Tsv => Self::from_tsv_str(text),
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self, SourceError> {
        let JsonPairs(pairs) = serde_json::from_str(text)?;
        let mut dict = Self::new();
        let mut empty = 0;
        for (key, reading) in pairs {
            if reading.is_empty() {
                empty += 1;
            }
            if dict.contains_key(&key) {
                return Err(SourceError::Parse(format!("duplicate key {key:?}")));
            }
            dict.insert(key, reading)?;
        }
        if empty > 0 {
            warn!(empty, "dictionary has entries without a reading");
        }
        Ok(dict)
    }

    pub fn from_tsv_str(text: &str) -> Result<Self, SourceError> {
        let mut dict = Self::new();
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, reading)) = line.split_once('\t') else {
                return Err(SourceError::Parse(format!(
                    "line {}: expected `key<TAB>reading`",
                    lineno + 1
                )));
            };
            if key.is_empty() {
                return Err(SourceError::Parse(format!("line {}: empty key", lineno + 1)));
            }
            let previous = dict
                .insert(key, reading)
                .map_err(|e| SourceError::Parse(format!("line {}: {e}", lineno + 1)))?;
            if previous.is_some() {
                return Err(SourceError::Parse(format!(
                    "line {}: duplicate key {key:?}",
                    lineno + 1
                )));
            }
        }
        Ok(dict)
    }

    /// Pretty JSON in key order, newline-terminated.
    pub fn to_json_string(&self) -> Result<String, SourceError> {
        let mut out = serde_json::to_string_pretty(&self.entries)?;
        out.push('\n');
        Ok(out)
    }

    pub fn to_tsv_string(&self) -> Result<String, SourceError> {
        let mut out = String::new();
        for entry in self.iter() {
            if entry.key.contains(['\t', '\n']) || entry.reading.contains(['\t', '\n']) {
                return Err(SourceError::Parse(format!(
                    "entry {:?} cannot be written as TSV",
                    entry.key
                )));
            }
            out.push_str(entry.key);
            out.push('\t');
            out.push_str(entry.reading);
            out.push('\n');
        }
        Ok(out)
    }

    /// Atomic write in key order: write to .tmp then rename.
    pub fn save(&self, path: &Path) -> Result<(), SourceError> {
        let text = match DictFormat::from_path(path)? {
            DictFormat::Json => self.to_json_string()?,
            DictFormat::Tsv => self.to_tsv_string()?,
        };
        write_atomic(path, text.as_bytes())?;
        debug!(path = %path.display(), entries = self.len(), "saved dictionary");
        Ok(())
    }
}

/// A JSON object read in document order, duplicate keys included.
struct JsonPairs(Vec<(String, String)>);

impl<'de> Deserialize<'de> for JsonPairs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PairsVisitor;

        impl<'de> Visitor<'de> for PairsVisitor {
            type Value = JsonPairs;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object of string readings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<JsonPairs, A::Error> {
                let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(pair) = map.next_entry::<String, String>()? {
                    pairs.push(pair);
                }
                Ok(JsonPairs(pairs))
            }
        }

        deserializer.deserialize_map(PairsVisitor)
    }
}

/// Read a whole source file, mapping a missing file to `NotFound`.
pub(crate) fn read_source(path: &Path) -> Result<String, SourceError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(SourceError::NotFound(path.to_path_buf()))
        }
        Err(e) => Err(e.into()),
    }
}

pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), io::Error> {
    let tmp = path.with_extension("tmp");
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
