//! Dictionary coverage report.
//!
//! Splits every record's text into keyword candidates and lists the ones
//! that still need a reading: not plain kana and not already a dictionary
//! key. The report is advisory only. Accepted readings reach the
//! dictionary through an explicit [`ReadingDictionary::merge`].

use std::collections::{HashMap, HashSet};

use tracing::{debug, debug_span};

use crate::dict::ReadingDictionary;
use crate::index::IndexOptions;
use crate::records::Record;
use crate::unicode::{is_digit, is_kana_only};

/// Token boundaries: bracket pairs, colon/slash/hash/ampersand, comma and
/// period variants and sentence-final marks, each in narrow and wide form.
/// Whitespace is not a boundary, so "Mori Calliope" stays one token.
pub const TOKEN_DELIMITERS: &[char] = &[
    '(', ')', '（', '）', '[', ']', '［', '］', '{', '}', '｛', '｝', '<', '>', '＜', '＞',
    '「', '」', '『', '』', '【', '】', '〈', '〉', '《', '》', ':', '：', '/', '／', '#',
    '＃', '&', '＆', ',', '，', '、', '.', '．', '。', '!', '！', '?', '？',
];

fn is_delimiter(c: char) -> bool {
    TOKEN_DELIMITERS.contains(&c)
}

/// Keyword candidates in `text`: longer than one char and not all digits.
/// Whitespace left around a token by a delimiter is trimmed off.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_delimiter).map(str::trim).filter(|t| {
        let mut chars = t.chars();
        chars.next().is_some() && chars.next().is_some() && !t.chars().all(is_digit)
    })
}

/// True if `token` needs a manual reading.
pub fn needs_reading(token: &str, dict: &ReadingDictionary) -> bool {
    !is_kana_only(token) && !dict.contains_key(token)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapRow {
    pub token: String,
    /// Number of distinct records containing the token.
    pub frequency: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GapReport {
    rows: Vec<GapRow>,
    /// Distinct candidate tokens seen before filtering.
    pub candidates: usize,
}

impl GapReport {
    /// Uncovered tokens, most frequent first (ties in token order).
    pub fn rows(&self) -> &[GapRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn frequency(&self, token: &str) -> Option<usize> {
        self.rows
            .iter()
            .find(|r| r.token == token)
            .map(|r| r.frequency)
    }

    /// The "worth curating" view: rows seen in at least `min_frequency`
    /// records.
    pub fn worth_curating(&self, min_frequency: usize) -> impl Iterator<Item = &GapRow> {
        self.rows
            .iter()
            .filter(move |r| r.frequency >= min_frequency)
    }

    /// A dictionary skeleton of the curated rows with empty readings, for
    /// the maintainer to fill in and merge.
    pub fn template(&self, min_frequency: usize) -> ReadingDictionary {
        let mut dict = ReadingDictionary::new();
        for row in self.worth_curating(min_frequency) {
            if let Err(e) = dict.insert(row.token.as_str(), "") {
                debug!(token = %row.token, error = %e, "template row skipped");
            }
        }
        dict
    }
}

pub fn find_gaps(
    records: &[Record],
    dict: &ReadingDictionary,
    options: &IndexOptions,
) -> GapReport {
    let _span = debug_span!("find_gaps", records = records.len(), entries = dict.len()).entered();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for record in records {
        // each field on its own, so no token spans two fields
        let tokens: HashSet<&str> = std::iter::once(record.name.as_str())
            .chain(record.text_fields(&options.text_fields))
            .flat_map(tokenize)
            .collect();
        for token in tokens {
            *counts.entry(token.to_string()).or_default() += 1;
        }
    }

    let candidates = counts.len();
    let mut rows: Vec<GapRow> = counts
        .into_iter()
        .filter(|(token, _)| needs_reading(token, dict))
        .map(|(token, frequency)| GapRow { token, frequency })
        .collect();
    rows.sort_by(|a, b| {
        b.frequency
            .cmp(&a.frequency)
            .then_with(|| a.token.cmp(&b.token))
    });
    debug!(candidates, uncovered = rows.len());

    GapReport { rows, candidates }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn tokens(text: &str) -> Vec<&str> {
        tokenize(text).collect()
    }

    #[test]
    fn tokenize_splits_on_delimiters() {
        assert_eq!(
            tokens("ホロライブEN「Myth」/ Ninomae Ina'nis"),
            vec!["ホロライブEN", "Myth", "Ninomae Ina'nis"]
        );
        assert_eq!(tokens("＃兎田ぺこら＆ぺこーら！"), vec!["兎田ぺこら", "ぺこーら"]);
        assert_eq!(tokens("【推し】ホロメン、2024。"), vec!["推し", "ホロメン"]);
    }

    #[test]
    fn whitespace_does_not_split() {
        assert_eq!(tokens("Mori Calliope"), vec!["Mori Calliope"]);
        assert_eq!(tokens(" #Gawr Gura, "), vec!["Gawr Gura"]);
    }

    #[test]
    fn tokenize_drops_short_and_numeric() {
        assert_eq!(
            tokens("a/1/12/１２/ 4期生 /xyz123/の/ 7 "),
            vec!["4期生", "xyz123"]
        );
        assert!(tokens("").is_empty());
    }

    #[test]
    fn multi_word_tag_is_one_candidate() {
        let records = vec![
            Record::new(1, "森カリオペ").with_field("tags", json!(["Mori Calliope"])),
            Record::new(2, "森カリオペ").with_field("tags", json!(["Mori Calliope"])),
        ];
        let dict = ReadingDictionary::from_pairs([("森", "もり")]).unwrap();
        let report = find_gaps(&records, &dict, &IndexOptions::default());
        let rows: Vec<(&str, usize)> = report
            .rows()
            .iter()
            .map(|r| (r.token.as_str(), r.frequency))
            .collect();
        assert_eq!(rows, vec![("Mori Calliope", 2), ("森カリオペ", 2)]);
        assert_eq!(report.frequency("Mori"), None);
    }

    #[test]
    fn fields_are_tokenized_separately() {
        // a joined "Myth Gura" would never be produced
        let records = vec![Record::new(1, "Myth").with_field("tags", json!(["Gura"]))];
        let report = find_gaps(&records, &ReadingDictionary::new(), &IndexOptions::default());
        let tokens: Vec<&str> = report.rows().iter().map(|r| r.token.as_str()).collect();
        assert_eq!(tokens, vec!["Gura", "Myth"]);
    }

    #[test]
    fn myth_is_counted_per_record() {
        let records = vec![
            Record::new(1, "Myth").with_field("tags", json!(["#Myth", "#EN"])),
            Record::new(2, "Gawr Gura").with_field("tags", json!(["#Myth"])),
            Record::new(3, "Mori Calliope").with_field("category", "Myth"),
            Record::new(4, "2024 ホロライブ"),
        ];
        let dict = ReadingDictionary::from_pairs([("Gawr Gura", "があぐら")]).unwrap();
        let report = find_gaps(&records, &dict, &IndexOptions::default());

        assert_eq!(report.frequency("Myth"), Some(3));
        assert_eq!(report.rows()[0].token, "Myth");
        assert_eq!(report.frequency("Gawr Gura"), None);
        assert_eq!(report.frequency("Mori Calliope"), Some(1));
        assert_eq!(report.frequency("2024 ホロライブ"), None);
        assert_eq!(report.frequency("ホロライブ"), None);
        assert!(report
            .rows()
            .iter()
            .all(|r| !r.token.chars().all(|c| c.is_ascii_digit())));
    }

    #[test]
    fn rows_sorted_by_frequency_then_token() {
        let records = vec![
            Record::new(1, "Gura").with_field("tags", json!(["Ina"])),
            Record::new(2, "Ina").with_field("tags", json!(["Kiara"])),
            Record::new(3, "Kiara").with_field("tags", json!(["#Ina", "#Ina"])),
        ];
        let report = find_gaps(&records, &ReadingDictionary::new(), &IndexOptions::default());
        let rows: Vec<(&str, usize)> = report
            .rows()
            .iter()
            .map(|r| (r.token.as_str(), r.frequency))
            .collect();
        assert_eq!(rows, vec![("Ina", 3), ("Kiara", 2), ("Gura", 1)]);
        assert_eq!(report.candidates, 3);
    }

    #[test]
    fn curated_view_and_template() {
        let records = vec![
            Record::new(1, "兎田").with_field("tags", json!(["Myth"])),
            Record::new(2, "兎田").with_field("tags", json!(["Myth"])),
            Record::new(3, "Advent").with_field("tags", json!(["Myth"])),
        ];
        let dict = ReadingDictionary::from_pairs([("兎田", "うさだ")]).unwrap();
        let before = dict.clone();
        let report = find_gaps(&records, &dict, &IndexOptions::default());

        let curated: Vec<&str> = report.worth_curating(2).map(|r| r.token.as_str()).collect();
        assert_eq!(curated, vec!["Myth"]);
        assert_eq!(report.len(), 2);

        let template = report.template(2);
        assert_eq!(template.len(), 1);
        assert_eq!(template.get("Myth"), Some(""));
        assert_eq!(dict, before);
    }

    #[test]
    fn needs_reading_classification() {
        let dict = ReadingDictionary::from_pairs([("兎田", "うさだ")]).unwrap();
        assert!(needs_reading("Myth", &dict));
        assert!(needs_reading("4期生", &dict));
        assert!(!needs_reading("兎田", &dict));
        assert!(!needs_reading("ホロライブ", &dict));
        assert!(!needs_reading("ぺこーら", &dict));
    }
}
