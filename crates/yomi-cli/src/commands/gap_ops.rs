use std::path::Path;

use yomi_core::gaps::find_gaps;
use yomi_core::index::{unused_keys, IndexOptions};
use yomi_core::records::{load_records, Record};
use yomi_core::settings::settings;
use yomi_core::ReadingDictionary;

use super::pad;

fn open_inputs(dict_file: &str, records_file: &str) -> (ReadingDictionary, Vec<Record>) {
    let dict = die!(
        ReadingDictionary::load(Path::new(dict_file)),
        "Error opening dictionary: {}"
    );
    let records = die!(
        load_records(Path::new(records_file)),
        "Error reading records: {}"
    );
    (dict, records)
}

/// Print uncovered tokens, most frequent first.
///
/// Without `all` only tokens at or above `gaps.min_frequency` are listed.
/// `template` writes those rows as an empty-reading dictionary for later
/// `dict merge`. The live dictionary is never modified here.
pub fn gaps(
    dict_file: &str,
    records_file: &str,
    all: bool,
    limit: Option<usize>,
    template: Option<&str>,
) {
    let (dict, records) = open_inputs(dict_file, records_file);
    let s = settings();
    let report = find_gaps(&records, &dict, &IndexOptions::from_settings(s));
    let min_frequency = if all { 1 } else { s.gaps.min_frequency };
    let limit = limit.unwrap_or(s.report.limit);

    let rows: Vec<_> = report.worth_curating(min_frequency).collect();
    eprintln!(
        "{} candidate tokens, {} uncovered, {} with frequency >= {min_frequency}",
        report.candidates,
        report.len(),
        rows.len()
    );

    let width = rows
        .iter()
        .take(limit)
        .map(|r| unicode_width::UnicodeWidthStr::width(r.token.as_str()))
        .max()
        .unwrap_or(0);
    for row in rows.iter().take(limit) {
        println!("{}  {:>5}", pad(&row.token, width), row.frequency);
    }
    if rows.len() > limit {
        println!("... {} more", rows.len() - limit);
    }

    if let Some(path) = template {
        let skeleton = report.template(min_frequency);
        die!(
            skeleton.save(Path::new(path)),
            "Error writing template: {}"
        );
        eprintln!("Wrote {path} ({} entries to fill in)", skeleton.len());
    }
}

/// Print dictionary keys that no record contains.
pub fn unused(dict_file: &str, records_file: &str) {
    let (dict, records) = open_inputs(dict_file, records_file);
    let options = IndexOptions::from_settings(settings());
    let keys = unused_keys(&records, &dict, &options);
    for key in &keys {
        println!("{key}\t{}", dict.get(key).unwrap_or_default());
    }
    eprintln!("{} of {} entries unused", keys.len(), dict.len());
}
