use std::path::Path;

use yomi_core::index::{reindex, IndexOptions};
use yomi_core::records::{load_records, save_records};
use yomi_core::settings::settings;
use yomi_core::ReadingDictionary;

/// Full reading-index pass over the record store.
///
/// Writes back to `records_file` unless `output` is given. With `dry_run`
/// only the counts are reported.
pub fn index(dict_file: &str, records_file: &str, output: Option<&str>, dry_run: bool) {
    let dict = die!(
        ReadingDictionary::load(Path::new(dict_file)),
        "Error opening dictionary: {}"
    );
    let mut records = die!(
        load_records(Path::new(records_file)),
        "Error reading records: {}"
    );
    eprintln!(
        "Indexing {} records with {} dictionary entries...",
        records.len(),
        dict.len()
    );

    let options = IndexOptions::from_settings(settings());
    let stats = reindex(&mut records, &dict, &options);

    println!("Records:   {:>6}", stats.records);
    println!("Changed:   {:>6}", stats.changed);
    println!("No reading:{:>6}", stats.empty);

    if dry_run {
        eprintln!("(dry run, nothing written)");
        return;
    }
    let out = output.unwrap_or(records_file);
    die!(
        save_records(Path::new(out), &records),
        "Error writing records: {}"
    );
    eprintln!("Wrote {out}");
}
