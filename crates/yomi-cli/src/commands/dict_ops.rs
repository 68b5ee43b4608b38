use std::fs;
use std::path::Path;

use yomi_core::index::readings_in;
use yomi_core::ReadingDictionary;

fn open(dict_file: &str) -> ReadingDictionary {
    die!(
        ReadingDictionary::load(Path::new(dict_file)),
        "Error opening dictionary: {}"
    )
}

fn save(dict: &ReadingDictionary, dict_file: &str) {
    die!(
        dict.save(Path::new(dict_file)),
        "Error writing dictionary: {}"
    );
}

pub fn info(dict_file: &str) {
    let dict = open(dict_file);
    let file_size = fs::metadata(dict_file).map(|m| m.len()).unwrap_or(0);
    let kana_keys = dict.iter().filter(|e| e.is_kana_key()).count();
    let empty = dict.iter().filter(|e| e.reading.is_empty()).count();
    let longest = dict.entries_by_descending_key_length().next();

    println!("Dictionary:   {dict_file}");
    println!("File size:    {:.1} KB", file_size as f64 / 1024.0);
    println!("Entries:      {}", dict.len());
    println!("Kana keys:    {kana_keys}");
    println!("No reading:   {empty}");
    if let Some(e) = longest {
        println!("Longest key:  {} ({} chars)", e.key, e.key_len());
    }
}

/// Show the readings a text would be indexed with.
pub fn lookup(dict_file: &str, text: &str) {
    let dict = open(dict_file);
    let index = readings_in(text, &dict);
    if index.is_empty() {
        println!("{text}: no readings");
        return;
    }
    println!("{text}: {} readings", index.len());
    for entry in dict.entries_by_descending_key_length() {
        if !entry.reading.is_empty() && text.contains(entry.key) {
            println!("  {} \t{}", entry.key, entry.reading);
        }
    }
}

pub fn add(dict_file: &str, key: &str, reading: &str) {
    let mut dict = open(dict_file);
    let previous = die!(dict.insert(key, reading), "Error: {}");
    save(&dict, dict_file);
    match previous {
        Some(old) if old == reading => println!("Unchanged: {key} → {reading}"),
        Some(old) => println!("Updated: {key} → {reading} (was {old})"),
        None => println!("Added: {key} → {reading}"),
    }
}

pub fn remove(dict_file: &str, key: &str) {
    let mut dict = open(dict_file);
    match dict.remove(key) {
        Some(reading) => {
            save(&dict, dict_file);
            println!("Removed: {key} → {reading}");
        }
        None => println!("Not found: {key}"),
    }
}

/// Fold a filled-in template (or any dictionary file) into `dict_file`.
pub fn merge(dict_file: &str, accepted_file: &str) {
    let mut dict = open(dict_file);
    let accepted = open(accepted_file);
    let stats = dict.merge(&accepted);
    if stats.added + stats.updated > 0 {
        save(&dict, dict_file);
    }
    println!("Added:     {:>6}", stats.added);
    println!("Updated:   {:>6}", stats.updated);
    println!("Unchanged: {:>6}", stats.unchanged);
    println!("Skipped:   {:>6} (no reading)", stats.skipped);
}

/// Re-save in key order for a clean diff after hand edits.
pub fn sort(dict_file: &str) {
    let dict = open(dict_file);
    save(&dict, dict_file);
    eprintln!("Wrote {dict_file} ({} entries)", dict.len());
}
