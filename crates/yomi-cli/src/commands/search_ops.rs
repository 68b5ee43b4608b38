use std::path::Path;

use yomi_core::matcher::{Query, SearchKey};
use yomi_core::records::load_records;

/// Filter the record store the way the card browser does.
pub fn search(records_file: &str, query: &str, explain: bool) {
    let records = die!(
        load_records(Path::new(records_file)),
        "Error reading records: {}"
    );
    let q = Query::new(query);
    if explain {
        eprintln!(
            "query: katakana={:?} hiragana={:?}",
            q.forms().katakana,
            q.forms().hiragana
        );
    }

    let mut hits = 0usize;
    for record in &records {
        let outcome = SearchKey::from_record(record).evaluate(&q);
        if !outcome.is_match() {
            continue;
        }
        hits += 1;
        if explain {
            let mut via = Vec::new();
            if outcome.raw {
                via.push("raw");
            }
            if outcome.loose {
                via.push("loose");
            }
            if outcome.reading {
                via.push("reading");
            }
            println!("{}\t{}\t[{}]", record.id, record.name, via.join(","));
        } else {
            println!("{}\t{}", record.id, record.name);
        }
    }
    eprintln!("{hits} of {} records", records.len());
}
