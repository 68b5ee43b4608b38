use super::*;

fn sample_dict() -> ReadingDictionary {
    ReadingDictionary::from_pairs([
        ("ホロライブ", "ほろらいぶ"),
        ("ホロライブ4期生", "ほろらいぶよんきせい"),
        ("SSRB", "えすえすあーるびー"),
        ("兎田", "うさだ"),
        ("期生", "きせい"),
    ])
    .unwrap()
}

#[test]
fn traversal_is_longest_key_first() {
    let dict = sample_dict();
    let keys: Vec<&str> = dict
        .entries_by_descending_key_length()
        .map(|e| e.key)
        .collect();
    assert_eq!(
        keys,
        vec!["ホロライブ4期生", "ホロライブ", "SSRB", "兎田", "期生"]
    );
}

#[test]
fn traversal_ties_follow_key_order() {
    let dict = ReadingDictionary::from_pairs([("ぶ", "ぶ"), ("あ", "あ"), ("かき", "かき")]).unwrap();
    let keys: Vec<&str> = dict
        .entries_by_descending_key_length()
        .map(|e| e.key)
        .collect();
    assert_eq!(keys, vec!["かき", "あ", "ぶ"]);
}

#[test]
fn traversal_sees_edits() {
    let mut dict = sample_dict();
    dict.insert("ホロライブEN Myth", "ほろらいぶいーえぬみす").unwrap();
    let first = dict.entries_by_descending_key_length().next().unwrap();
    assert_eq!(first.key, "ホロライブEN Myth");
    dict.remove("ホロライブEN Myth");
    let first = dict.entries_by_descending_key_length().next().unwrap();
    assert_eq!(first.key, "ホロライブ4期生");
}

#[test]
fn empty_key_is_rejected() {
    let mut dict = ReadingDictionary::new();
    assert!(matches!(dict.insert("", "から"), Err(SourceError::EmptyKey)));
    assert!(matches!(
        ReadingDictionary::from_json_str(r#"{"": "から"}"#),
        Err(SourceError::EmptyKey)
    ));
}

#[test]
fn json_round_trip_is_key_sorted() {
    let dict = sample_dict();
    let json = dict.to_json_string().unwrap();
    let ssrb = json.find("SSRB").unwrap();
    let holo = json.find("ホロライブ").unwrap();
    let usada = json.find("兎田").unwrap();
    assert!(ssrb < holo && holo < usada);
    assert!(json.ends_with('\n'));
    assert_eq!(ReadingDictionary::from_json_str(&json).unwrap(), dict);
}

#[test]
fn json_rejects_non_string_values() {
    let err = ReadingDictionary::from_json_str(r#"{"兎田": 1}"#).unwrap_err();
    assert!(matches!(err, SourceError::Parse(_)));
    let err = ReadingDictionary::from_json_str("[1, 2]").unwrap_err();
    assert!(matches!(err, SourceError::Parse(_)));
}

#[test]
fn tsv_parsing() {
    let text = "# readings\n兎田\tうさだ\n\nSSRB\tえすえすあーるびー\r\n";
    let dict = ReadingDictionary::from_tsv_str(text).unwrap();
    assert_eq!(dict.len(), 2);
    assert_eq!(dict.get("SSRB"), Some("えすえすあーるびー"));
    assert_eq!(dict.to_tsv_string().unwrap(), "SSRB\tえすえすあーるびー\n兎田\tうさだ\n");
}

#[test]
fn tsv_errors_carry_line_numbers() {
    let err = ReadingDictionary::from_tsv_str("兎田\tうさだ\nno tab here\n").unwrap_err();
    assert!(err.to_string().contains("line 2"));
    let err = ReadingDictionary::from_tsv_str("兎田\tうさだ\n兎田\tとだ\n").unwrap_err();
    assert!(err.to_string().contains("duplicate"));
    let err = ReadingDictionary::from_tsv_str("\tから\n").unwrap_err();
    assert!(err.to_string().contains("empty key"));
}

#[test]
fn format_from_extension() {
    use std::path::Path;
    assert_eq!(
        DictFormat::from_path(Path::new("reading_dict.json")).unwrap(),
        DictFormat::Json
    );
    assert_eq!(
        DictFormat::from_path(Path::new("readings.tsv")).unwrap(),
        DictFormat::Tsv
    );
    assert!(matches!(
        DictFormat::from_path(Path::new("readings.csv")),
        Err(SourceError::UnknownFormat(_))
    ));
}

#[test]
fn save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let dict = sample_dict();
    for name in ["dict.json", "dict.tsv"] {
        let path = dir.path().join(name);
        dict.save(&path).unwrap();
        assert!(!path.with_extension("tmp").exists());
        assert_eq!(ReadingDictionary::load(&path).unwrap(), dict);
    }
}

#[test]
fn load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.json");
    match ReadingDictionary::load(&path) {
        Err(SourceError::NotFound(p)) => assert_eq!(p, path),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn merge_counts() {
    let mut dict = sample_dict();
    let accepted = ReadingDictionary::from_pairs([
        ("Myth", "みす"),
        ("兎田", "うさだ"),
        ("期生", "きせー"),
        ("ENReco", ""),
    ])
    .unwrap();
    let stats = dict.merge(&accepted);
    assert_eq!(
        stats,
        MergeStats {
            added: 1,
            updated: 1,
            unchanged: 1,
            skipped: 1,
        }
    );
    assert_eq!(dict.get("Myth"), Some("みす"));
    assert_eq!(dict.get("期生"), Some("きせー"));
    assert!(!dict.contains_key("ENReco"));
}

#[test]
fn kana_key_classification() {
    let dict = sample_dict();
    let kana: Vec<&str> = dict.iter().filter(|e| e.is_kana_key()).map(|e| e.key).collect();
    assert_eq!(kana, vec!["ホロライブ"]);
}

#[test]
fn readings_must_be_single_kana_tokens() {
    let mut dict = ReadingDictionary::new();
    assert!(matches!(
        dict.insert("EN Myth", "いーえぬ みす"),
        Err(SourceError::InvalidReading { .. })
    ));
    assert!(matches!(
        dict.insert("Gura", "Gura"),
        Err(SourceError::InvalidReading { .. })
    ));
    assert!(matches!(
        dict.insert("兎田", "兎だ"),
        Err(SourceError::InvalidReading { .. })
    ));
    assert!(dict.is_empty());

    dict.insert("Myth", "").unwrap();
    dict.insert("ホロライブ4期生", "ホロライブ4キセイ").unwrap();
    assert_eq!(dict.len(), 2);
}

#[test]
fn sources_with_invalid_readings_are_rejected() {
    let err = ReadingDictionary::from_json_str(r#"{"EN Myth": "いーえぬ みす"}"#).unwrap_err();
    assert!(matches!(err, SourceError::InvalidReading { .. }));
    let err = ReadingDictionary::from_json_str(r#"{"Gura": "Gura"}"#).unwrap_err();
    assert!(matches!(err, SourceError::InvalidReading { .. }));

    let err = ReadingDictionary::from_tsv_str("兎田\tうさだ\nGura\tGura\n").unwrap_err();
    assert!(err.to_string().contains("line 2"));
    let err = ReadingDictionary::from_tsv_str("EN Myth\tいーえぬ みす\n").unwrap_err();
    assert!(err.to_string().contains("line 1"));
}

#[test]
fn json_duplicate_keys_are_rejected() {
    let err = ReadingDictionary::from_json_str(r#"{"兎田": "うさだ", "兎田": "とだ"}"#).unwrap_err();
    match err {
        SourceError::Parse(msg) => assert!(msg.contains("duplicate key \"兎田\"")),
        other => panic!("expected Parse, got {other:?}"),
    }
    let tsv = ReadingDictionary::from_tsv_str("兎田\tうさだ\n兎田\tとだ\n").unwrap_err();
    assert!(matches!(tsv, SourceError::Parse(_)));
}
