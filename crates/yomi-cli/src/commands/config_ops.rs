use std::fs;

pub fn settings_export() {
    print!("{}", yomi_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        yomi_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: index.text_fields={:?}, gaps.min_frequency={}, report.limit={}",
        s.index.text_fields, s.gaps.min_frequency, s.report.limit
    );
}

/// Install a custom settings file before any command reads `settings()`.
pub fn load_custom(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    die!(
        yomi_core::settings::init_custom(content),
        "Error loading settings: {}"
    );
}
