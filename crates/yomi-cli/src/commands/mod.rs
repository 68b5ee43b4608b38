//! Subcommand implementations for `yomitool`.
//!
//! Every command prints results to stdout and progress to stderr. Any
//! dictionary or record-store failure aborts the command with exit status 1.

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            std::process::exit(1);
        })
    };
}

pub mod config_ops;
pub mod dict_ops;
pub mod gap_ops;
pub mod index_ops;
pub mod search_ops;

use unicode_width::UnicodeWidthStr;

/// Right-pad `s` to `width` terminal columns (kana and kanji count double).
pub(crate) fn pad(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    let mut out = s.to_string();
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(w)));
    out
}
