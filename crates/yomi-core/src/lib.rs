//! Kana-aware search over a card catalog.
//!
//! Card names mix kanji, both kana scripts, Latin text and decorative
//! symbols. [`normalize`] folds them into comparable forms, [`dict`] holds
//! the hand-curated substring → reading table, [`index`] precomputes a
//! reading index per record, [`matcher`] answers queries and [`gaps`]
//! reports which substrings still lack a reading.

pub mod dict;
pub mod error;
pub mod gaps;
pub mod index;
pub mod matcher;
pub mod normalize;
pub mod records;
pub mod settings;
pub mod unicode;

pub use dict::ReadingDictionary;
pub use error::SourceError;
pub use records::Record;
