use crate::unicode::is_kana_only;

/// A borrowed view of one dictionary row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictEntry<'a> {
    pub key: &'a str,
    pub reading: &'a str,
}

impl<'a> DictEntry<'a> {
    pub fn new(key: &'a str, reading: &'a str) -> Self {
        Self { key, reading }
    }

    /// Key length in chars, the traversal order of reading lookup.
    pub fn key_len(&self) -> usize {
        self.key.chars().count()
    }

    /// True if the key is plain kana and therefore its own reading.
    pub fn is_kana_key(&self) -> bool {
        is_kana_only(self.key)
    }
}
