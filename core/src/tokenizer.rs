use std::collections::BTreeSet;

use crate::error::{Result, SearchError};

/// Split text into words on runs of spaces. Only `' '` separates words; any
/// other whitespace stays inside the word and is rejected by [`is_valid_word`].
pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ').filter(|word| !word.is_empty())
}

/// A word is valid unless it contains a control character (code point < 0x20).
pub fn is_valid_word(word: &str) -> bool {
    !word.chars().any(|c| (c as u32) < 0x20)
}

/// Immutable stop-word set fixed when the server is built.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: BTreeSet<String>,
}

impl StopWords {
    /// Build from space-delimited text, e.g. `"and with"`.
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_words(split_words(text))
    }

    /// Build from any sequence of words. Empty entries are dropped and
    /// duplicates coalesced; a word with control characters is rejected.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            if !is_valid_word(word) {
                return Err(SearchError::InvalidStopWord(word.to_string()));
            }
            set.insert(word.to_string());
        }
        Ok(Self { words: set })
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Split a document into indexable words: validates every word first and
    /// drops stop words. Fails on the first invalid word without side effects.
    pub fn split_no_stop<'a>(&self, text: &'a str) -> Result<Vec<&'a str>> {
        let mut words = Vec::new();
        for word in split_words(text) {
            if !is_valid_word(word) {
                return Err(SearchError::InvalidWord(word.to_string()));
            }
            if !self.contains(word) {
                words.push(word);
            }
        }
        Ok(words)
    }
}
