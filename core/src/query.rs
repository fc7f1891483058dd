use std::collections::BTreeSet;

use crate::error::{Result, SearchError};
use crate::tokenizer::{is_valid_word, split_words, StopWords};

const EXCLUSION_MARKER: char = '-';

/// A parsed query. Terms borrow from the raw query text and are kept sorted
/// and deduplicated, which the parallel paths rely on for cheap iteration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query<'a> {
    pub inclusion: BTreeSet<&'a str>,
    pub exclusion: BTreeSet<&'a str>,
}

#[derive(Debug)]
struct QueryWord<'a> {
    data: &'a str,
    is_exclusion: bool,
    is_stop: bool,
}

impl<'a> Query<'a> {
    /// Parse raw query text. Words prefixed with `-` become exclusion terms;
    /// stop words are dropped whichever side they land on.
    pub fn parse(text: &'a str, stop_words: &StopWords) -> Result<Self> {
        let mut query = Query::default();
        for token in split_words(text) {
            let word = parse_query_word(token, stop_words)?;
            if word.is_stop {
                continue;
            }
            if word.is_exclusion {
                query.exclusion.insert(word.data);
            } else {
                query.inclusion.insert(word.data);
            }
        }
        Ok(query)
    }

    pub fn is_empty(&self) -> bool {
        self.inclusion.is_empty() && self.exclusion.is_empty()
    }
}

fn parse_query_word<'a>(token: &'a str, stop_words: &StopWords) -> Result<QueryWord<'a>> {
    if token.is_empty() {
        return Err(SearchError::EmptyQueryWord);
    }
    let (data, is_exclusion) = match token.strip_prefix(EXCLUSION_MARKER) {
        Some(rest) => (rest, true),
        None => (token, false),
    };
    if data.is_empty() || data.starts_with(EXCLUSION_MARKER) || !is_valid_word(data) {
        return Err(SearchError::InvalidQueryWord(token.to_string()));
    }
    Ok(QueryWord {
        data,
        is_exclusion,
        is_stop: stop_words.contains(data),
    })
}
