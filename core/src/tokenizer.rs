use crate::error::{Result, SearchError};
use std::collections::HashSet;
use std::str::FromStr;

/// True when `word` holds no control characters (code points below 0x20).
pub fn is_valid_word(word: &str) -> bool {
    !word.chars().any(|c| u32::from(c) < 0x20)
}

/// Shared validation for document text, query text and stop words.
pub fn validate_word(word: &str) -> Result<()> {
    if is_valid_word(word) {
        Ok(())
    } else {
        Err(SearchError::InvalidCharacter { word: word.to_string() })
    }
}

/// Split `text` on single spaces, dropping empty tokens.
///
/// A control character anywhere fails the split; the error names the token holding it.
pub fn split_into_words(text: &str) -> Result<Vec<&str>> {
    text.split(' ')
        .filter(|w| !w.is_empty())
        .map(|w| validate_word(w).map(|()| w))
        .collect()
}

/// Words ignored both when indexing documents and when parsing queries.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Build from any collection of words. Empty entries are skipped.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = HashSet::new();
        for word in words {
            let word = word.as_ref();
            validate_word(word)?;
            if !word.is_empty() {
                set.insert(word.to_string());
            }
        }
        Ok(Self { words: set })
    }

    /// Build from a space-separated list such as `"and in on"`.
    pub fn from_text(text: &str) -> Result<Self> {
        // Validate per word so the error names the offending stop word.
        Self::new(text.split(' '))
    }

    pub fn contains(&self, word: &str) -> bool { self.words.contains(word) }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }

    pub fn filter<'a, I>(&self, tokens: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        tokens.into_iter().filter(|t| !self.contains(t)).collect()
    }

    /// Split `text` and drop stop words in one pass.
    pub fn split_no_stop<'a>(&self, text: &'a str) -> Result<Vec<&'a str>> {
        Ok(self.filter(split_into_words(text)?))
    }
}

impl FromStr for StopWords {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> { Self::from_text(s) }
}
