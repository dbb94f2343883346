use crate::error::{Result, SearchError};
use crate::tokenizer::{split_into_words, StopWords};
use std::collections::BTreeSet;

/// A parsed query: terms that contribute relevance and terms that exclude documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub plus_terms: BTreeSet<String>,
    pub minus_terms: BTreeSet<String>,
}

impl Query {
    pub fn parse(text: &str, stop_words: &StopWords) -> Result<Self> {
        let words = split_into_words(text)?;
        for word in &words {
            check_minus_syntax(word)?;
        }

        let mut query = Query::default();
        for word in stop_words.filter(words) {
            match word.strip_prefix('-') {
                Some(term) => query.minus_terms.insert(term.to_string()),
                None => query.plus_terms.insert(word.to_string()),
            };
        }
        Ok(query)
    }

    pub fn is_empty(&self) -> bool { self.plus_terms.is_empty() && self.minus_terms.is_empty() }
}

fn check_minus_syntax(word: &str) -> Result<()> {
    let reason = if word == "-" {
        "no term after minus"
    } else if word.starts_with("--") {
        "double minus"
    } else {
        return Ok(());
    };
    Err(SearchError::InvalidQuery { word: word.to_string(), reason })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(set: &BTreeSet<String>) -> Vec<&str> {
        set.iter().map(String::as_str).collect()
    }

    #[test]
    fn splits_plus_and_minus_terms() {
        let q = Query::parse("fluffy -collar cat", &StopWords::default()).unwrap();
        assert_eq!(terms(&q.plus_terms), vec!["cat", "fluffy"]);
        assert_eq!(terms(&q.minus_terms), vec!["collar"]);
    }

    #[test]
    fn duplicates_collapse() {
        let q = Query::parse("cat cat -dog -dog", &StopWords::default()).unwrap();
        assert_eq!(q.plus_terms.len(), 1);
        assert_eq!(q.minus_terms.len(), 1);
    }

    #[test]
    fn stop_words_are_dropped() {
        let stop = StopWords::from_text("in the").unwrap();
        let q = Query::parse("cat in the city", &stop).unwrap();
        assert_eq!(terms(&q.plus_terms), vec!["cat", "city"]);
    }

    #[test]
    fn bare_minus_is_invalid() {
        let err = Query::parse("cat -", &StopWords::default()).unwrap_err();
        assert!(matches!(err, SearchError::InvalidQuery { ref word, .. } if word == "-"));
    }

    #[test]
    fn double_minus_is_invalid() {
        let err = Query::parse("--cat", &StopWords::default()).unwrap_err();
        assert!(matches!(err, SearchError::InvalidQuery { .. }));
    }

    #[test]
    fn hyphen_inside_word_is_plain_term() {
        let q = Query::parse("well-known cat-", &StopWords::default()).unwrap();
        assert_eq!(terms(&q.plus_terms), vec!["cat-", "well-known"]);
        assert!(q.minus_terms.is_empty());
    }

    #[test]
    fn control_character_in_query_is_rejected() {
        let err = Query::parse("cat\u{12}", &StopWords::default()).unwrap_err();
        assert!(matches!(err, SearchError::InvalidCharacter { .. }));
    }

    #[test]
    fn empty_query_parses_to_nothing() {
        assert!(Query::parse("", &StopWords::default()).unwrap().is_empty());
    }
}
