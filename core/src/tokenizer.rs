use crate::error::{Result, SearchError};
use std::collections::BTreeSet;

/// Split text on runs of the space character. Other whitespace stays inside tokens.
pub fn split_into_words(text: &str) -> Vec<&str> {
    text.split(' ').filter(|word| !word.is_empty()).collect()
}

/// A word is valid when it contains no control characters (code points below 0x20).
pub fn is_valid_word(word: &str) -> bool {
    !word.chars().any(|c| (c as u32) < 0x20)
}

/// Terms excluded from both indexing and querying. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: BTreeSet<String>,
}

impl StopWords {
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for word in words {
            let word = word.as_ref();
            if !is_valid_word(word) {
                return Err(SearchError::InvalidInput(format!("stop word {word:?} contains control characters")));
            }
            if !word.is_empty() {
                set.insert(word.to_string());
            }
        }
        Ok(Self { words: set })
    }

    /// Build from a space-separated list such as `"and in the"`.
    pub fn from_text(text: &str) -> Result<Self> { Self::new(split_into_words(text)) }

    pub fn contains(&self, word: &str) -> bool { self.words.contains(word) }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ { self.words.iter().map(String::as_str) }

    /// Validate every token of `text`, then return the ones that are not stop words.
    pub fn filter_text<'a>(&self, text: &'a str) -> Result<Vec<&'a str>> {
        let words = split_into_words(text);
        if let Some(bad) = words.iter().find(|w| !is_valid_word(w)) {
            return Err(SearchError::InvalidInput(format!("word {bad:?} is invalid")));
        }
        Ok(words.into_iter().filter(|w| !self.contains(w)).collect())
    }
}
