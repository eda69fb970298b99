use crate::error::{Result, SearchError};
use crate::tokenizer::{is_valid_word, split_into_words, StopWords};
use std::collections::BTreeSet;
use std::fmt;

/// Parsed query: deduplicated, sorted plus and minus terms with stop words removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub plus_words: BTreeSet<String>,
    pub minus_words: BTreeSet<String>,
}

struct QueryWord<'a> {
    data: &'a str,
    is_minus: bool,
}

fn parse_query_word(word: &str) -> Result<QueryWord<'_>> {
    let (data, is_minus) = match word.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (word, false),
    };
    if data.is_empty() || data.starts_with('-') || !is_valid_word(data) {
        return Err(SearchError::InvalidQuery(word.to_string()));
    }
    Ok(QueryWord { data, is_minus })
}

pub fn parse_query(text: &str, stop_words: &StopWords) -> Result<Query> {
    let mut query = Query::default();
    for word in split_into_words(text) {
        let word = parse_query_word(word)?;
        if stop_words.contains(word.data) {
            continue;
        }
        if word.is_minus {
            query.minus_words.insert(word.data.to_string());
        } else {
            query.plus_words.insert(word.data.to_string());
        }
    }
    Ok(query)
}

impl Query {
    pub fn is_empty(&self) -> bool { self.plus_words.is_empty() && self.minus_words.is_empty() }
}

/// Canonical form: plus words then `-`minus words, each sorted.
impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plus = self.plus_words.iter().map(|w| w.to_string());
        let minus = self.minus_words.iter().map(|w| format!("-{w}"));
        let words: Vec<String> = plus.chain(minus).collect();
        f.write_str(&words.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop() -> StopWords { StopWords::from_text("in the with").unwrap() }

    #[test]
    fn separates_plus_and_minus() {
        let q = parse_query("fluffy -cat dog -collar dog", &stop()).unwrap();
        assert_eq!(q.plus_words.iter().collect::<Vec<_>>(), vec!["dog", "fluffy"]);
        assert_eq!(q.minus_words.iter().collect::<Vec<_>>(), vec!["cat", "collar"]);
    }

    #[test]
    fn drops_stop_words_regardless_of_sign() {
        let q = parse_query("cat -in the -with", &stop()).unwrap();
        assert_eq!(q.plus_words.len(), 1);
        assert!(q.minus_words.is_empty());
    }

    #[test]
    fn rejects_malformed_minus_words() {
        assert_eq!(parse_query("cat -", &stop()).unwrap_err(), SearchError::InvalidQuery("-".into()));
        assert!(matches!(parse_query("--cat", &stop()), Err(SearchError::InvalidQuery(_))));
        assert!(matches!(parse_query("-c\x03at", &stop()), Err(SearchError::InvalidQuery(_))));
    }

    #[test]
    fn hyphen_inside_word_is_literal() {
        let q = parse_query("well-known -x-ray", &stop()).unwrap();
        assert!(q.plus_words.contains("well-known"));
        assert!(q.minus_words.contains("x-ray"));
    }

    #[test]
    fn canonical_form_reparses_identically() {
        let q = parse_query("  dog the -cat fluffy dog -cat ", &stop()).unwrap();
        assert_eq!(q.to_string(), "dog fluffy -cat");
        assert_eq!(parse_query(&q.to_string(), &stop()).unwrap(), q);
    }

    #[test]
    fn empty_query() {
        assert!(parse_query("   ", &stop()).unwrap().is_empty());
    }
}
