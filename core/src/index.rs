use crate::policy::ExecutionPolicy;
use crate::DocumentId;
use rayon::prelude::*;
use std::collections::BTreeMap;

pub type Postings = BTreeMap<DocumentId, f64>;
pub type WordFrequencies = BTreeMap<String, f64>;

/// Term frequencies stored twice: by term for ranking and by document for removal.
/// Both views always hold the same (term, document, frequency) triples.
#[derive(Debug, Default, Clone)]
pub struct InvertedIndex {
    word_to_document_freqs: BTreeMap<String, Postings>,
    document_to_word_freqs: BTreeMap<DocumentId, WordFrequencies>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Index already filtered words. Each occurrence adds `1 / words.len()`.
    /// A document with no words is tracked with an empty frequency map.
    pub fn insert(&mut self, document_id: DocumentId, words: &[&str]) {
        let doc_freqs = self.document_to_word_freqs.entry(document_id).or_default();
        if words.is_empty() {
            return;
        }
        let inv_word_count = 1.0 / words.len() as f64;
        for word in words {
            *doc_freqs.entry(word.to_string()).or_insert(0.0) += inv_word_count;
            *self
                .word_to_document_freqs
                .entry(word.to_string())
                .or_default()
                .entry(document_id)
                .or_insert(0.0) += inv_word_count;
        }
    }

    /// Drop every entry for `document_id`. Terms left without documents are pruned.
    /// Returns false when the document was not indexed.
    pub fn remove(&mut self, document_id: DocumentId, policy: ExecutionPolicy) -> bool {
        let Some(doc_freqs) = self.document_to_word_freqs.remove(&document_id) else {
            return false;
        };
        let words: Vec<&String> = match policy {
            ExecutionPolicy::Sequential => doc_freqs.keys().collect(),
            ExecutionPolicy::Parallel => doc_freqs.par_iter().map(|(word, _)| word).collect(),
        };
        for word in words {
            if let Some(postings) = self.word_to_document_freqs.get_mut(word) {
                postings.remove(&document_id);
                if postings.is_empty() {
                    self.word_to_document_freqs.remove(word);
                }
            }
        }
        true
    }

    pub fn postings(&self, word: &str) -> Option<&Postings> { self.word_to_document_freqs.get(word) }

    pub fn word_frequencies(&self, document_id: DocumentId) -> Option<&WordFrequencies> {
        self.document_to_word_freqs.get(&document_id)
    }

    pub fn contains(&self, word: &str, document_id: DocumentId) -> bool {
        self.postings(word).is_some_and(|p| p.contains_key(&document_id))
    }

    /// Number of documents that contain `word`.
    pub fn document_frequency(&self, word: &str) -> usize { self.postings(word).map_or(0, BTreeMap::len) }

    pub fn term_count(&self) -> usize { self.word_to_document_freqs.len() }

    pub fn document_count(&self) -> usize { self.document_to_word_freqs.len() }
}
