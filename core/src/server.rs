use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::index::{InvertedIndex, WordFrequencies};
use crate::policy::ExecutionPolicy;
use crate::query::{parse_query, Query};
use crate::tokenizer::StopWords;
use crate::{DocumentId, DocumentRecord, DocumentStatus, ScoredDocument};
use rayon::prelude::*;
use std::collections::BTreeMap;

/// In-memory TF-IDF search over short documents.
///
/// Reads (`find_top_documents*`, `match_document*`, lookups) may run concurrently.
/// Mutations need exclusive access, which `&mut self` already enforces; see
/// [`crate::shared::SharedSearchServer`] for a handle usable across threads.
#[derive(Debug, Default)]
pub struct SearchServer {
    stop_words: StopWords,
    config: SearchConfig,
    documents: BTreeMap<DocumentId, DocumentRecord>,
    /// Live ids keyed by insertion sequence, so removal stays logarithmic.
    document_ids: BTreeMap<u64, DocumentId>,
    sequences: BTreeMap<DocumentId, u64>,
    next_sequence: u64,
    index: InvertedIndex,
}

impl SearchServer {
    pub fn new(stop_words: StopWords) -> Self { Self { stop_words, ..Self::default() } }

    pub fn with_stop_words_text(text: &str) -> Result<Self> { Ok(Self::new(StopWords::from_text(text)?)) }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SearchConfig { &self.config }

    pub fn stop_words(&self) -> &StopWords { &self.stop_words }

    /// Index a document. On error nothing is stored.
    pub fn add_document(&mut self, document_id: DocumentId, text: &str, status: DocumentStatus, ratings: &[i32]) -> Result<()> {
        if document_id < 0 {
            return Err(SearchError::InvalidId(document_id));
        }
        if self.documents.contains_key(&document_id) {
            return Err(SearchError::DuplicateId(document_id));
        }
        let words = self.stop_words.filter_text(text).map_err(|e| match e {
            SearchError::InvalidInput(msg) => SearchError::InvalidInput(format!("document {document_id}: {msg}")),
            other => other,
        })?;

        self.index.insert(document_id, &words);
        let rating = compute_average_rating(ratings);
        self.documents.insert(document_id, DocumentRecord { id: document_id, text: text.to_string(), rating, status });
        self.document_ids.insert(self.next_sequence, document_id);
        self.sequences.insert(document_id, self.next_sequence);
        self.next_sequence += 1;
        tracing::debug!(document_id, words = words.len(), rating, ?status, "added document");
        Ok(())
    }

    pub fn remove_document(&mut self, document_id: DocumentId) { self.remove_document_with(ExecutionPolicy::Sequential, document_id) }

    /// Remove a document and its index entries. Unknown ids are ignored.
    pub fn remove_document_with(&mut self, policy: ExecutionPolicy, document_id: DocumentId) {
        if self.documents.remove(&document_id).is_none() {
            return;
        }
        self.index.remove(document_id, policy);
        if let Some(sequence) = self.sequences.remove(&document_id) {
            self.document_ids.remove(&sequence);
        }
        tracing::debug!(document_id, ?policy, "removed document");
    }

    /// Top documents with status `Actual`.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<ScoredDocument>> {
        self.find_top_documents_by_status(raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_by_status(&self, raw_query: &str, status: DocumentStatus) -> Result<Vec<ScoredDocument>> {
        self.find_top_documents_by(raw_query, move |_, document_status, _| document_status == status)
    }

    pub fn find_top_documents_by<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<ScoredDocument>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        self.find_top_documents_with(ExecutionPolicy::Sequential, raw_query, predicate)
    }

    /// Rank by relevance (desc), then rating (desc) when relevances are within
    /// the configured epsilon, and keep the configured number of hits.
    pub fn find_top_documents_with<P>(&self, policy: ExecutionPolicy, raw_query: &str, predicate: P) -> Result<Vec<ScoredDocument>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let query = parse_query(raw_query, &self.stop_words)?;
        let mut matched = self.find_all_documents(policy, &query, &predicate);

        sort_by_relevance_then_rating(&mut matched, self.config.relevance_epsilon);
        matched.truncate(self.config.max_results);
        Ok(matched)
    }

    pub fn match_document(&self, raw_query: &str, document_id: DocumentId) -> Result<(Vec<String>, DocumentStatus)> {
        self.match_document_with(ExecutionPolicy::Sequential, raw_query, document_id)
    }

    /// Plus words of the query found in the document, sorted. Any minus word
    /// found in the document empties the list.
    pub fn match_document_with(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        document_id: DocumentId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let status = self.documents.get(&document_id).map(|doc| doc.status).ok_or(SearchError::UnknownDocument(document_id))?;
        let query = parse_query(raw_query, &self.stop_words)?;
        let in_document = |word: &String| self.index.contains(word, document_id);

        let has_minus = match policy {
            ExecutionPolicy::Sequential => query.minus_words.iter().any(in_document),
            ExecutionPolicy::Parallel => query.minus_words.par_iter().any(in_document),
        };
        if has_minus {
            return Ok((Vec::new(), status));
        }

        let matched: Vec<String> = match policy {
            ExecutionPolicy::Sequential => query.plus_words.iter().filter(|w| in_document(*w)).cloned().collect(),
            ExecutionPolicy::Parallel => query.plus_words.par_iter().filter(|w| in_document(*w)).cloned().collect(),
        };
        Ok((matched, status))
    }

    /// Term frequencies of a document, `None` if the id is unknown.
    pub fn word_frequencies(&self, document_id: DocumentId) -> Option<&WordFrequencies> { self.index.word_frequencies(document_id) }

    pub fn document_count(&self) -> usize { self.documents.len() }

    pub fn document(&self, document_id: DocumentId) -> Option<&DocumentRecord> { self.documents.get(&document_id) }

    /// Live ids in insertion order.
    pub fn document_ids(&self) -> impl Iterator<Item = DocumentId> + '_ { self.document_ids.values().copied() }

    /// Id at `position` in insertion order.
    pub fn document_id(&self, position: usize) -> Option<DocumentId> { self.document_ids.values().nth(position).copied() }

    fn inverse_document_freq(&self, document_frequency: usize) -> f64 {
        (self.document_count() as f64 / document_frequency as f64).ln()
    }

    fn plus_word_contributions<P>(&self, word: &str, predicate: &P) -> Vec<(DocumentId, f64)>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let Some(postings) = self.index.postings(word) else {
            return Vec::new();
        };
        let idf = self.inverse_document_freq(postings.len());
        postings
            .iter()
            .filter_map(|(&id, &term_freq)| {
                let doc = self.documents.get(&id)?;
                predicate(id, doc.status, doc.rating).then_some((id, term_freq * idf))
            })
            .collect()
    }

    fn find_all_documents<P>(&self, policy: ExecutionPolicy, query: &Query, predicate: &P) -> Vec<ScoredDocument>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        // Contributions are gathered per word in query order and summed sequentially,
        // so both policies add the same floats in the same order.
        let contributions: Vec<Vec<(DocumentId, f64)>> = match policy {
            ExecutionPolicy::Sequential => query.plus_words.iter().map(|w| self.plus_word_contributions(w, predicate)).collect(),
            ExecutionPolicy::Parallel => query.plus_words.par_iter().map(|w| self.plus_word_contributions(w, predicate)).collect(),
        };
        let mut document_to_relevance: BTreeMap<DocumentId, f64> = BTreeMap::new();
        for (id, score) in contributions.into_iter().flatten() {
            *document_to_relevance.entry(id).or_insert(0.0) += score;
        }

        let excluded: Vec<DocumentId> = match policy {
            ExecutionPolicy::Sequential => query
                .minus_words
                .iter()
                .filter_map(|w| self.index.postings(w))
                .flat_map(|postings| postings.keys().copied())
                .collect(),
            ExecutionPolicy::Parallel => query
                .minus_words
                .par_iter()
                .filter_map(|w| self.index.postings(w))
                .flat_map_iter(|postings| postings.keys().copied())
                .collect(),
        };
        for id in excluded {
            document_to_relevance.remove(&id);
        }

        document_to_relevance
            .into_iter()
            .filter_map(|(id, relevance)| self.documents.get(&id).map(|doc| ScoredDocument::new(id, relevance, doc.rating)))
            .collect()
    }
}

impl<'a> IntoIterator for &'a SearchServer {
    type Item = &'a DocumentId;
    type IntoIter = std::collections::btree_map::Values<'a, u64, DocumentId>;

    fn into_iter(self) -> Self::IntoIter { self.document_ids.values() }
}

/// Order by relevance descending. Hits within `epsilon` of the head of their
/// run are then ordered by rating descending, keeping relevance order otherwise.
pub fn sort_by_relevance_then_rating(docs: &mut [ScoredDocument], epsilon: f64) {
    docs.sort_by(|lhs, rhs| rhs.relevance.total_cmp(&lhs.relevance));
    let mut start = 0;
    while start < docs.len() {
        let head = docs[start].relevance;
        let end = start + docs[start..].iter().skip(1).take_while(|d| head - d.relevance < epsilon).count() + 1;
        docs[start..end].sort_by(|lhs, rhs| rhs.rating.cmp(&lhs.rating));
        start = end;
    }
}

/// Integer mean, truncated toward zero; 0 for no ratings.
pub fn compute_average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| r as i64).sum();
    (sum / ratings.len() as i64) as i32
}
