use crate::{DocumentId, SearchServer};
use std::collections::{BTreeMap, BTreeSet};

/// Ids of documents whose set of indexed words equals that of an earlier
/// document in insertion order. Frequencies are ignored.
pub fn find_duplicates(server: &SearchServer) -> BTreeSet<DocumentId> {
    let mut first_seen: BTreeMap<BTreeSet<&str>, DocumentId> = BTreeMap::new();
    let mut duplicates = BTreeSet::new();
    for document_id in server.document_ids() {
        let words: BTreeSet<&str> = server
            .word_frequencies(document_id)
            .map(|freqs| freqs.keys().map(String::as_str).collect())
            .unwrap_or_default();
        if first_seen.contains_key(&words) {
            duplicates.insert(document_id);
        } else {
            first_seen.insert(words, document_id);
        }
    }
    duplicates
}

/// Remove duplicates in increasing id order and return the removed ids.
pub fn remove_duplicates(server: &mut SearchServer) -> Vec<DocumentId> {
    let duplicates = find_duplicates(server);
    for &document_id in &duplicates {
        tracing::info!(document_id, "found duplicate document");
        server.remove_document(document_id);
    }
    duplicates.into_iter().collect()
}
