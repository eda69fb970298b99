//! Ranking constants and the runtime knobs built from them.

/// Number of hits kept after ranking.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Relevance values closer than this are ranked by rating instead.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Page size used by the console reporter when none is given.
pub const DEFAULT_PAGE_SIZE: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    pub max_results: usize,
    pub relevance_epsilon: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_results: MAX_RESULT_DOCUMENT_COUNT, relevance_epsilon: RELEVANCE_EPSILON }
    }
}
