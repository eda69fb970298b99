//! Batch evaluation of independent queries on the rayon pool.
//!
//! Each query only reads the server, so queries run concurrently. Output keeps
//! the input order.

use crate::error::Result;
use crate::{ScoredDocument, SearchServer};
use rayon::prelude::*;

/// One result list per query, in input order. The first query error aborts the batch.
pub fn process_queries<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Vec<ScoredDocument>>>
where
    S: AsRef<str> + Sync,
{
    queries.par_iter().map(|query| server.find_top_documents(query.as_ref())).collect()
}

/// All result lists concatenated in query order, without re-sorting or dedup.
pub fn process_queries_joined<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<ScoredDocument>>
where
    S: AsRef<str> + Sync,
{
    Ok(process_queries(server, queries)?.into_iter().flatten().collect())
}
