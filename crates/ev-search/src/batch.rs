//! Parallel batch execution.

use rayon::prelude::*;

use crate::engine::SearchEngine;
use crate::request::{PathResult, SearchRequest};
use crate::SearchResult;

impl SearchEngine {
    /// Run many queries in parallel over the engine's snapshot.
    ///
    /// Results keep request order.  Each query fails or succeeds
    /// independently; one malformed request does not poison the batch.
    pub fn run_batch(&self, requests: &[SearchRequest]) -> Vec<SearchResult<PathResult>> {
        requests.par_iter().map(|req| self.run(req)).collect()
    }
}
