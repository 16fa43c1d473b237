//! Query and submission entry points
//!
//! Ties the store, whitelist and injected scorer together. Handlers hold a
//! shared `ReviewService` and call `query` or `submit`; nothing else mutates
//! the store.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::filter::{filter, FilterCriteria};
use crate::intake;
use crate::loader::{self, LoadReport};
use crate::locations::LocationWhitelist;
use crate::model::{RankedReview, RawReviewInput, Review};
use crate::rank::rank;
use crate::sentiment::SentimentScorer;
use crate::store::ReviewStore;
use crate::Result;

/// Review store plus the whitelist and scorer used to query and extend it
///
/// Shared behind an `Arc`; all methods take `&self`.
pub struct ReviewService {
    store: ReviewStore,
    whitelist: LocationWhitelist,
    scorer: Arc<dyn SentimentScorer>,
}

impl ReviewService {
    /// Create a service over an empty store
    pub fn new(whitelist: LocationWhitelist, scorer: Arc<dyn SentimentScorer>) -> Self {
        Self {
            store: ReviewStore::new(),
            whitelist,
            scorer,
        }
    }

    /// Seed the store from a CSV file
    pub fn load_csv(&self, path: &Path) -> Result<LoadReport> {
        loader::load_csv(path, &self.whitelist, &self.store)
    }

    /// Filter, score and rank a snapshot of the store
    pub fn query(&self, criteria: &FilterCriteria) -> Result<Vec<RankedReview>> {
        let snapshot = self.store.snapshot();
        let total = snapshot.len();
        let filtered = filter(snapshot, criteria, &self.whitelist)?;
        let ranked = rank(filtered, self.scorer.as_ref());
        debug!(?criteria, total, matched = ranked.len(), "Review query");
        Ok(ranked)
    }

    /// Validate and append a new review
    pub fn submit(&self, input: RawReviewInput) -> Result<Review> {
        intake::create(input, &self.whitelist, &self.store)
    }

    pub fn store(&self) -> &ReviewStore {
        &self.store
    }

    pub fn whitelist(&self) -> &LocationWhitelist {
        &self.whitelist
    }
}

impl std::fmt::Debug for ReviewService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewService")
            .field("reviews", &self.store.len())
            .field("locations", &self.whitelist.len())
            .finish_non_exhaustive()
    }
}
