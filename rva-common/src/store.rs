//! In-memory review store
//!
//! Insertion-ordered collection with a single write path (`append`) and
//! copy-on-read snapshots. Readers never hold the lock while filtering or
//! ranking, so queries cannot race with concurrent submissions.

use std::collections::HashSet;
use std::sync::{PoisonError, RwLock};

use crate::model::Review;
use crate::{Error, Result};

#[derive(Debug, Default)]
struct StoreInner {
    reviews: Vec<Review>,
    ids: HashSet<String>,
}

/// Shared, append-only collection of reviews
#[derive(Debug, Default)]
pub struct ReviewStore {
    inner: RwLock<StoreInner>,
}

impl ReviewStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a review, rejecting an identifier that is already stored
    ///
    /// The uniqueness check and the push happen under one write lock.
    pub fn append(&self, review: Review) -> Result<()> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if inner.ids.contains(&review.id) {
            return Err(Error::DuplicateId(review.id));
        }
        inner.ids.insert(review.id.clone());
        inner.reviews.push(review);
        Ok(())
    }

    /// Copy of the current contents in insertion order
    pub fn snapshot(&self) -> Vec<Review> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .reviews
            .clone()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .ids
            .contains(id)
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_timestamp;
    use std::sync::Arc;

    fn review(id: &str) -> Review {
        Review {
            id: id.to_string(),
            body: format!("body {}", id),
            location: "Chula Vista".to_string(),
            timestamp: parse_timestamp("2024-03-01 12:00:00").unwrap(),
        }
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = ReviewStore::new();
        assert!(store.is_empty());
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_snapshot_preserves_insertion_order() {
        let store = ReviewStore::new();
        for id in ["c", "a", "b"] {
            store.append(review(id)).unwrap();
        }
        let ids: Vec<String> = store.snapshot().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_duplicate_id_rejected_without_mutation() {
        let store = ReviewStore::new();
        store.append(review("a")).unwrap();
        let err = store.append(review("a")).unwrap_err();
        assert!(matches!(err, Error::DuplicateId(id) if id == "a"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_snapshot_is_detached_from_later_appends() {
        let store = ReviewStore::new();
        store.append(review("a")).unwrap();
        let before = store.snapshot();
        store.append(review("b")).unwrap();
        assert_eq!(before.len(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_concurrent_appends_are_not_lost() {
        let store = Arc::new(ReviewStore::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        store.append(review(&format!("{}-{}", t, i))).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.len(), 400);
        assert!(store.contains_id("7-49"));
    }
}
