//! Ranking stage
//!
//! Scores each review body and orders the results by descending compound
//! sentiment. The sort is stable, so reviews with equal compound keep their
//! input order and repeated queries produce identical output.

use std::cmp::Ordering;

use crate::model::{RankedReview, Review};
use crate::sentiment::SentimentScorer;

/// Attach a fresh sentiment score to every review and sort by compound, descending
pub fn rank<S>(reviews: Vec<Review>, scorer: &S) -> Vec<RankedReview>
where
    S: SentimentScorer + ?Sized,
{
    let mut ranked: Vec<RankedReview> = reviews
        .into_iter()
        .map(|review| {
            let sentiment = scorer.score(&review.body);
            RankedReview { review, sentiment }
        })
        .collect();

    // partial_cmp treats -0.0 and 0.0 as equal, keeping them in input order
    ranked.sort_by(|a, b| {
        b.sentiment
            .compound
            .partial_cmp(&a.sentiment.compound)
            .unwrap_or(Ordering::Equal)
    });
    ranked
}
