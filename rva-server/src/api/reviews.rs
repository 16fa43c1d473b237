//! Review query and submission endpoints

use axum::{
    extract::{
        rejection::{FormRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Form, Json,
};
use rva_common::{FilterCriteria, RankedReview, RawReviewInput, Review};

use super::ApiError;
use crate::AppState;

/// GET /reviews?location=..&start_date=YYYY-MM-DD&end_date=YYYY-MM-DD
///
/// Returns matching reviews with their sentiment, strongest positive first.
/// An unknown `location` disables the location filter instead of failing.
/// When a parameter is repeated, its first value is used.
pub async fn list_reviews(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<RankedReview>>, ApiError> {
    let Query(pairs) = query?;
    let criteria = FilterCriteria::from_query_pairs(pairs);
    let ranked = state.service.query(&criteria)?;
    Ok(Json(ranked))
}

/// POST /reviews (form body: `ReviewBody`, `Location`)
///
/// Returns the stored review with its assigned id and timestamp.
pub async fn create_review(
    State(state): State<AppState>,
    form: Result<Form<RawReviewInput>, FormRejection>,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    let Form(input) = form?;
    let review = state.service.submit(input)?;
    Ok((StatusCode::CREATED, Json(review)))
}
