//! Review intake
//!
//! Validates a submission, assigns identifier and timestamp, and appends the
//! result to the store. Validation happens before any store access, so a
//! rejected submission leaves the store untouched.

use chrono::{Local, NaiveDateTime};
use tracing::info;

use crate::error::ValidationError;
use crate::locations::LocationWhitelist;
use crate::model::{truncate_to_seconds, RawReviewInput, Review};
use crate::store::ReviewStore;
use crate::{uuid_utils, Error, Result};

// Identifier collisions are astronomically unlikely; bound the retry anyway
const MAX_ID_ATTEMPTS: usize = 3;

/// Validated submission fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSubmission {
    pub body: String,
    pub location: String,
}

/// Check a raw submission, first failure wins
pub fn validate(
    input: RawReviewInput,
    whitelist: &LocationWhitelist,
) -> std::result::Result<ValidSubmission, ValidationError> {
    let body = input
        .body
        .filter(|b| !b.is_empty())
        .ok_or(ValidationError::MissingBody)?;
    let location = input
        .location
        .filter(|l| !l.is_empty())
        .ok_or(ValidationError::MissingLocation)?;
    if !whitelist.contains(&location) {
        return Err(ValidationError::InvalidLocation);
    }
    Ok(ValidSubmission { body, location })
}

/// Create a review stamped with the current local time
pub fn create(
    input: RawReviewInput,
    whitelist: &LocationWhitelist,
    store: &ReviewStore,
) -> Result<Review> {
    create_at(input, whitelist, store, Local::now().naive_local())
}

/// Create a review stamped with `now`
pub fn create_at(
    input: RawReviewInput,
    whitelist: &LocationWhitelist,
    store: &ReviewStore,
    now: NaiveDateTime,
) -> Result<Review> {
    let submission = validate(input, whitelist)?;
    let timestamp = truncate_to_seconds(now);

    let mut attempts = 0;
    loop {
        attempts += 1;
        let review = Review {
            id: uuid_utils::review_id(),
            body: submission.body.clone(),
            location: submission.location.clone(),
            timestamp,
        };
        match store.append(review.clone()) {
            Ok(()) => {
                info!(id = %review.id, location = %review.location, "Accepted review");
                return Ok(review);
            }
            Err(Error::DuplicateId(_)) if attempts < MAX_ID_ATTEMPTS => continue,
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_timestamp;
    use chrono::Timelike;

    fn input(body: Option<&str>, location: Option<&str>) -> RawReviewInput {
        RawReviewInput {
            body: body.map(str::to_string),
            location: location.map(str::to_string),
        }
    }

    fn validation_err(result: Result<Review>) -> ValidationError {
        match result {
            Err(Error::Validation(e)) => e,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_body_rejected() {
        let store = ReviewStore::new();
        let err = validation_err(create(
            input(Some(""), Some("Denver, Colorado")),
            &LocationWhitelist::default(),
            &store,
        ));
        assert_eq!(err, ValidationError::MissingBody);
        assert!(store.is_empty());
    }

    #[test]
    fn test_missing_body_checked_before_location() {
        let store = ReviewStore::new();
        let err = validation_err(create(input(None, None), &LocationWhitelist::default(), &store));
        assert_eq!(err, ValidationError::MissingBody);
    }

    #[test]
    fn test_missing_location_rejected() {
        let store = ReviewStore::new();
        for location in [None, Some("")] {
            let err = validation_err(create(
                input(Some("Nice place"), location),
                &LocationWhitelist::default(),
                &store,
            ));
            assert_eq!(err, ValidationError::MissingLocation);
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_location_outside_whitelist_rejected() {
        let store = ReviewStore::new();
        let err = validation_err(create(
            input(Some("Nice place"), Some("Atlantis")),
            &LocationWhitelist::default(),
            &store,
        ));
        assert_eq!(err, ValidationError::InvalidLocation);
        assert!(store.is_empty());
    }

    #[test]
    fn test_successful_create_appends_and_returns_review() {
        let store = ReviewStore::new();
        let now = parse_timestamp("2024-05-01 14:30:15").unwrap();
        let review = create_at(
            input(Some("Nice place"), Some("Tucson, Arizona")),
            &LocationWhitelist::default(),
            &store,
            now,
        )
        .unwrap();

        assert_eq!(review.body, "Nice place");
        assert_eq!(review.location, "Tucson, Arizona");
        assert_eq!(review.timestamp, now);
        assert!(!review.id.is_empty());
        assert_eq!(store.snapshot(), vec![review]);
    }

    #[test]
    fn test_created_ids_are_unique() {
        let store = ReviewStore::new();
        let whitelist = LocationWhitelist::default();
        let a = create(input(Some("one"), Some("Chula Vista")), &whitelist, &store).unwrap();
        let b = create(input(Some("two"), Some("Chula Vista")), &whitelist, &store).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_timestamp_has_second_precision() {
        let store = ReviewStore::new();
        let review = create(
            input(Some("ok"), Some("Chula Vista")),
            &LocationWhitelist::default(),
            &store,
        )
        .unwrap();
        assert_eq!(review.timestamp.nanosecond(), 0);
    }

    #[test]
    fn test_custom_whitelist_is_honored() {
        let store = ReviewStore::new();
        let whitelist = LocationWhitelist::new(["Atlantis"]);
        let review = create(input(Some("Wet"), Some("Atlantis")), &whitelist, &store).unwrap();
        assert_eq!(review.location, "Atlantis");
    }
}
