//! Filter pipeline
//!
//! Narrows a review sequence by location, then start date, then end date.
//! Every criterion is optional; an absent (or empty) criterion leaves the
//! sequence untouched. Date criteria are parsed before any filtering so a
//! malformed value fails the whole request instead of producing a partial
//! result.

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::error::ValidationError;
use crate::locations::LocationWhitelist;
use crate::model::{parse_date_midnight, Review};

/// Optional query criteria as received from the caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FilterCriteria {
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl FilterCriteria {
    /// Build criteria from raw query pairs
    ///
    /// The first occurrence of a repeated key wins; unrecognized keys are
    /// ignored.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut criteria = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "location" => &mut criteria.location,
                "start_date" => &mut criteria.start_date,
                "end_date" => &mut criteria.end_date,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        criteria
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_start_date(mut self, date: impl Into<String>) -> Self {
        self.start_date = Some(date.into());
        self
    }

    pub fn with_end_date(mut self, date: impl Into<String>) -> Self {
        self.end_date = Some(date.into());
        self
    }
}

/// Criteria after validation, ready to apply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolvedCriteria<'a> {
    /// `None` when absent or not whitelisted
    pub location: Option<&'a str>,
    /// Inclusive lower bound (date at midnight)
    pub start: Option<NaiveDateTime>,
    /// Inclusive upper bound (date at midnight)
    pub end: Option<NaiveDateTime>,
}

impl<'a> ResolvedCriteria<'a> {
    /// Validate raw criteria against the whitelist and date format
    ///
    /// A location outside the whitelist disables the location filter; it is
    /// not an error.
    pub fn resolve(
        criteria: &'a FilterCriteria,
        whitelist: &LocationWhitelist,
    ) -> Result<Self, ValidationError> {
        let location = non_empty(&criteria.location).filter(|l| whitelist.contains(l));
        let start = parse_bound("start_date", non_empty(&criteria.start_date))?;
        let end = parse_bound("end_date", non_empty(&criteria.end_date))?;
        Ok(Self { location, start, end })
    }

    /// Single-pass conjunction of all active predicates
    pub fn matches(&self, review: &Review) -> bool {
        self.location.map_or(true, |l| review.location == l)
            && self.start.map_or(true, |s| review.timestamp >= s)
            && self.end.map_or(true, |e| review.timestamp <= e)
    }
}

/// Apply `criteria` to `reviews`, preserving relative order
pub fn filter(
    mut reviews: Vec<Review>,
    criteria: &FilterCriteria,
    whitelist: &LocationWhitelist,
) -> Result<Vec<Review>, ValidationError> {
    let resolved = ResolvedCriteria::resolve(criteria, whitelist)?;

    if let Some(location) = resolved.location {
        reviews.retain(|r| r.location == location);
    }
    if let Some(start) = resolved.start {
        reviews.retain(|r| r.timestamp >= start);
    }
    if let Some(end) = resolved.end {
        reviews.retain(|r| r.timestamp <= end);
    }

    Ok(reviews)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn parse_bound(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<NaiveDateTime>, ValidationError> {
    value
        .map(|v| {
            parse_date_midnight(v).ok_or_else(|| ValidationError::InvalidDate {
                field,
                value: v.to_string(),
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_timestamp;

    fn review(id: &str, location: &str, ts: &str) -> Review {
        Review {
            id: id.to_string(),
            body: "text".to_string(),
            location: location.to_string(),
            timestamp: parse_timestamp(ts).unwrap(),
        }
    }

    fn fixture() -> Vec<Review> {
        vec![
            review("1", "Denver, Colorado", "2024-01-05 10:00:00"),
            review("2", "Tucson, Arizona", "2024-01-06 00:00:00"),
            review("3", "Denver, Colorado", "2024-01-07 08:30:00"),
            review("4", "Phoenix, Arizona", "2024-01-08 00:00:00"),
        ]
    }

    fn ids(reviews: &[Review]) -> Vec<&str> {
        reviews.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_no_criteria_returns_everything() {
        let out = filter(fixture(), &FilterCriteria::default(), &LocationWhitelist::default()).unwrap();
        assert_eq!(ids(&out), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_query_pairs_first_occurrence_wins() {
        let criteria = FilterCriteria::from_query_pairs([
            ("location", "Tucson, Arizona"),
            ("page", "2"),
            ("location", "Nowhere"),
            ("end_date", "2024-01-07"),
            ("end_date", "garbage"),
        ]);
        assert_eq!(
            criteria,
            FilterCriteria::default()
                .with_location("Tucson, Arizona")
                .with_end_date("2024-01-07")
        );
    }

    #[test]
    fn test_query_pairs_empty() {
        let pairs: Vec<(String, String)> = Vec::new();
        assert_eq!(FilterCriteria::from_query_pairs(pairs), FilterCriteria::default());
    }

    #[test]
    fn test_location_filter() {
        let criteria = FilterCriteria::default().with_location("Denver, Colorado");
        let out = filter(fixture(), &criteria, &LocationWhitelist::default()).unwrap();
        assert_eq!(ids(&out), vec!["1", "3"]);
    }

    #[test]
    fn test_unknown_location_disables_filter() {
        let criteria = FilterCriteria::default().with_location("Nowhere");
        let out = filter(fixture(), &criteria, &LocationWhitelist::default()).unwrap();
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn test_location_match_is_case_sensitive() {
        // Lowercase is not whitelisted, so the filter is a no-op
        let criteria = FilterCriteria::default().with_location("denver, colorado");
        let out = filter(fixture(), &criteria, &LocationWhitelist::default()).unwrap();
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn test_empty_values_are_absent() {
        let criteria = FilterCriteria::default()
            .with_location("")
            .with_start_date("")
            .with_end_date("");
        let out = filter(fixture(), &criteria, &LocationWhitelist::default()).unwrap();
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn test_start_date_is_inclusive_at_midnight() {
        let criteria = FilterCriteria::default().with_start_date("2024-01-06");
        let out = filter(fixture(), &criteria, &LocationWhitelist::default()).unwrap();
        assert_eq!(ids(&out), vec!["2", "3", "4"]);
    }

    #[test]
    fn test_end_date_is_inclusive_at_midnight_only() {
        let criteria = FilterCriteria::default().with_end_date("2024-01-06");
        let out = filter(fixture(), &criteria, &LocationWhitelist::default()).unwrap();
        // "3" on 2024-01-07 is excluded; a review later on the 6th would be too
        assert_eq!(ids(&out), vec!["1", "2"]);
    }

    #[test]
    fn test_end_date_excludes_later_same_day() {
        let reviews = vec![review("x", "Chula Vista", "2024-01-06 00:00:01")];
        let criteria = FilterCriteria::default().with_end_date("2024-01-06");
        let out = filter(reviews, &criteria, &LocationWhitelist::default()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_start_after_end_is_empty_not_error() {
        let criteria = FilterCriteria::default()
            .with_start_date("2024-01-08")
            .with_end_date("2024-01-05");
        let out = filter(fixture(), &criteria, &LocationWhitelist::default()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_invalid_start_date_fails() {
        let criteria = FilterCriteria::default().with_start_date("06/01/2024");
        let err = filter(fixture(), &criteria, &LocationWhitelist::default()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidDate {
                field: "start_date",
                value: "06/01/2024".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_end_date_fails_even_with_valid_start() {
        let criteria = FilterCriteria::default()
            .with_start_date("2024-01-01")
            .with_end_date("2024-01-99");
        let err = filter(fixture(), &criteria, &LocationWhitelist::default()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDate { field: "end_date", .. }));
    }

    #[test]
    fn test_empty_input_is_empty_output() {
        let criteria = FilterCriteria::default().with_location("Denver, Colorado");
        let out = filter(Vec::new(), &criteria, &LocationWhitelist::default()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_staged_filter_equals_conjunction() {
        let whitelist = LocationWhitelist::default();
        let criteria = FilterCriteria::default()
            .with_location("Denver, Colorado")
            .with_start_date("2024-01-06")
            .with_end_date("2024-01-08");
        let staged = filter(fixture(), &criteria, &whitelist).unwrap();
        let resolved = ResolvedCriteria::resolve(&criteria, &whitelist).unwrap();
        let conj: Vec<Review> = fixture().into_iter().filter(|r| resolved.matches(r)).collect();
        assert_eq!(staged, conj);
        assert_eq!(ids(&staged), vec!["3"]);
    }
}
