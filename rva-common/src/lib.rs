//! # Review Analyzer Common Library
//!
//! Core of the review analyzer service:
//! - Review records and sentiment scores
//! - Location whitelist and the in-memory review store
//! - Filter pipeline, sentiment scoring and ranking
//! - Validated review intake
//! - Seed loading and configuration

pub mod config;
pub mod error;
pub mod filter;
pub mod intake;
pub mod loader;
pub mod locations;
pub mod model;
pub mod rank;
pub mod sentiment;
pub mod service;
pub mod store;
pub mod uuid_utils;

pub use error::{Error, Result, ValidationError};
pub use filter::FilterCriteria;
pub use locations::LocationWhitelist;
pub use model::{RankedReview, RawReviewInput, Review, SentimentScore};
pub use sentiment::{LexiconScorer, SentimentScorer};
pub use service::ReviewService;
pub use store::ReviewStore;
