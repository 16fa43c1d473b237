//! HTTP API handlers for rva-server

pub mod error;
pub mod health;
pub mod locations;
pub mod reviews;

pub use error::ApiError;
pub use health::health_routes;
pub use locations::list_locations;
pub use reviews::{create_review, list_reviews};
