//! UUID utilities

use uuid::Uuid;

/// Generate a new UUIDv4
pub fn generate() -> Uuid {
    Uuid::new_v4()
}

/// Generate a fresh review identifier in hyphenated form
pub fn review_id() -> String {
    generate().hyphenated().to_string()
}
