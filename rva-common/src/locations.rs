//! Location whitelist
//!
//! Closed, ordered set of location labels accepted by filtering and intake.
//! Built once at startup and shared read-only afterwards.

use serde::Serialize;

/// Locations accepted when no configuration overrides them
pub const DEFAULT_LOCATIONS: &[&str] = &[
    "Albuquerque",
    "New Mexico",
    "Carlsbad, California",
    "Chula Vista",
    "California",
    "Colorado Springs, Colorado",
    "Denver, Colorado",
    "El Cajon, California",
    "El Paso, Texas",
    "Escondido, California",
    "Fresno, California",
    "La Mesa, California",
    "Las Vegas, Nevada",
    "Los Angeles, California",
    "Oceanside, California",
    "Phoenix, Arizona",
    "Sacramento, California",
    "Salt Lake City, Utah",
    "Salt Lake City, Utah",
    "San Diego, California",
    "Tucson, Arizona",
];

/// Fixed, ordered set of permitted locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LocationWhitelist {
    locations: Vec<String>,
}

impl LocationWhitelist {
    /// Build a whitelist, collapsing duplicates and keeping first occurrence order
    pub fn new<I, S>(locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for location in locations {
            let location = location.into();
            if !unique.contains(&location) {
                unique.push(location);
            }
        }
        Self { locations: unique }
    }

    /// Exact, case-sensitive membership test
    pub fn contains(&self, location: &str) -> bool {
        self.locations.iter().any(|l| l == location)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.locations.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

impl Default for LocationWhitelist {
    fn default() -> Self {
        Self::new(DEFAULT_LOCATIONS.iter().copied())
    }
}
