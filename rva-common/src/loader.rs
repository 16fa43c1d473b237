//! Initial population of the review store from a CSV file
//!
//! Expected header: `ReviewId,ReviewBody,Location,Timestamp`. Rows that would
//! break a store invariant are skipped and logged rather than failing startup.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::locations::LocationWhitelist;
use crate::model::{parse_timestamp, Review};
use crate::store::ReviewStore;
use crate::Result;

/// Outcome of a seed load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: usize,
}

#[derive(Debug, Deserialize)]
struct SeedRow {
    #[serde(rename = "ReviewId")]
    id: String,
    #[serde(rename = "ReviewBody")]
    body: String,
    #[serde(rename = "Location")]
    location: String,
    #[serde(rename = "Timestamp")]
    timestamp: String,
}

/// Load every valid row of the CSV at `path` into `store`
pub fn load_csv(
    path: &Path,
    whitelist: &LocationWhitelist,
    store: &ReviewStore,
) -> Result<LoadReport> {
    let file = File::open(path)?;
    let report = load_from_reader(file, whitelist, store)?;
    info!(
        "Loaded {} reviews from {} ({} skipped)",
        report.loaded,
        path.display(),
        report.skipped
    );
    Ok(report)
}

/// Load CSV records from any reader
pub fn load_from_reader<R: Read>(
    reader: R,
    whitelist: &LocationWhitelist,
    store: &ReviewStore,
) -> Result<LoadReport> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    // Surface a missing or unreadable header as an error, not as skipped rows
    csv_reader.headers()?;

    let mut report = LoadReport::default();
    for (index, record) in csv_reader.deserialize::<SeedRow>().enumerate() {
        // Header is line 1
        let line = index + 2;
        let outcome = record
            .map_err(|e| e.to_string())
            .and_then(|row| to_review(row, whitelist))
            .and_then(|review| store.append(review).map_err(|e| e.to_string()));

        match outcome {
            Ok(()) => report.loaded += 1,
            Err(reason) => {
                warn!("Skipping seed row at line {}: {}", line, reason);
                report.skipped += 1;
            }
        }
    }

    Ok(report)
}

fn to_review(row: SeedRow, whitelist: &LocationWhitelist) -> std::result::Result<Review, String> {
    if row.id.is_empty() {
        return Err("empty ReviewId".to_string());
    }
    if row.body.is_empty() {
        return Err("empty ReviewBody".to_string());
    }
    if !whitelist.contains(&row.location) {
        return Err(format!("location '{}' not in whitelist", row.location));
    }
    let timestamp = parse_timestamp(&row.timestamp)
        .ok_or_else(|| format!("unparsable Timestamp '{}'", row.timestamp))?;

    Ok(Review {
        id: row.id,
        body: row.body,
        location: row.location,
        timestamp,
    })
}
