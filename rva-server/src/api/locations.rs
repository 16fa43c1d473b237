//! Location whitelist endpoint

use axum::{extract::State, Json};
use rva_common::LocationWhitelist;

use crate::AppState;

/// GET /locations
///
/// Returns the accepted locations in configured order.
pub async fn list_locations(State(state): State<AppState>) -> Json<LocationWhitelist> {
    Json(state.service.whitelist().clone())
}
