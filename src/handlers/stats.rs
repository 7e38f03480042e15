use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::models::LedgerStats;
use crate::state::AppState;

// GET /api/stats
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<LedgerStats> {
    Json(state.ledger().aggregate_stats())
}
