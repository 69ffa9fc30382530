use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::error::ServerResult;
use crate::router::AppState;
use crate::stats::{LeaderboardEntry, UserStats};

/// Leaderboard size when the query does not name one.
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;
/// Upper bound on the leaderboard size a client may request.
pub const MAX_LEADERBOARD_LIMIT: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<usize>,
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// Per-user economy stats.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ServerResult<Json<UserStats>> {
    let stats = state.stats.user_stats(&user_id)?;
    Ok(Json(stats))
}

/// Highest balances.
pub async fn leaderboard_handler(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> ServerResult<Json<Vec<LeaderboardEntry>>> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_LEADERBOARD_LIMIT)
        .min(MAX_LEADERBOARD_LIMIT);
    Ok(Json(state.stats.leaderboard(limit)?))
}
