use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::stats::StatsAggregator;

/// Shared state handed to every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub stats: Arc<StatsAggregator>,
}

impl AppState {
    pub fn new(stats: StatsAggregator) -> Self {
        Self {
            stats: Arc::new(stats),
        }
    }
}

/// Build the axum router with all dashboard endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/api/stats/:user_id", get(handler::stats_handler))
        .route("/api/leaderboard", get(handler::leaderboard_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::util::ServiceExt;
    use umbra_ledger::{BalanceStore, InMemoryLedger};
    use umbra_types::UserId;

    use crate::stats::{LeaderboardEntry, UserStats};

    fn app_with(ledger: Arc<InMemoryLedger>, records: &std::path::Path) -> Router {
        build_router(AppState::new(StatsAggregator::new(ledger, records)))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn stats_endpoint_returns_payload() {
        let dir = tempfile::tempdir().unwrap();
        let records = dir.path().join("economy_records.json");
        std::fs::write(&records, r#"[{"id": "55", "ingresos": 10, "gastos": 3}]"#).unwrap();
        let ledger = Arc::new(InMemoryLedger::new());
        ledger.credit(&UserId::new("55").unwrap(), 7).unwrap();

        let (status, body) = get_json(app_with(ledger, &records), "/api/stats/55").await;
        assert_eq!(status, StatusCode::OK);
        let stats: UserStats = serde_json::from_slice(&body).unwrap();
        assert_eq!(stats.balance, 7);
        assert_eq!(stats.neto, 7);
    }

    #[tokio::test]
    async fn stats_endpoint_reports_bad_records_as_500() {
        let dir = tempfile::tempdir().unwrap();
        let records = dir.path().join("economy_records.json");
        std::fs::write(&records, "not json").unwrap();
        let ledger = Arc::new(InMemoryLedger::new());

        let (status, body) = get_json(app_with(ledger, &records), "/api/stats/1").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(value["error"].as_str().unwrap().contains("economy records"));
    }

    #[tokio::test]
    async fn stats_route_needs_a_user_segment() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Arc::new(InMemoryLedger::new());

        let (status, _) = get_json(app_with(ledger.clone(), &dir.path().join("r.json")), "/api/stats/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(ledger.is_empty());
    }

    #[tokio::test]
    async fn leaderboard_respects_limit() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Arc::new(InMemoryLedger::new());
        for (id, amount) in [("a", 1), ("b", 2), ("c", 3)] {
            ledger.set_balance(&UserId::new(id).unwrap(), amount).unwrap();
        }

        let app = app_with(ledger, &dir.path().join("missing.json"));
        let (status, body) = get_json(app, "/api/leaderboard?limit=2").await;
        assert_eq!(status, StatusCode::OK);
        let board: Vec<LeaderboardEntry> = serde_json::from_slice(&body).unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].user_id.as_str(), "c");
        assert_eq!(board[1].rank, 2);
    }
}
