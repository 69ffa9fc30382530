//! HTTP dashboard API for Umbra.
//!
//! Serves read-mostly statistics derived from the balance ledger and the
//! auxiliary economy-record file. The ledger is reached only through
//! [`umbra_ledger::BalanceStore`].

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod stats;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use router::{build_router, AppState};
pub use server::UmbraServer;
pub use stats::{EconomyRecord, LeaderboardEntry, StatsAggregator, UserStats};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;
    use umbra_ledger::InMemoryLedger;

    fn app() -> axum::Router {
        let ledger = Arc::new(InMemoryLedger::new());
        let stats = StatsAggregator::new(ledger, "does-not-exist.json");
        build_router(AppState::new(stats))
    }

    #[tokio::test]
    async fn health_endpoint() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/v1/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), 404);
    }
}
