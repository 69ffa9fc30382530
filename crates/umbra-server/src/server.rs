use std::sync::Arc;

use tokio::net::TcpListener;
use umbra_ledger::{BalanceStore, JsonFileLedger};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::{build_router, AppState};
use crate::stats::StatsAggregator;

/// Umbra dashboard server.
pub struct UmbraServer {
    config: ServerConfig,
    state: AppState,
}

impl UmbraServer {
    /// Open the durable ledger named by `config` and wire the stats
    /// aggregator to it.
    pub fn open(config: ServerConfig) -> ServerResult<Self> {
        let ledger = JsonFileLedger::open_config(&config.ledger())?;
        Ok(Self::with_ledger(config, Arc::new(ledger)))
    }

    /// Build a server over an existing ledger.
    pub fn with_ledger(config: ServerConfig, ledger: Arc<dyn BalanceStore>) -> Self {
        let stats = StatsAggregator::new(ledger, config.records_path());
        Self {
            state: AppState::new(stats),
            config,
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = build_router(self.state);
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("Umbra dashboard listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
