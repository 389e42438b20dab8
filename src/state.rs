use std::sync::Arc;
use tokio::sync::RwLock;

use crate::clients::tmdb::TmdbClient;
use crate::config::Config;
use crate::db::Store;
use crate::services::{
    FavoritesService, OverviewService, SearchService, SessionService, TrendingService,
};

/// Build a shared HTTP client with reasonable defaults for API calls.
/// This client should be reused across all HTTP-based services to enable
/// connection pooling and avoid socket exhaustion.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent("Trendarr/1.0")
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub tmdb: Arc<TmdbClient>,

    pub search_service: Arc<SearchService>,

    pub trending_service: Arc<TrendingService>,

    pub favorites_service: Arc<FavoritesService>,

    pub session_service: Arc<SessionService>,

    pub overview_service: Arc<OverviewService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let http_client =
            build_shared_http_client(config.tmdb.request_timeout_seconds.into())?;
        let tmdb = Arc::new(TmdbClient::with_shared_client(http_client, &config.tmdb));

        let search_service = Arc::new(SearchService::new(tmdb.clone(), store.clone()));
        let trending_service = Arc::new(TrendingService::new(store.clone()));
        let favorites_service = Arc::new(FavoritesService::new(store.clone()));
        let session_service = Arc::new(SessionService::new(
            store.clone(),
            favorites_service.clone(),
        ));
        let overview_service = Arc::new(OverviewService::new(
            tmdb.clone(),
            trending_service.clone(),
        ));

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            tmdb,
            search_service,
            trending_service,
            favorites_service,
            session_service,
            overview_service,
        })
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
