use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::models::{ContentItem, CounterRecord, Favorite, MediaType, NewFavorite, UserProfile};

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.starts_with(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn metrics_repo(&self) -> repositories::metrics::MetricsRepository {
        repositories::metrics::MetricsRepository::new(self.conn.clone())
    }

    fn favorites_repo(&self) -> repositories::favorites::FavoritesRepository {
        repositories::favorites::FavoritesRepository::new(self.conn.clone())
    }

    fn users_repo(&self) -> repositories::users::UsersRepository {
        repositories::users::UsersRepository::new(self.conn.clone())
    }

    // ========== Counter Store Methods ==========

    pub async fn record_search(&self, term: &str, item: &ContentItem) -> Result<()> {
        self.metrics_repo().record_search(term, item).await
    }

    pub async fn list_counters(&self, media_type: MediaType) -> Result<Vec<CounterRecord>> {
        self.metrics_repo().list_counters(media_type).await
    }

    // ========== Favorites Methods ==========

    pub async fn favorites_for_user(&self, user_id: &str) -> Result<Vec<Favorite>> {
        self.favorites_repo().list_for_user(user_id).await
    }

    pub async fn add_favorite(
        &self,
        user_id: &str,
        item: &NewFavorite,
    ) -> Result<Option<Favorite>> {
        self.favorites_repo().insert(user_id, item).await
    }

    pub async fn remove_favorite(&self, favorite_id: i32) -> Result<()> {
        self.favorites_repo().delete(favorite_id).await
    }

    pub async fn get_favorite(&self, favorite_id: i32) -> Result<Option<Favorite>> {
        self.favorites_repo().get(favorite_id).await
    }

    // ========== User Methods ==========

    pub async fn get_user(&self, uid: &str) -> Result<Option<UserProfile>> {
        self.users_repo().get(uid).await
    }

    pub async fn ensure_user(&self, uid: &str, email: &str, username: &str) -> Result<UserProfile> {
        self.users_repo().ensure(uid, email, username).await
    }
}
