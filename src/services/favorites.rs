//! Favorites with a live, push-driven feed per signed-in user.
//!
//! Each server-side mutation re-reads the user's full favorites list and
//! publishes it as a snapshot; consumers always treat the latest snapshot as
//! authoritative. A mutation racing an incoming snapshot resolves by
//! snapshot overwrite, last update wins.

use std::collections::HashMap;

use thiserror::Error;
use tokio::sync::{RwLock, watch};
use tracing::error;

use crate::db::Store;
use crate::models::{Favorite, MediaType, NewFavorite};

#[derive(Debug, Error)]
pub enum FavoritesError {
    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for FavoritesError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Consumer handle onto one user's favorites feed. Holds the latest
/// snapshot; closes when the session is torn down.
pub struct FavoritesFeed {
    uid: String,
    rx: watch::Receiver<Vec<Favorite>>,
}

impl FavoritesFeed {
    #[must_use]
    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// Copy of the last-delivered snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Favorite> {
        self.rx.borrow().clone()
    }

    /// Synchronous membership check against the last-delivered snapshot.
    #[must_use]
    pub fn is_favorite(&self, item_id: i32, media_type: MediaType) -> bool {
        self.rx
            .borrow()
            .iter()
            .any(|f| f.item_id == item_id && f.media_type == media_type)
    }

    /// Wait for the next snapshot. Returns `false` once the feed is closed
    /// (user signed out).
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

/// Store accessor plus per-user snapshot publishers.
pub struct FavoritesService {
    store: Store,
    feeds: RwLock<HashMap<String, watch::Sender<Vec<Favorite>>>>,
}

impl FavoritesService {
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self {
            store,
            feeds: RwLock::new(HashMap::new()),
        }
    }

    /// Open the live feed for `uid`. The current state is delivered as the
    /// first snapshot before this returns.
    pub async fn subscribe(&self, uid: &str) -> Result<FavoritesFeed, FavoritesError> {
        let current = self.store.favorites_for_user(uid).await?;

        let mut feeds = self.feeds.write().await;
        let sender = feeds
            .entry(uid.to_string())
            .or_insert_with(|| watch::channel(Vec::new()).0);
        sender.send_replace(current);

        Ok(FavoritesFeed {
            uid: uid.to_string(),
            rx: sender.subscribe(),
        })
    }

    /// Tear the feed down on sign-out: publish an empty snapshot so
    /// consumers clear their state, then close the channel.
    pub async fn unsubscribe(&self, uid: &str) {
        if let Some(sender) = self.feeds.write().await.remove(uid) {
            sender.send_replace(Vec::new());
        }
    }

    /// Insert a favorite for `uid`. A duplicate (item, variant) is a no-op
    /// returning `None`. Store failures propagate; the caller needs to know
    /// a save did not take effect.
    pub async fn add(
        &self,
        uid: &str,
        item: &NewFavorite,
    ) -> Result<Option<Favorite>, FavoritesError> {
        let inserted = self.store.add_favorite(uid, item).await?;
        self.publish_snapshot(uid).await;
        Ok(inserted)
    }

    /// Delete by document id, unconditionally.
    pub async fn remove(&self, uid: &str, favorite_id: i32) -> Result<(), FavoritesError> {
        self.store.remove_favorite(favorite_id).await?;
        self.publish_snapshot(uid).await;
        Ok(())
    }

    pub async fn list(&self, uid: &str) -> Result<Vec<Favorite>, FavoritesError> {
        Ok(self.store.favorites_for_user(uid).await?)
    }

    /// Re-read the user's full list and push it to the feed. The mutation
    /// that triggered this already succeeded, so a failed refresh only logs;
    /// consumers keep the previous snapshot.
    async fn publish_snapshot(&self, uid: &str) {
        let feeds = self.feeds.read().await;
        let Some(sender) = feeds.get(uid) else {
            return;
        };

        match self.store.favorites_for_user(uid).await {
            Ok(snapshot) => {
                sender.send_replace(snapshot);
            }
            Err(e) => error!("Failed to refresh favorites snapshot: {e:#}"),
        }
    }
}
