//! Explicit session lifecycle: created on sign-in, disposed on sign-out.
//!
//! Identity is asserted by the external provider; this service only mirrors
//! the profile into the users collection and wires the favorites feed to
//! the identity's lifetime.

use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::db::Store;
use crate::models::UserProfile;
use crate::services::favorites::{FavoritesFeed, FavoritesService};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Database error: {0}")]
    Database(String),
}

/// Identity fields supplied by the external provider at sign-in.
#[derive(Debug, Clone, Deserialize)]
pub struct SignIn {
    pub uid: String,
    pub email: String,
    pub username: String,
}

/// Everything a consumer needs for one signed-in identity. Dropping the
/// context (after `SessionService::sign_out`) releases the feed.
pub struct SessionContext {
    pub user: UserProfile,
    pub favorites: FavoritesFeed,
}

pub struct SessionService {
    store: Store,
    favorites: Arc<FavoritesService>,
}

impl SessionService {
    #[must_use]
    pub const fn new(store: Store, favorites: Arc<FavoritesService>) -> Self {
        Self { store, favorites }
    }

    /// Establish a session. The users-collection sync is best-effort: a
    /// failed write is logged and never blocks sign-in.
    pub async fn sign_in(&self, identity: &SignIn) -> Result<SessionContext, SessionError> {
        let user = match self
            .store
            .ensure_user(&identity.uid, &identity.email, &identity.username)
            .await
        {
            Ok(user) => user,
            Err(e) => {
                warn!("Failed to sync user document: {e:#}");
                UserProfile {
                    uid: identity.uid.clone(),
                    email: identity.email.clone(),
                    username: identity.username.clone(),
                    created_at: chrono::Utc::now().to_rfc3339(),
                }
            }
        };

        let favorites = self
            .favorites
            .subscribe(&identity.uid)
            .await
            .map_err(|e| SessionError::Database(e.to_string()))?;

        Ok(SessionContext { user, favorites })
    }

    /// Dispose the session: the favorites feed is cleared and closed.
    pub async fn sign_out(&self, uid: &str) {
        self.favorites.unsubscribe(uid).await;
    }
}
