use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::entities::favorites;
use crate::models::{Favorite, MediaType, NewFavorite};

impl From<favorites::Model> for Favorite {
    fn from(model: favorites::Model) -> Self {
        let media_type = model.media_type.parse().unwrap_or(MediaType::Movie);
        Self {
            id: model.id,
            user_id: model.user_id,
            item_id: model.item_id,
            media_type,
            title: model.title,
            poster: model.poster,
            saved_at: model.saved_at,
        }
    }
}

/// Per-user CRUD over the favorites collection.
///
/// The duplicate check is check-then-insert without a unique constraint,
/// mirroring the store's consistency model; a concurrent insert of the same
/// (user, item, variant) can slip through.
pub struct FavoritesRepository {
    conn: DatabaseConnection,
}

impl FavoritesRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Favorite>> {
        let rows = favorites::Entity::find()
            .filter(favorites::Column::UserId.eq(user_id))
            .all(&self.conn)
            .await
            .context("Failed to list favorites")?;

        Ok(rows.into_iter().map(Favorite::from).collect())
    }

    /// Insert a favorite with a store-assigned id and generated timestamp.
    /// Returns `None` without writing when the user already has an entry for
    /// the same (item, variant).
    pub async fn insert(&self, user_id: &str, item: &NewFavorite) -> Result<Option<Favorite>> {
        let existing = favorites::Entity::find()
            .filter(favorites::Column::UserId.eq(user_id))
            .filter(favorites::Column::ItemId.eq(item.item_id))
            .filter(favorites::Column::MediaType.eq(item.media_type.to_string()))
            .one(&self.conn)
            .await
            .context("Failed to check for existing favorite")?;

        if existing.is_some() {
            return Ok(None);
        }

        let active = favorites::ActiveModel {
            user_id: Set(user_id.to_string()),
            item_id: Set(item.item_id),
            media_type: Set(item.media_type.to_string()),
            title: Set(item.title.clone()),
            poster: Set(item.poster.clone()),
            saved_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert favorite")?;

        Ok(Some(Favorite::from(model)))
    }

    /// Unconditional delete by document id.
    pub async fn delete(&self, favorite_id: i32) -> Result<()> {
        favorites::Entity::delete_by_id(favorite_id)
            .exec(&self.conn)
            .await
            .context("Failed to delete favorite")?;
        Ok(())
    }

    pub async fn get(&self, favorite_id: i32) -> Result<Option<Favorite>> {
        let row = favorites::Entity::find_by_id(favorite_id)
            .one(&self.conn)
            .await
            .context("Failed to query favorite by id")?;
        Ok(row.map(Favorite::from))
    }
}
