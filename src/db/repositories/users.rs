use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::entities::users;
use crate::models::UserProfile;

impl From<users::Model> for UserProfile {
    fn from(model: users::Model) -> Self {
        Self {
            uid: model.uid,
            email: model.email,
            username: model.username,
            created_at: model.created_at,
        }
    }
}

pub struct UsersRepository {
    conn: DatabaseConnection,
}

impl UsersRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, uid: &str) -> Result<Option<UserProfile>> {
        let user = users::Entity::find_by_id(uid)
            .one(&self.conn)
            .await
            .context("Failed to query user by uid")?;

        Ok(user.map(UserProfile::from))
    }

    /// Load the profile for `uid`, creating the document on first sign-in.
    pub async fn ensure(&self, uid: &str, email: &str, username: &str) -> Result<UserProfile> {
        if let Some(existing) = self.get(uid).await? {
            return Ok(existing);
        }

        let active = users::ActiveModel {
            uid: Set(uid.to_string()),
            email: Set(email.to_string()),
            username: Set(username.to_string()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to create user document")?;

        Ok(UserProfile::from(model))
    }
}
