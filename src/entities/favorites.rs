use sea_orm::entity::prelude::*;

/// Per-user favorite. At most one row per (user_id, item_id, media_type),
/// enforced by the repository's duplicate check rather than a constraint.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "favorites")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub user_id: String,

    pub item_id: i32,

    /// "movie" or "tv"
    pub media_type: String,

    pub title: String,

    pub poster: Option<String>,

    pub saved_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
