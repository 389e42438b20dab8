use sea_orm::entity::prelude::*;

/// One row per (search term, movie) pair. `count` only ever increases;
/// rows are never deleted by the service.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "movie_metrics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub search_term: String,

    /// Nullable to mirror the looseness of the original document store;
    /// rows written by this service always carry it.
    pub movie_id: Option<i32>,

    /// Title snapshot taken at first search.
    pub title: String,

    /// Full poster URL, or empty string when the movie had no poster.
    pub poster_url: String,

    pub count: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
