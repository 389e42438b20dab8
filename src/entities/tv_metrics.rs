use sea_orm::entity::prelude::*;

/// Series-side twin of `movie_metrics`, keyed by `tv_id`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tv_metrics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub search_term: String,

    pub tv_id: Option<i32>,

    pub title: String,

    pub poster_url: String,

    pub count: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
