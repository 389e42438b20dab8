use sea_orm::entity::prelude::*;

/// One row per authenticated user, created on first sign-in.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Provider-assigned identifier.
    #[sea_orm(primary_key, auto_increment = false)]
    pub uid: String,

    pub email: String,

    pub username: String,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
