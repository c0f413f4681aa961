use sea_orm::entity::prelude::*;

/// A Facebook Graph profile mirrored into the local store.
///
/// The id comes from the Graph API and is never generated locally. Every
/// other column may be overwritten wholesale by a sync pass.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "facebook_users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub name: String,
    pub username: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub about: Option<String>,
    pub is_published: Option<bool>,
    pub website: Option<String>,
    pub link: Option<String>,
    pub number: Option<i32>,
    pub talking_about_count: Option<i32>,
    pub likes: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
