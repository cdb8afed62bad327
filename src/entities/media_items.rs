use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "media_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// `None` means the item is not assigned to any company
    pub company_id: Option<i32>,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// "image" or "video"
    pub media_type: String,
    #[sea_orm(column_type = "Text")]
    pub url: String,
    pub uploaded_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
