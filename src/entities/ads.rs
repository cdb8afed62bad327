use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ads")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub company_id: i32,
    /// JSON array of company ids
    #[sea_orm(column_type = "Json")]
    pub assigned_to_company_ids: Json,
    /// ISO-8601 date or timestamp, as submitted
    pub start_date: String,
    pub end_date: String,
    #[sea_orm(column_type = "Double")]
    pub budget: f64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
