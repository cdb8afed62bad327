use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ad_stats")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub ad_id: i32,
    pub week_start_date: String,
    #[sea_orm(column_type = "Double")]
    pub spend_usd: f64,
    pub leads: i64,
    pub clicks: i64,
    pub reach: i64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
