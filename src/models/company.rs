use crate::entities::companies;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Full field set for creating or replacing a company.
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct CompanyInput {
    #[validate(length(min = 1, max = 255, message = "Company name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 255, message = "Owner name is required"))]
    pub owner_name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, max = 64, message = "Phone is required"))]
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CompanyResponse {
    pub id: i32,
    pub name: String,
    pub owner_name: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    /// Media items currently assigned to the company
    pub media_count: u64,
}

impl CompanyResponse {
    pub fn from_model(model: companies::Model, media_count: u64) -> Self {
        Self {
            id: model.id,
            name: model.name,
            owner_name: model.owner_name,
            email: model.email,
            phone: model.phone,
            created_at: model.created_at,
            media_count,
        }
    }
}
