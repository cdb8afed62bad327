use crate::api::error::AppError;
use crate::entities::{companies, media_items, prelude::*};
use crate::models::{CompanyInput, CompanyResponse};
use crate::services::clock::Clock;
use crate::utils::validation::required_text;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use std::collections::HashMap;
use std::sync::Arc;
use validator::Validate;

pub struct CompanyService {
    db: DatabaseConnection,
    clock: Arc<dyn Clock>,
}

struct CleanCompany {
    name: String,
    owner_name: String,
    email: String,
    phone: String,
}

fn clean(input: CompanyInput) -> Result<CleanCompany, AppError> {
    input.validate()?;
    Ok(CleanCompany {
        name: required_text("name", &input.name)?,
        owner_name: required_text("owner_name", &input.owner_name)?,
        email: required_text("email", &input.email)?,
        phone: required_text("phone", &input.phone)?,
    })
}

impl CompanyService {
    pub fn new(db: DatabaseConnection, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    /// Every company in insertion order.
    pub async fn list(&self) -> Result<Vec<CompanyResponse>, AppError> {
        let companies = Companies::find()
            .order_by_asc(companies::Column::Id)
            .all(&self.db)
            .await?;
        let counts = self.media_counts().await?;

        Ok(companies
            .into_iter()
            .map(|company| {
                let media_count = counts.get(&company.id).copied().unwrap_or(0);
                CompanyResponse::from_model(company, media_count)
            })
            .collect())
    }

    pub async fn get(&self, id: i32) -> Result<Option<CompanyResponse>, AppError> {
        let Some(company) = Companies::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let media_count = self.media_count(id).await?;
        Ok(Some(CompanyResponse::from_model(company, media_count)))
    }

    pub async fn create(&self, input: CompanyInput) -> Result<CompanyResponse, AppError> {
        let input = clean(input)?;

        let company = companies::ActiveModel {
            name: Set(input.name),
            owner_name: Set(input.owner_name),
            email: Set(input.email),
            phone: Set(input.phone),
            created_at: Set(self.clock.now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        tracing::info!("🏢 Company created: {} ({})", company.name, company.id);
        Ok(CompanyResponse::from_model(company, 0))
    }

    /// Overwrites name, owner, email and phone. `created_at` is kept.
    pub async fn update(&self, id: i32, input: CompanyInput) -> Result<CompanyResponse, AppError> {
        let input = clean(input)?;

        let existing = Companies::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Company {} not found", id)))?;

        let mut active_model = existing.into_active_model();
        active_model.name = Set(input.name);
        active_model.owner_name = Set(input.owner_name);
        active_model.email = Set(input.email);
        active_model.phone = Set(input.phone);

        let company = active_model.update(&self.db).await?;
        let media_count = self.media_count(id).await?;
        Ok(CompanyResponse::from_model(company, media_count))
    }

    /// Hard delete. Media items and ads that reference the company are left as they are.
    pub async fn remove(&self, id: i32) -> Result<(), AppError> {
        let res = Companies::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Company {} not found", id)));
        }
        tracing::info!("🗑️  Company {} deleted", id);
        Ok(())
    }

    async fn media_count(&self, company_id: i32) -> Result<u64, AppError> {
        Ok(MediaItems::find()
            .filter(media_items::Column::CompanyId.eq(company_id))
            .count(&self.db)
            .await?)
    }

    /// Assigned media per company from one grouped query.
    async fn media_counts(&self) -> Result<HashMap<i32, u64>, AppError> {
        let rows: Vec<(i32, i64)> = MediaItems::find()
            .select_only()
            .column(media_items::Column::CompanyId)
            .column_as(media_items::Column::Id.count(), "media_count")
            .filter(media_items::Column::CompanyId.is_not_null())
            .group_by(media_items::Column::CompanyId)
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(company_id, count)| (company_id, count.max(0) as u64))
            .collect())
    }
}
