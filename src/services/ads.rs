use crate::api::error::AppError;
use crate::entities::{ads, prelude::*};
use crate::models::{AdInput, AdResponse, AdWindow, ListAdsQuery};
use crate::services::clock::Clock;
use crate::services::ensure_company_exists;
use crate::utils::validation::{non_negative_amount, required_text};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;
use validator::Validate;

pub struct AdService {
    db: DatabaseConnection,
    clock: Arc<dyn Clock>,
}

struct CleanAd {
    name: String,
    company_id: i32,
    assigned_to_company_ids: Vec<i32>,
    start_date: String,
    end_date: String,
    budget: f64,
}

fn to_response(model: ads::Model, now: DateTime<Utc>) -> Result<AdResponse, AppError> {
    AdResponse::from_model(model, now).map_err(AppError::Internal)
}

impl AdService {
    pub fn new(db: DatabaseConnection, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    /// Ads in insertion order, optionally narrowed to one primary company
    /// and to the status they have right now.
    pub async fn list(&self, query: ListAdsQuery) -> Result<Vec<AdResponse>, AppError> {
        let mut select = Ads::find();
        if let Some(company_id) = query.company_id {
            select = select.filter(ads::Column::CompanyId.eq(company_id));
        }

        let rows = select.order_by_asc(ads::Column::Id).all(&self.db).await?;
        let now = self.clock.now();

        let mut result = Vec::with_capacity(rows.len());
        for row in rows {
            let ad = to_response(row, now)?;
            if query.status.is_none_or(|status| status == ad.status) {
                result.push(ad);
            }
        }
        Ok(result)
    }

    pub async fn get(&self, id: i32) -> Result<Option<AdResponse>, AppError> {
        let now = self.clock.now();
        Ads::find_by_id(id)
            .one(&self.db)
            .await?
            .map(|model| to_response(model, now))
            .transpose()
    }

    pub async fn create(&self, input: AdInput) -> Result<AdResponse, AppError> {
        let ad = self.clean(input).await?;
        let now = self.clock.now();

        let model = ads::ActiveModel {
            name: Set(ad.name),
            company_id: Set(ad.company_id),
            assigned_to_company_ids: Set(serde_json::json!(ad.assigned_to_company_ids)),
            start_date: Set(ad.start_date),
            end_date: Set(ad.end_date),
            budget: Set(ad.budget),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        tracing::info!(
            "📣 Ad created: {} ({}) for company {}",
            model.name,
            model.id,
            model.company_id
        );
        to_response(model, now)
    }

    /// Replaces every editable field of the ad.
    pub async fn update(&self, id: i32, input: AdInput) -> Result<AdResponse, AppError> {
        let existing = Ads::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Ad {} not found", id)))?;

        let ad = self.clean(input).await?;

        let mut active_model = existing.into_active_model();
        active_model.name = Set(ad.name);
        active_model.company_id = Set(ad.company_id);
        active_model.assigned_to_company_ids = Set(serde_json::json!(ad.assigned_to_company_ids));
        active_model.start_date = Set(ad.start_date);
        active_model.end_date = Set(ad.end_date);
        active_model.budget = Set(ad.budget);

        to_response(active_model.update(&self.db).await?, self.clock.now())
    }

    /// Hard delete. The ad's weekly stats are not removed.
    pub async fn remove(&self, id: i32) -> Result<(), AppError> {
        let res = Ads::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Ad {} not found", id)));
        }
        tracing::info!("🗑️  Ad {} deleted", id);
        Ok(())
    }

    async fn clean(&self, input: AdInput) -> Result<CleanAd, AppError> {
        input.validate()?;

        let name = required_text("name", &input.name)?;
        let budget = non_negative_amount("budget", input.budget)?;
        let start_date = input.start_date.trim().to_string();
        let end_date = input.end_date.trim().to_string();
        AdWindow::parse(&start_date, &end_date).map_err(AppError::BadRequest)?;

        ensure_company_exists(&self.db, input.company_id).await?;

        let mut assigned = Vec::with_capacity(input.assigned_to_company_ids.len().max(1));
        for company_id in input.assigned_to_company_ids {
            if !assigned.contains(&company_id) {
                assigned.push(company_id);
            }
        }
        if assigned.is_empty() {
            assigned.push(input.company_id);
        }
        for company_id in &assigned {
            if *company_id != input.company_id {
                ensure_company_exists(&self.db, *company_id).await?;
            }
        }

        Ok(CleanAd {
            name,
            company_id: input.company_id,
            assigned_to_company_ids: assigned,
            start_date,
            end_date,
            budget,
        })
    }
}
