use crate::api::error::AppError;
use crate::entities::{ad_stats, prelude::*};
use crate::models::{
    AdStatResponse, AdStatTotals, CreateAdStatRequest, UpdateAdStatRequest, parse_iso_instant,
};
use crate::services::clock::Clock;
use crate::services::ensure_ad_exists;
use crate::utils::validation::non_negative_amount;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;
use validator::Validate;

pub struct AdStatService {
    db: DatabaseConnection,
    clock: Arc<dyn Clock>,
}

fn clean_week_start(value: &str) -> Result<String, AppError> {
    let value = value.trim();
    if parse_iso_instant(value).is_none() {
        return Err(AppError::BadRequest(format!(
            "Invalid week_start_date: {}",
            value
        )));
    }
    Ok(value.to_string())
}

impl AdStatService {
    pub fn new(db: DatabaseConnection, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    /// Stats of one ad, most recently created first. The list is not sorted by
    /// `week_start_date`: entering weeks out of order yields them out of order.
    /// Stats left behind by a deleted ad are still listed.
    pub async fn list_by_ad(&self, ad_id: i32) -> Result<Vec<AdStatResponse>, AppError> {
        let stats = AdStats::find()
            .filter(ad_stats::Column::AdId.eq(ad_id))
            .order_by_desc(ad_stats::Column::Id)
            .all(&self.db)
            .await?;
        Ok(stats.into_iter().map(Into::into).collect())
    }

    pub async fn totals_for_ad(&self, ad_id: i32) -> Result<AdStatTotals, AppError> {
        let stats = self.list_by_ad(ad_id).await?;

        let mut totals = AdStatTotals {
            ad_id,
            ..Default::default()
        };
        for stat in &stats {
            totals.add(stat).map_err(AppError::Internal)?;
        }
        Ok(totals)
    }

    pub async fn get(&self, id: i32) -> Result<Option<AdStatResponse>, AppError> {
        Ok(AdStats::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Into::into))
    }

    pub async fn create(&self, req: CreateAdStatRequest) -> Result<AdStatResponse, AppError> {
        req.validate()?;
        let week_start_date = clean_week_start(&req.week_start_date)?;
        let spend_usd = non_negative_amount("spend_usd", req.spend_usd)?;
        ensure_ad_exists(&self.db, req.ad_id).await?;

        let stat = ad_stats::ActiveModel {
            ad_id: Set(req.ad_id),
            week_start_date: Set(week_start_date),
            spend_usd: Set(spend_usd),
            leads: Set(req.leads),
            clicks: Set(req.clicks),
            reach: Set(req.reach),
            created_at: Set(self.clock.now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        tracing::info!(
            "📈 Stat {} recorded for ad {} (week of {})",
            stat.id,
            stat.ad_id,
            stat.week_start_date
        );
        Ok(stat.into())
    }

    pub async fn update(
        &self,
        id: i32,
        req: UpdateAdStatRequest,
    ) -> Result<AdStatResponse, AppError> {
        req.validate()?;
        let week_start_date = clean_week_start(&req.week_start_date)?;
        let spend_usd = non_negative_amount("spend_usd", req.spend_usd)?;

        let existing = AdStats::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Ad stat {} not found", id)))?;

        let mut active_model = existing.into_active_model();
        active_model.week_start_date = Set(week_start_date);
        active_model.spend_usd = Set(spend_usd);
        active_model.leads = Set(req.leads);
        active_model.clicks = Set(req.clicks);
        active_model.reach = Set(req.reach);

        Ok(active_model.update(&self.db).await?.into())
    }

    pub async fn remove(&self, id: i32) -> Result<(), AppError> {
        let res = AdStats::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Ad stat {} not found", id)));
        }
        Ok(())
    }
}
