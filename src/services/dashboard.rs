use crate::api::error::AppError;
use crate::entities::{ad_stats, ads, prelude::*};
use crate::models::{AdStatus, AdWindow, DashboardSummary};
use crate::services::clock::Clock;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QuerySelect};
use std::sync::Arc;

pub struct DashboardService {
    db: DatabaseConnection,
    clock: Arc<dyn Clock>,
}

impl DashboardService {
    pub fn new(db: DatabaseConnection, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    pub async fn summary(&self) -> Result<DashboardSummary, AppError> {
        let total_companies = Companies::find().count(&self.db).await?;
        let total_media = MediaItems::find().count(&self.db).await?;

        let windows: Vec<(i32, String, String)> = Ads::find()
            .select_only()
            .column(ads::Column::Id)
            .column(ads::Column::StartDate)
            .column(ads::Column::EndDate)
            .into_tuple()
            .all(&self.db)
            .await?;

        let now = self.clock.now();
        let mut active_ads = 0;
        for (id, start_date, end_date) in windows {
            match AdWindow::parse(&start_date, &end_date) {
                Ok(window) if window.status_at(now) == AdStatus::Active => active_ads += 1,
                Ok(_) => {}
                Err(e) => tracing::warn!("Skipping ad {} in dashboard: {}", id, e),
            }
        }

        let total_spend_usd: Option<f64> = AdStats::find()
            .select_only()
            .column_as(ad_stats::Column::SpendUsd.sum(), "total_spend")
            .into_tuple::<Option<f64>>()
            .one(&self.db)
            .await?
            .flatten();

        Ok(DashboardSummary {
            total_companies,
            total_media,
            active_ads,
            total_spend_usd: total_spend_usd.unwrap_or(0.0),
        })
    }
}
