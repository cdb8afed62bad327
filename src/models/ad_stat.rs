use crate::entities::ad_stats;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Upper bound for weekly `leads`, `clicks` and `reach`.
pub const MAX_WEEKLY_COUNT: i64 = 1_000_000_000_000;

#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct CreateAdStatRequest {
    pub ad_id: i32,
    #[validate(length(min = 1, max = 64))]
    pub week_start_date: String,
    pub spend_usd: f64,
    #[validate(range(min = 0, max = MAX_WEEKLY_COUNT))]
    pub leads: i64,
    #[validate(range(min = 0, max = MAX_WEEKLY_COUNT))]
    pub clicks: i64,
    #[validate(range(min = 0, max = MAX_WEEKLY_COUNT))]
    pub reach: i64,
}

/// Replaces every metric field of a stat; the owning ad cannot change.
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct UpdateAdStatRequest {
    #[validate(length(min = 1, max = 64))]
    pub week_start_date: String,
    pub spend_usd: f64,
    #[validate(range(min = 0, max = MAX_WEEKLY_COUNT))]
    pub leads: i64,
    #[validate(range(min = 0, max = MAX_WEEKLY_COUNT))]
    pub clicks: i64,
    #[validate(range(min = 0, max = MAX_WEEKLY_COUNT))]
    pub reach: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AdStatResponse {
    pub id: i32,
    pub ad_id: i32,
    pub week_start_date: String,
    pub spend_usd: f64,
    pub leads: i64,
    pub clicks: i64,
    pub reach: i64,
    pub created_at: DateTime<Utc>,
}

impl From<ad_stats::Model> for AdStatResponse {
    fn from(model: ad_stats::Model) -> Self {
        Self {
            id: model.id,
            ad_id: model.ad_id,
            week_start_date: model.week_start_date,
            spend_usd: model.spend_usd,
            leads: model.leads,
            clicks: model.clicks,
            reach: model.reach,
            created_at: model.created_at,
        }
    }
}

/// Sums over every weekly stat of one ad.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AdStatTotals {
    pub ad_id: i32,
    pub weeks: u64,
    pub spend_usd: f64,
    pub leads: i64,
    pub clicks: i64,
    pub reach: i64,
}

impl AdStatTotals {
    /// Adds one week to the running totals, failing instead of wrapping.
    pub fn add(&mut self, stat: &AdStatResponse) -> Result<(), String> {
        let overflow = |field: &str| format!("{} total overflows for ad {}", field, self.ad_id);

        let leads = self.leads.checked_add(stat.leads).ok_or_else(|| overflow("leads"))?;
        let clicks = self.clicks.checked_add(stat.clicks).ok_or_else(|| overflow("clicks"))?;
        let reach = self.reach.checked_add(stat.reach).ok_or_else(|| overflow("reach"))?;

        self.weeks += 1;
        self.spend_usd += stat.spend_usd;
        self.leads = leads;
        self.clicks = clicks;
        self.reach = reach;
        Ok(())
    }
}
