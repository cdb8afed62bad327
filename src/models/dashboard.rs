use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DashboardSummary {
    pub total_companies: u64,
    pub total_media: u64,
    pub active_ads: u64,
    /// Sum of spend across every weekly ad stat
    pub total_spend_usd: f64,
}
