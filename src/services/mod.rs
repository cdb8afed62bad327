pub mod ad_stats;
pub mod ads;
pub mod clock;
pub mod companies;
pub mod dashboard;
pub mod media;
pub mod storage;

use crate::api::error::AppError;
use crate::entities::prelude::*;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

pub(crate) async fn ensure_company_exists(
    db: &DatabaseConnection,
    company_id: i32,
) -> Result<(), AppError> {
    if Companies::find_by_id(company_id).count(db).await? == 0 {
        return Err(AppError::NotFound(format!(
            "Company {} not found",
            company_id
        )));
    }
    Ok(())
}

pub(crate) async fn ensure_ad_exists(db: &DatabaseConnection, ad_id: i32) -> Result<(), AppError> {
    if Ads::find_by_id(ad_id).count(db).await? == 0 {
        return Err(AppError::NotFound(format!("Ad {} not found", ad_id)));
    }
    Ok(())
}
