use crate::api::error::AppError;
use crate::api::extract::{Json, Path, Query};
use crate::models::{AdInput, AdResponse, AdStatResponse, AdStatTotals, ListAdsQuery};
use axum::{extract::State, http::StatusCode};

#[utoipa::path(
    get,
    path = "/ads",
    params(ListAdsQuery),
    responses(
        (status = 200, description = "Ads with their current status", body = [AdResponse]),
        (status = 400, description = "Unknown status filter")
    ),
    tag = "ads"
)]
pub async fn list_ads(
    State(state): State<crate::AppState>,
    Query(query): Query<ListAdsQuery>,
) -> Result<Json<Vec<AdResponse>>, AppError> {
    Ok(Json(state.ads.list(query).await?))
}

#[utoipa::path(
    get,
    path = "/ads/{id}",
    params(
        ("id" = i32, Path, description = "Ad ID")
    ),
    responses(
        (status = 200, description = "Ad", body = AdResponse),
        (status = 404, description = "Ad not found")
    ),
    tag = "ads"
)]
pub async fn get_ad(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> Result<Json<AdResponse>, AppError> {
    state
        .ads
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Ad {} not found", id)))
}

#[utoipa::path(
    post,
    path = "/ads",
    request_body = AdInput,
    responses(
        (status = 201, description = "Ad created", body = AdResponse),
        (status = 400, description = "Invalid ad fields or date window"),
        (status = 404, description = "Referenced company not found")
    ),
    tag = "ads"
)]
pub async fn create_ad(
    State(state): State<crate::AppState>,
    Json(req): Json<AdInput>,
) -> Result<(StatusCode, Json<AdResponse>), AppError> {
    let ad = state.ads.create(req).await?;
    Ok((StatusCode::CREATED, Json(ad)))
}

#[utoipa::path(
    put,
    path = "/ads/{id}",
    params(
        ("id" = i32, Path, description = "Ad ID")
    ),
    request_body = AdInput,
    responses(
        (status = 200, description = "Ad replaced", body = AdResponse),
        (status = 400, description = "Invalid ad fields or date window"),
        (status = 404, description = "Ad or referenced company not found")
    ),
    tag = "ads"
)]
pub async fn update_ad(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(req): Json<AdInput>,
) -> Result<Json<AdResponse>, AppError> {
    Ok(Json(state.ads.update(id, req).await?))
}

#[utoipa::path(
    delete,
    path = "/ads/{id}",
    params(
        ("id" = i32, Path, description = "Ad ID")
    ),
    responses(
        (status = 204, description = "Ad deleted; its weekly stats are kept"),
        (status = 404, description = "Ad not found")
    ),
    tag = "ads"
)]
pub async fn delete_ad(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    state.ads.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/ads/{id}/stats",
    params(
        ("id" = i32, Path, description = "Ad ID")
    ),
    responses(
        (status = 200, description = "Weekly stats, most recently recorded first", body = [AdStatResponse])
    ),
    tag = "ad-stats"
)]
pub async fn list_ad_stats(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<AdStatResponse>>, AppError> {
    Ok(Json(state.ad_stats.list_by_ad(id).await?))
}

#[utoipa::path(
    get,
    path = "/ads/{id}/stats/totals",
    params(
        ("id" = i32, Path, description = "Ad ID")
    ),
    responses(
        (status = 200, description = "Sums over every recorded week", body = AdStatTotals)
    ),
    tag = "ad-stats"
)]
pub async fn ad_stat_totals(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> Result<Json<AdStatTotals>, AppError> {
    Ok(Json(state.ad_stats.totals_for_ad(id).await?))
}
