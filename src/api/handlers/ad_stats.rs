use crate::api::error::AppError;
use crate::api::extract::{Json, Path};
use crate::models::{AdStatResponse, CreateAdStatRequest, UpdateAdStatRequest};
use axum::{extract::State, http::StatusCode};

#[utoipa::path(
    post,
    path = "/ad-stats",
    request_body = CreateAdStatRequest,
    responses(
        (status = 201, description = "Weekly stat recorded", body = AdStatResponse),
        (status = 400, description = "Invalid week or negative metric"),
        (status = 404, description = "Ad not found")
    ),
    tag = "ad-stats"
)]
pub async fn create_ad_stat(
    State(state): State<crate::AppState>,
    Json(req): Json<CreateAdStatRequest>,
) -> Result<(StatusCode, Json<AdStatResponse>), AppError> {
    let stat = state.ad_stats.create(req).await?;
    Ok((StatusCode::CREATED, Json(stat)))
}

#[utoipa::path(
    get,
    path = "/ad-stats/{id}",
    params(
        ("id" = i32, Path, description = "Ad stat ID")
    ),
    responses(
        (status = 200, description = "Weekly stat", body = AdStatResponse),
        (status = 404, description = "Ad stat not found")
    ),
    tag = "ad-stats"
)]
pub async fn get_ad_stat(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> Result<Json<AdStatResponse>, AppError> {
    state
        .ad_stats
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Ad stat {} not found", id)))
}

#[utoipa::path(
    put,
    path = "/ad-stats/{id}",
    params(
        ("id" = i32, Path, description = "Ad stat ID")
    ),
    request_body = UpdateAdStatRequest,
    responses(
        (status = 200, description = "Weekly stat replaced", body = AdStatResponse),
        (status = 400, description = "Invalid week or negative metric"),
        (status = 404, description = "Ad stat not found")
    ),
    tag = "ad-stats"
)]
pub async fn update_ad_stat(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateAdStatRequest>,
) -> Result<Json<AdStatResponse>, AppError> {
    Ok(Json(state.ad_stats.update(id, req).await?))
}

#[utoipa::path(
    delete,
    path = "/ad-stats/{id}",
    params(
        ("id" = i32, Path, description = "Ad stat ID")
    ),
    responses(
        (status = 204, description = "Weekly stat deleted"),
        (status = 404, description = "Ad stat not found")
    ),
    tag = "ad-stats"
)]
pub async fn delete_ad_stat(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    state.ad_stats.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
