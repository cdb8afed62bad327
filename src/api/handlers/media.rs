use crate::api::error::AppError;
use crate::api::extract::{Json, Path, Query};
use crate::models::{
    AssignCompanyRequest, CreateMediaRequest, ListMediaQuery, MediaResponse, MediaStats,
    UpdateMediaRequest, UploadUrlRequest, UploadUrlResponse,
};
use axum::{extract::State, http::StatusCode};

#[utoipa::path(
    get,
    path = "/media",
    params(ListMediaQuery),
    responses(
        (status = 200, description = "Media items matching the filters", body = [MediaResponse]),
        (status = 400, description = "Invalid company filter")
    ),
    tag = "media"
)]
pub async fn list_media(
    State(state): State<crate::AppState>,
    Query(query): Query<ListMediaQuery>,
) -> Result<Json<Vec<MediaResponse>>, AppError> {
    let filter = query.into_filter().map_err(AppError::BadRequest)?;
    Ok(Json(state.media.list(filter).await?))
}

#[utoipa::path(
    get,
    path = "/media/stats",
    responses(
        (status = 200, description = "Media counts", body = MediaStats)
    ),
    tag = "media"
)]
pub async fn media_stats(
    State(state): State<crate::AppState>,
) -> Result<Json<MediaStats>, AppError> {
    Ok(Json(state.media.stats().await?))
}

#[utoipa::path(
    get,
    path = "/media/{id}",
    params(
        ("id" = i32, Path, description = "Media item ID")
    ),
    responses(
        (status = 200, description = "Media item", body = MediaResponse),
        (status = 404, description = "Media item not found")
    ),
    tag = "media"
)]
pub async fn get_media(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MediaResponse>, AppError> {
    state
        .media
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Media item {} not found", id)))
}

#[utoipa::path(
    post,
    path = "/media",
    request_body = CreateMediaRequest,
    responses(
        (status = 201, description = "Media item recorded", body = MediaResponse),
        (status = 400, description = "Invalid media fields"),
        (status = 404, description = "Company not found")
    ),
    tag = "media"
)]
pub async fn create_media(
    State(state): State<crate::AppState>,
    Json(req): Json<CreateMediaRequest>,
) -> Result<(StatusCode, Json<MediaResponse>), AppError> {
    let item = state.media.create(req).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    put,
    path = "/media/{id}",
    params(
        ("id" = i32, Path, description = "Media item ID")
    ),
    request_body = UpdateMediaRequest,
    responses(
        (status = 200, description = "Name and description replaced", body = MediaResponse),
        (status = 404, description = "Media item not found")
    ),
    tag = "media"
)]
pub async fn update_media(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateMediaRequest>,
) -> Result<Json<MediaResponse>, AppError> {
    Ok(Json(state.media.update(id, req).await?))
}

#[utoipa::path(
    delete,
    path = "/media/{id}",
    params(
        ("id" = i32, Path, description = "Media item ID")
    ),
    responses(
        (status = 204, description = "Media item deleted"),
        (status = 404, description = "Media item not found")
    ),
    tag = "media"
)]
pub async fn delete_media(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    state.media.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/media/{id}/company",
    params(
        ("id" = i32, Path, description = "Media item ID")
    ),
    request_body = AssignCompanyRequest,
    responses(
        (status = 200, description = "Media item assigned", body = MediaResponse),
        (status = 404, description = "Media item or company not found")
    ),
    tag = "media"
)]
pub async fn assign_media_to_company(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(req): Json<AssignCompanyRequest>,
) -> Result<Json<MediaResponse>, AppError> {
    Ok(Json(state.media.assign_to_company(id, req.company_id).await?))
}

#[utoipa::path(
    delete,
    path = "/media/{id}/company",
    params(
        ("id" = i32, Path, description = "Media item ID")
    ),
    responses(
        (status = 200, description = "Media item unassigned", body = MediaResponse),
        (status = 404, description = "Media item not found")
    ),
    tag = "media"
)]
pub async fn remove_media_from_company(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MediaResponse>, AppError> {
    Ok(Json(state.media.remove_from_company(id).await?))
}

#[utoipa::path(
    post,
    path = "/media/upload-url",
    request_body = UploadUrlRequest,
    responses(
        (status = 200, description = "Signed PUT URL and resulting public URL", body = UploadUrlResponse),
        (status = 400, description = "Unusable file name or content type"),
        (status = 502, description = "Object storage failed to sign the request")
    ),
    tag = "media"
)]
pub async fn create_upload_url(
    State(state): State<crate::AppState>,
    Json(req): Json<UploadUrlRequest>,
) -> Result<Json<UploadUrlResponse>, AppError> {
    Ok(Json(state.media.create_upload_url(req).await?))
}
