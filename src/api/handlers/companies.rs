use crate::api::error::AppError;
use crate::api::extract::{Json, Path};
use crate::models::{CompanyInput, CompanyResponse};
use axum::{extract::State, http::StatusCode};

#[utoipa::path(
    get,
    path = "/companies",
    responses(
        (status = 200, description = "All companies in insertion order", body = [CompanyResponse])
    ),
    tag = "companies"
)]
pub async fn list_companies(
    State(state): State<crate::AppState>,
) -> Result<Json<Vec<CompanyResponse>>, AppError> {
    Ok(Json(state.companies.list().await?))
}

#[utoipa::path(
    get,
    path = "/companies/{id}",
    params(
        ("id" = i32, Path, description = "Company ID")
    ),
    responses(
        (status = 200, description = "Company", body = CompanyResponse),
        (status = 404, description = "Company not found")
    ),
    tag = "companies"
)]
pub async fn get_company(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CompanyResponse>, AppError> {
    state
        .companies
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Company {} not found", id)))
}

#[utoipa::path(
    post,
    path = "/companies",
    request_body = CompanyInput,
    responses(
        (status = 201, description = "Company created", body = CompanyResponse),
        (status = 400, description = "Invalid company fields")
    ),
    tag = "companies"
)]
pub async fn create_company(
    State(state): State<crate::AppState>,
    Json(req): Json<CompanyInput>,
) -> Result<(StatusCode, Json<CompanyResponse>), AppError> {
    let company = state.companies.create(req).await?;
    Ok((StatusCode::CREATED, Json(company)))
}

#[utoipa::path(
    put,
    path = "/companies/{id}",
    params(
        ("id" = i32, Path, description = "Company ID")
    ),
    request_body = CompanyInput,
    responses(
        (status = 200, description = "Company replaced", body = CompanyResponse),
        (status = 400, description = "Invalid company fields"),
        (status = 404, description = "Company not found")
    ),
    tag = "companies"
)]
pub async fn update_company(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(req): Json<CompanyInput>,
) -> Result<Json<CompanyResponse>, AppError> {
    Ok(Json(state.companies.update(id, req).await?))
}

#[utoipa::path(
    delete,
    path = "/companies/{id}",
    params(
        ("id" = i32, Path, description = "Company ID")
    ),
    responses(
        (status = 204, description = "Company deleted; its media and ads are kept"),
        (status = 404, description = "Company not found")
    ),
    tag = "companies"
)]
pub async fn delete_company(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    state.companies.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
