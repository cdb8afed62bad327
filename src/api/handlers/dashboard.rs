use crate::api::error::AppError;
use crate::api::extract::Json;
use crate::models::DashboardSummary;
use axum::extract::State;

#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Headline counts for the admin dashboard", body = DashboardSummary)
    ),
    tag = "dashboard"
)]
pub async fn dashboard_summary(
    State(state): State<crate::AppState>,
) -> Result<Json<DashboardSummary>, AppError> {
    Ok(Json(state.dashboard.summary().await?))
}
