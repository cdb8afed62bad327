pub mod api;
pub mod config;
pub mod entities;
pub mod infrastructure;
pub mod models;
pub mod services;
pub mod utils;

use crate::config::AppConfig;
use crate::services::ad_stats::AdStatService;
use crate::services::ads::AdService;
use crate::services::clock::Clock;
use crate::services::companies::CompanyService;
use crate::services::dashboard::DashboardService;
use crate::services::media::MediaService;
use crate::services::storage::StorageService;
use axum::{
    Router,
    http::HeaderValue,
    middleware::from_fn,
    routing::{get, post, put},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::health::health_check,
        api::handlers::dashboard::dashboard_summary,
        api::handlers::companies::list_companies,
        api::handlers::companies::get_company,
        api::handlers::companies::create_company,
        api::handlers::companies::update_company,
        api::handlers::companies::delete_company,
        api::handlers::media::list_media,
        api::handlers::media::media_stats,
        api::handlers::media::get_media,
        api::handlers::media::create_media,
        api::handlers::media::update_media,
        api::handlers::media::delete_media,
        api::handlers::media::assign_media_to_company,
        api::handlers::media::remove_media_from_company,
        api::handlers::media::create_upload_url,
        api::handlers::ads::list_ads,
        api::handlers::ads::get_ad,
        api::handlers::ads::create_ad,
        api::handlers::ads::update_ad,
        api::handlers::ads::delete_ad,
        api::handlers::ads::list_ad_stats,
        api::handlers::ads::ad_stat_totals,
        api::handlers::ad_stats::create_ad_stat,
        api::handlers::ad_stats::get_ad_stat,
        api::handlers::ad_stats::update_ad_stat,
        api::handlers::ad_stats::delete_ad_stat,
    ),
    components(
        schemas(
            api::handlers::health::HealthResponse,
            models::DashboardSummary,
            models::CompanyInput,
            models::CompanyResponse,
            models::MediaType,
            models::CreateMediaRequest,
            models::UpdateMediaRequest,
            models::AssignCompanyRequest,
            models::MediaResponse,
            models::MediaStats,
            models::UploadUrlRequest,
            models::UploadUrlResponse,
            models::AdStatus,
            models::AdInput,
            models::AdResponse,
            models::CreateAdStatRequest,
            models::UpdateAdStatRequest,
            models::AdStatResponse,
            models::AdStatTotals,
        )
    ),
    tags(
        (name = "companies", description = "Advertiser companies"),
        (name = "media", description = "Media library and signed uploads"),
        (name = "ads", description = "Ad campaigns"),
        (name = "ad-stats", description = "Weekly ad performance"),
        (name = "dashboard", description = "Dashboard summary"),
        (name = "system", description = "Health checks")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub storage: Arc<dyn StorageService>,
    pub config: AppConfig,
    pub companies: Arc<CompanyService>,
    pub media: Arc<MediaService>,
    pub ads: Arc<AdService>,
    pub ad_stats: Arc<AdStatService>,
    pub dashboard: Arc<DashboardService>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        storage: Arc<dyn StorageService>,
        clock: Arc<dyn Clock>,
        config: AppConfig,
    ) -> Self {
        let upload_url_ttl = Duration::from_secs(config.storage.upload_url_ttl_secs);

        Self {
            companies: Arc::new(CompanyService::new(db.clone(), clock.clone())),
            media: Arc::new(MediaService::new(
                db.clone(),
                storage.clone(),
                clock.clone(),
                upload_url_ttl,
            )),
            ads: Arc::new(AdService::new(db.clone(), clock.clone())),
            ad_stats: Arc::new(AdStatService::new(db.clone(), clock.clone())),
            dashboard: Arc::new(DashboardService::new(db.clone(), clock)),
            db,
            storage,
            config,
        }
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if allowed_origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}

pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(api::handlers::health::health_check))
        .route("/dashboard", get(api::handlers::dashboard::dashboard_summary))
        .route(
            "/companies",
            get(api::handlers::companies::list_companies)
                .post(api::handlers::companies::create_company),
        )
        .route(
            "/companies/:id",
            get(api::handlers::companies::get_company)
                .put(api::handlers::companies::update_company)
                .delete(api::handlers::companies::delete_company),
        )
        .route(
            "/media",
            get(api::handlers::media::list_media).post(api::handlers::media::create_media),
        )
        .route("/media/stats", get(api::handlers::media::media_stats))
        .route(
            "/media/upload-url",
            post(api::handlers::media::create_upload_url),
        )
        .route(
            "/media/:id",
            get(api::handlers::media::get_media)
                .put(api::handlers::media::update_media)
                .delete(api::handlers::media::delete_media),
        )
        .route(
            "/media/:id/company",
            put(api::handlers::media::assign_media_to_company)
                .delete(api::handlers::media::remove_media_from_company),
        )
        .route(
            "/ads",
            get(api::handlers::ads::list_ads).post(api::handlers::ads::create_ad),
        )
        .route(
            "/ads/:id",
            get(api::handlers::ads::get_ad)
                .put(api::handlers::ads::update_ad)
                .delete(api::handlers::ads::delete_ad),
        )
        .route("/ads/:id/stats", get(api::handlers::ads::list_ad_stats))
        .route(
            "/ads/:id/stats/totals",
            get(api::handlers::ads::ad_stat_totals),
        )
        .route("/ad-stats", post(api::handlers::ad_stats::create_ad_stat))
        .route(
            "/ad-stats/:id",
            get(api::handlers::ad_stats::get_ad_stat)
                .put(api::handlers::ad_stats::update_ad_stat)
                .delete(api::handlers::ad_stats::delete_ad_stat),
        )
        .layer(from_fn(api::middleware::metrics::metrics_middleware))
        .layer(from_fn(api::middleware::request_id::request_id_middleware))
        .layer(cors)
        .with_state(state)
}
