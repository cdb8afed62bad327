use crate::api::error::AppError;
use crate::entities::{media_items, prelude::*};
use crate::models::{
    CompanyFilter, CreateMediaRequest, MediaFilter, MediaResponse, MediaStats, MediaType,
    UpdateMediaRequest, UploadUrlRequest, UploadUrlResponse,
};
use crate::services::clock::Clock;
use crate::services::ensure_company_exists;
use crate::services::storage::StorageService;
use crate::utils::validation::{required_text, sanitize_object_key};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use std::sync::Arc;
use std::time::Duration;
use validator::Validate;

pub struct MediaService {
    db: DatabaseConnection,
    storage: Arc<dyn StorageService>,
    clock: Arc<dyn Clock>,
    upload_url_ttl: Duration,
}

fn to_response(model: media_items::Model) -> Result<MediaResponse, AppError> {
    MediaResponse::try_from(model).map_err(AppError::Internal)
}

impl MediaService {
    pub fn new(
        db: DatabaseConnection,
        storage: Arc<dyn StorageService>,
        clock: Arc<dyn Clock>,
        upload_url_ttl: Duration,
    ) -> Self {
        Self {
            db,
            storage,
            clock,
            upload_url_ttl,
        }
    }

    pub async fn list(&self, filter: MediaFilter) -> Result<Vec<MediaResponse>, AppError> {
        let mut query = MediaItems::find();

        query = match filter.company {
            CompanyFilter::Any => query,
            CompanyFilter::Unassigned => query.filter(media_items::Column::CompanyId.is_null()),
            CompanyFilter::Company(id) => query.filter(media_items::Column::CompanyId.eq(id)),
        };

        if let Some(media_type) = filter.media_type {
            query = query.filter(media_items::Column::MediaType.eq(media_type.as_str()));
        }

        query
            .order_by_asc(media_items::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(to_response)
            .collect()
    }

    pub async fn get(&self, id: i32) -> Result<Option<MediaResponse>, AppError> {
        MediaItems::find_by_id(id)
            .one(&self.db)
            .await?
            .map(to_response)
            .transpose()
    }

    /// Records an item whose file is already in storage. Nothing checks that
    /// the upload at `url` actually happened.
    pub async fn create(&self, req: CreateMediaRequest) -> Result<MediaResponse, AppError> {
        req.validate()?;
        let name = required_text("name", &req.name)?;

        if let Some(company_id) = req.company_id {
            ensure_company_exists(&self.db, company_id).await?;
        }

        let item = media_items::ActiveModel {
            company_id: Set(req.company_id),
            name: Set(name),
            description: Set(req.description.trim().to_string()),
            media_type: Set(req.media_type.as_str().to_string()),
            url: Set(req.url.trim().to_string()),
            uploaded_at: Set(self.clock.now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        tracing::info!(
            "🖼️  Media item created: {} ({}, {})",
            item.name,
            item.id,
            item.media_type
        );
        to_response(item)
    }

    /// Only name and description are editable; url, type and company stay fixed.
    pub async fn update(&self, id: i32, req: UpdateMediaRequest) -> Result<MediaResponse, AppError> {
        req.validate()?;
        let name = required_text("name", &req.name)?;

        let mut active_model = self.find_model(id).await?.into_active_model();
        active_model.name = Set(name);
        active_model.description = Set(req.description.trim().to_string());

        to_response(active_model.update(&self.db).await?)
    }

    pub async fn remove(&self, id: i32) -> Result<(), AppError> {
        let res = MediaItems::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Media item {} not found", id)));
        }
        Ok(())
    }

    pub async fn assign_to_company(
        &self,
        media_id: i32,
        company_id: i32,
    ) -> Result<MediaResponse, AppError> {
        let item = self.find_model(media_id).await?;
        ensure_company_exists(&self.db, company_id).await?;

        let mut active_model = item.into_active_model();
        active_model.company_id = Set(Some(company_id));

        to_response(active_model.update(&self.db).await?)
    }

    pub async fn remove_from_company(&self, media_id: i32) -> Result<MediaResponse, AppError> {
        let mut active_model = self.find_model(media_id).await?.into_active_model();
        active_model.company_id = Set(None);

        to_response(active_model.update(&self.db).await?)
    }

    /// Counts from one pass over the collection, so the totals always agree.
    pub async fn stats(&self) -> Result<MediaStats, AppError> {
        let rows: Vec<(Option<i32>, String)> = MediaItems::find()
            .select_only()
            .column(media_items::Column::CompanyId)
            .column(media_items::Column::MediaType)
            .into_tuple()
            .all(&self.db)
            .await?;

        let mut stats = MediaStats::default();
        for (company_id, media_type) in rows {
            stats.total += 1;
            match company_id {
                Some(_) => stats.assigned += 1,
                None => stats.unassigned += 1,
            }
            match media_type.parse::<MediaType>() {
                Ok(MediaType::Image) => stats.images += 1,
                Ok(MediaType::Video) => stats.videos += 1,
                Err(e) => return Err(AppError::Internal(e)),
            }
        }

        Ok(stats)
    }

    /// Signs a one-hour (by default) `PUT` for the sanitized file name. The
    /// caller uploads directly to storage and then calls `create` with the
    /// returned public URL.
    pub async fn create_upload_url(
        &self,
        req: UploadUrlRequest,
    ) -> Result<UploadUrlResponse, AppError> {
        req.validate()?;

        let content_type = req.content_type.trim();
        let media_type = MediaType::from_mime(content_type).ok_or_else(|| {
            AppError::BadRequest(format!(
                "Unsupported content type '{}': only image/* and video/* uploads are accepted",
                content_type
            ))
        })?;

        let key = sanitize_object_key(&req.file_name);
        if key.chars().all(|c| c == '.') {
            return Err(AppError::BadRequest(format!(
                "File name '{}' has no usable characters",
                req.file_name
            )));
        }

        tracing::info!("📤 Upload URL requested for: {} ({})", key, content_type);

        let signed_url = self
            .storage
            .presign_upload(&key, content_type, self.upload_url_ttl)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to generate upload URL: {}", e)))?;

        let ttl = chrono::Duration::from_std(self.upload_url_ttl)
            .map_err(|e| AppError::Internal(format!("Invalid upload URL lifetime: {}", e)))?;

        Ok(UploadUrlResponse {
            signed_url,
            public_url: self.storage.public_url(&key),
            key,
            media_type,
            expires_at: self.clock.now() + ttl,
        })
    }

    async fn find_model(&self, id: i32) -> Result<media_items::Model, AppError> {
        MediaItems::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Media item {} not found", id)))
    }
}
