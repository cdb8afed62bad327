use crate::config::StorageConfig;
use crate::services::storage::{S3StorageService, StorageService};
use aws_sdk_s3::config::Region;
use std::sync::Arc;
use tracing::info;

pub async fn setup_storage(config: &StorageConfig) -> Arc<S3StorageService> {
    let endpoint_url = config.endpoint_url();

    info!("☁️  R2 Storage: {} (Bucket: {})", endpoint_url, config.bucket);

    let aws_config = aws_config::from_env()
        .endpoint_url(&endpoint_url)
        .region(Region::new("auto"))
        .credentials_provider(aws_sdk_s3::config::Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
            None,
            "static",
        ))
        .load()
        .await;

    // R2 requires path-style addressing
    let s3_config = aws_sdk_s3::config::Builder::from(&aws_config)
        .force_path_style(true)
        .build();

    let service = S3StorageService::new(
        aws_sdk_s3::Client::from_conf(s3_config),
        config.bucket.clone(),
        config.public_base(),
    );

    match service.check_bucket().await {
        Ok(_) => info!("✅ Bucket '{}' is reachable", config.bucket),
        Err(e) => tracing::warn!(
            "⚠️  Bucket '{}' is not reachable yet, uploads will fail until it is: {}",
            config.bucket,
            e
        ),
    }

    Arc::new(service)
}
