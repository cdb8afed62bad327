use anyhow::Result;
use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::presigning::PresigningConfig;
use std::time::Duration;

#[async_trait]
pub trait StorageService: Send + Sync {
    /// Returns a URL that accepts a single `PUT` of `key` with the given
    /// `Content-Type` until `expires_in` has elapsed.
    async fn presign_upload(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<String>;

    /// Public read URL of an object, whether or not it has been uploaded yet.
    fn public_url(&self, key: &str) -> String;

    async fn check_bucket(&self) -> Result<()>;
}

pub struct S3StorageService {
    client: Client,
    bucket: String,
    public_base: String,
}

impl S3StorageService {
    pub fn new(client: Client, bucket: String, public_base: String) -> Self {
        Self {
            client,
            bucket,
            public_base,
        }
    }
}

#[async_trait]
impl StorageService for S3StorageService {
    async fn presign_upload(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<String> {
        let presigning = PresigningConfig::expires_in(expires_in)?;

        let res = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .presigned(presigning)
            .await;

        match res {
            Ok(req) => Ok(req.uri().to_string()),
            Err(e) => {
                tracing::error!(
                    "S3 presign put_object failed: bucket={}, key={}, error={:?}",
                    self.bucket,
                    key,
                    e
                );
                Err(e.into())
            }
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base, key)
    }

    async fn check_bucket(&self) -> Result<()> {
        self.client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await?;
        Ok(())
    }
}
