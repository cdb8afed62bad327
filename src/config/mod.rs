use anyhow::{Context, Result};
use std::env;

/// Object storage settings for the Cloudflare R2 bucket that holds media uploads.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Cloudflare account id, used to derive the R2 endpoint
    pub account_id: String,

    pub access_key_id: String,

    pub secret_access_key: String,

    pub bucket: String,

    /// Explicit S3 endpoint (e.g. a local MinIO). Defaults to the account's R2 endpoint.
    pub endpoint: Option<String>,

    /// Base for public object URLs (default: "https://<bucket>.r2.dev")
    pub public_base_url: Option<String>,

    /// Lifetime of signed upload URLs in seconds (default: 3600)
    pub upload_url_ttl_secs: u64,
}

impl StorageConfig {
    pub fn endpoint_url(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| format!("https://{}.r2.cloudflarestorage.com", self.account_id))
    }

    pub fn public_base(&self) -> String {
        self.public_base_url
            .clone()
            .map(|base| base.trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("https://{}.r2.dev", self.bucket))
    }

    fn from_env() -> Result<Self> {
        Ok(Self {
            account_id: env::var("R2_ACCOUNT_ID").context("R2_ACCOUNT_ID must be set")?,
            access_key_id: env::var("R2_ACCESS_KEY_ID").context("R2_ACCESS_KEY_ID must be set")?,
            secret_access_key: env::var("R2_SECRET_ACCESS_KEY")
                .context("R2_SECRET_ACCESS_KEY must be set")?,
            bucket: env::var("R2_BUCKET").context("R2_BUCKET must be set")?,
            endpoint: optional_url("R2_ENDPOINT")?,
            public_base_url: optional_url("R2_PUBLIC_BASE_URL")?,
            upload_url_ttl_secs: env::var("UPLOAD_URL_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_UPLOAD_URL_TTL_SECS),
        })
    }
}

/// Reads an optional absolute URL, rejecting values that would produce broken links.
fn optional_url(var: &str) -> Result<Option<String>> {
    match env::var(var).ok().filter(|v| !v.trim().is_empty()) {
        Some(value) => {
            check_absolute_url(&value).with_context(|| format!("{} is not a valid URL", var))?;
            Ok(Some(value.trim().to_string()))
        }
        None => Ok(None),
    }
}

fn check_absolute_url(value: &str) -> Result<()> {
    let parsed = url::Url::parse(value.trim())?;
    if !matches!(parsed.scheme(), "http" | "https") {
        anyhow::bail!("unsupported scheme '{}'", parsed.scheme());
    }
    Ok(())
}

pub const DEFAULT_UPLOAD_URL_TTL_SECS: u64 = 3600;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database connection string (default: "sqlite://dashboard.db?mode=rwc")
    pub database_url: String,

    /// Maximum pooled database connections (default: 20)
    pub db_max_connections: u32,

    /// Allowed CORS Origins (comma separated)
    pub allowed_origins: Vec<String>,

    pub storage: StorageConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://dashboard.db?mode=rwc".to_string(),
            db_max_connections: 20,
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
            storage: StorageConfig {
                account_id: String::new(),
                access_key_id: String::new(),
                secret_access_key: String::new(),
                bucket: "media".to_string(),
                endpoint: None,
                public_base_url: None,
                upload_url_ttl_secs: DEFAULT_UPLOAD_URL_TTL_SECS,
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let default = Self::default();

        Ok(Self {
            database_url: env::var("DATABASE_URL").unwrap_or(default.database_url),

            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.db_max_connections),

            allowed_origins: env::var("ALLOWED_ORIGINS")
                .ok()
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(default.allowed_origins),

            storage: StorageConfig::from_env()?,
        })
    }

    /// Config for local development and tests: in-memory SQLite and a local MinIO bucket
    pub fn development() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            db_max_connections: 5,
            storage: StorageConfig {
                account_id: "local".to_string(),
                access_key_id: "minioadmin".to_string(),
                secret_access_key: "minioadmin".to_string(),
                bucket: "media".to_string(),
                endpoint: Some("http://127.0.0.1:9000".to_string()),
                public_base_url: Some("http://127.0.0.1:9000/media".to_string()),
                upload_url_ttl_secs: DEFAULT_UPLOAD_URL_TTL_SECS,
            },
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.db_max_connections, 20);
        assert_eq!(config.storage.upload_url_ttl_secs, 3600);
        assert!(!config.allowed_origins.contains(&"*".to_string()));
    }

    #[test]
    fn test_r2_endpoint_and_public_base() {
        let mut storage = AppConfig::default().storage;
        storage.account_id = "abc123".to_string();
        storage.bucket = "ads-media".to_string();
        assert_eq!(
            storage.endpoint_url(),
            "https://abc123.r2.cloudflarestorage.com"
        );
        assert_eq!(storage.public_base(), "https://ads-media.r2.dev");

        storage.public_base_url = Some("https://cdn.example.com/".to_string());
        assert_eq!(storage.public_base(), "https://cdn.example.com");
    }

    #[test]
    fn test_url_settings_must_be_http() {
        assert!(check_absolute_url("https://cdn.example.com/media").is_ok());
        assert!(check_absolute_url("http://127.0.0.1:9000").is_ok());
        assert!(check_absolute_url("cdn.example.com").is_err());
        assert!(check_absolute_url("ftp://cdn.example.com").is_err());
    }

    #[test]
    fn test_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(
            config.storage.endpoint_url(),
            "http://127.0.0.1:9000"
        );
    }
}
