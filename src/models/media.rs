use crate::entities::media_items;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
        }
    }

    /// Maps a MIME type such as `image/png` to its media type.
    pub fn from_mime(content_type: &str) -> Option<Self> {
        let essence = content_type.split(';').next()?.trim();
        let (top, sub) = essence.split_once('/')?;
        if sub.is_empty() || sub.contains('/') {
            return None;
        }
        match top.to_ascii_lowercase().as_str() {
            "image" => Some(MediaType::Image),
            "video" => Some(MediaType::Video),
            _ => None,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(MediaType::Image),
            "video" => Ok(MediaType::Video),
            other => Err(format!("Unknown media type: {}", other)),
        }
    }
}

/// Which company association a media listing selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompanyFilter {
    #[default]
    Any,
    /// Items with no owning company
    Unassigned,
    Company(i32),
}

impl FromStr for CompanyFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Ok(CompanyFilter::Any),
            "unassigned" => Ok(CompanyFilter::Unassigned),
            other => other
                .parse::<i32>()
                .map(CompanyFilter::Company)
                .map_err(|_| format!("Invalid company filter: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MediaFilter {
    pub company: CompanyFilter,
    pub media_type: Option<MediaType>,
}

/// Query string for `GET /media`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListMediaQuery {
    /// Company id, or `unassigned` for items without a company
    pub company: Option<String>,
    #[serde(rename = "type")]
    pub media_type: Option<MediaType>,
}

impl ListMediaQuery {
    pub fn into_filter(self) -> Result<MediaFilter, String> {
        let company = match self.company {
            Some(raw) => raw.parse()?,
            None => CompanyFilter::Any,
        };
        Ok(MediaFilter {
            company,
            media_type: self.media_type,
        })
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct CreateMediaRequest {
    pub company_id: Option<i32>,
    #[validate(length(min = 1, max = 255, message = "Media name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 4000))]
    pub description: String,
    pub media_type: MediaType,
    #[validate(url(message = "Media url must be an absolute URL"))]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct UpdateMediaRequest {
    #[validate(length(min = 1, max = 255, message = "Media name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 4000))]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AssignCompanyRequest {
    pub company_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MediaResponse {
    pub id: i32,
    pub company_id: Option<i32>,
    pub name: String,
    pub description: String,
    pub media_type: MediaType,
    pub url: String,
    pub uploaded_at: DateTime<Utc>,
}

impl TryFrom<media_items::Model> for MediaResponse {
    type Error = String;

    fn try_from(model: media_items::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            media_type: model.media_type.parse()?,
            id: model.id,
            company_id: model.company_id,
            name: model.name,
            description: model.description,
            url: model.url,
            uploaded_at: model.uploaded_at,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct MediaStats {
    pub total: u64,
    pub unassigned: u64,
    pub assigned: u64,
    pub images: u64,
    pub videos: u64,
}

#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct UploadUrlRequest {
    #[validate(length(min = 1, max = 1024, message = "File name is required"))]
    pub file_name: String,
    #[validate(length(min = 3, max = 255, message = "Content type is required"))]
    pub content_type: String,
}

/// Signed write URL plus the public read URL the object will have once uploaded.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadUrlResponse {
    pub signed_url: String,
    pub public_url: String,
    pub key: String,
    pub media_type: MediaType,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_filter_parsing() {
        assert_eq!("unassigned".parse::<CompanyFilter>(), Ok(CompanyFilter::Unassigned));
        assert_eq!("42".parse::<CompanyFilter>(), Ok(CompanyFilter::Company(42)));
        assert_eq!("".parse::<CompanyFilter>(), Ok(CompanyFilter::Any));
        assert!("acme".parse::<CompanyFilter>().is_err());
    }

    #[test]
    fn test_media_type_from_mime() {
        assert_eq!(MediaType::from_mime("image/png"), Some(MediaType::Image));
        assert_eq!(
            MediaType::from_mime("video/mp4; codecs=avc1"),
            Some(MediaType::Video)
        );
        assert_eq!(MediaType::from_mime("IMAGE/JPEG"), Some(MediaType::Image));
        assert_eq!(MediaType::from_mime("application/pdf"), None);
        assert_eq!(MediaType::from_mime("image/"), None);
        assert_eq!(MediaType::from_mime("image"), None);
    }

    #[test]
    fn test_list_query_into_filter() {
        let query = ListMediaQuery {
            company: Some("unassigned".to_string()),
            media_type: Some(MediaType::Video),
        };
        let filter = query.into_filter().unwrap();
        assert_eq!(filter.company, CompanyFilter::Unassigned);
        assert_eq!(filter.media_type, Some(MediaType::Video));
    }
}
