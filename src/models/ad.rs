use crate::entities::ads;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Campaign status derived from the date window at read time. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AdStatus {
    Active,
    Completed,
    Upcoming,
}

impl AdStatus {
    /// Classifies `now` against `[start, end]`. Both boundaries count as active.
    /// Requires `start <= end`, which writes enforce.
    pub fn classify(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if end < now {
            AdStatus::Completed
        } else if start > now {
            AdStatus::Upcoming
        } else {
            AdStatus::Active
        }
    }
}

/// Parses an RFC 3339 timestamp, or a bare `YYYY-MM-DD` date taken as midnight UTC.
pub fn parse_iso_instant(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Window of an ad whose stored dates both parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl AdWindow {
    pub fn parse(start_date: &str, end_date: &str) -> Result<Self, String> {
        let start = parse_iso_instant(start_date)
            .ok_or_else(|| format!("Invalid start_date: {}", start_date))?;
        let end = parse_iso_instant(end_date)
            .ok_or_else(|| format!("Invalid end_date: {}", end_date))?;
        if start > end {
            return Err("start_date must not be after end_date".to_string());
        }
        Ok(Self { start, end })
    }

    pub fn status_at(&self, now: DateTime<Utc>) -> AdStatus {
        AdStatus::classify(self.start, self.end, now)
    }
}

/// Full field set for creating or replacing an ad.
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct AdInput {
    #[validate(length(min = 1, max = 255, message = "Ad name is required"))]
    pub name: String,
    pub company_id: i32,
    /// Defaults to `[company_id]` when empty
    #[serde(default)]
    pub assigned_to_company_ids: Vec<i32>,
    pub start_date: String,
    pub end_date: String,
    pub budget: f64,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListAdsQuery {
    pub company_id: Option<i32>,
    pub status: Option<AdStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AdResponse {
    pub id: i32,
    pub name: String,
    pub company_id: i32,
    pub assigned_to_company_ids: Vec<i32>,
    pub start_date: String,
    pub end_date: String,
    pub budget: f64,
    pub status: AdStatus,
    pub created_at: DateTime<Utc>,
}

impl AdResponse {
    pub fn from_model(model: ads::Model, now: DateTime<Utc>) -> Result<Self, String> {
        let window = AdWindow::parse(&model.start_date, &model.end_date)?;
        let assigned_to_company_ids: Vec<i32> =
            serde_json::from_value(model.assigned_to_company_ids)
                .map_err(|e| format!("Corrupt assigned_to_company_ids on ad {}: {}", model.id, e))?;

        Ok(Self {
            id: model.id,
            name: model.name,
            company_id: model.company_id,
            assigned_to_company_ids,
            start_date: model.start_date,
            end_date: model.end_date,
            budget: model.budget,
            status: window.status_at(now),
            created_at: model.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_iso_instant() {
        assert_eq!(parse_iso_instant("2024-03-01"), Some(at(2024, 3, 1, 0)));
        assert_eq!(
            parse_iso_instant("2024-03-01T12:00:00.000Z"),
            Some(at(2024, 3, 1, 12))
        );
        assert_eq!(
            parse_iso_instant("2024-03-01T14:00:00+02:00"),
            Some(at(2024, 3, 1, 12))
        );
        assert_eq!(parse_iso_instant("03/01/2024"), None);
        assert_eq!(parse_iso_instant("2024-02-30"), None);
    }

    #[test]
    fn test_boundaries_count_as_active() {
        let start = at(2024, 1, 1, 0);
        let end = at(2024, 1, 31, 0);
        assert_eq!(AdStatus::classify(start, end, start), AdStatus::Active);
        assert_eq!(AdStatus::classify(start, end, end), AdStatus::Active);
        assert_eq!(
            AdStatus::classify(start, end, start - Duration::milliseconds(1)),
            AdStatus::Upcoming
        );
        assert_eq!(
            AdStatus::classify(start, end, end + Duration::milliseconds(1)),
            AdStatus::Completed
        );
    }

    #[test]
    fn test_status_partitions_time() {
        let start = at(2024, 5, 10, 0);
        let end = at(2024, 5, 20, 0);
        let mut now = at(2024, 5, 1, 0);
        while now <= at(2024, 6, 1, 0) {
            let status = AdStatus::classify(start, end, now);
            let active = start <= now && now <= end;
            let completed = end < now;
            let upcoming = start > now;
            assert_eq!(
                [active, completed, upcoming].iter().filter(|b| **b).count(),
                1
            );
            let expected = if active {
                AdStatus::Active
            } else if completed {
                AdStatus::Completed
            } else {
                AdStatus::Upcoming
            };
            assert_eq!(status, expected);
            now += Duration::hours(7);
        }
    }

    #[test]
    fn test_single_instant_window() {
        let day = at(2024, 1, 1, 0);
        assert_eq!(AdStatus::classify(day, day, day), AdStatus::Active);
    }

    #[test]
    fn test_window_rejects_inverted_and_invalid_dates() {
        assert!(AdWindow::parse("2024-02-01", "2024-01-01").is_err());
        assert!(AdWindow::parse("yesterday", "2024-01-01").is_err());
        assert!(AdWindow::parse("2024-01-01", "2024-01-01").is_ok());
    }
}
