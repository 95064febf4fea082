use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::core::error::AppError;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ReportFilterQuery {
    /// List soft-deleted reports instead of live ones (default: false)
    #[serde(default)]
    pub is_deleted: bool,
}

#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
pub struct TodoFilterQuery {
    /// 0 = incomplete, 1 = complete; omit for all
    #[validate(range(min = 0, max = 1))]
    #[param(minimum = 0, maximum = 1)]
    pub status: Option<i16>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ActivityFilterQuery {
    /// Earliest start time (ISO 8601)
    pub start_time: Option<String>,
    /// Latest end time (ISO 8601)
    pub end_time: Option<String>,
}

impl ActivityFilterQuery {
    pub fn range(&self) -> Result<(Option<DateTime<Utc>>, Option<DateTime<Utc>>), AppError> {
        let start = self.start_time.as_deref().map(parse_iso_time).transpose()?;
        let end = self.end_time.as_deref().map(parse_iso_time).transpose()?;
        Ok((start, end))
    }
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct TodoStatusQuery {
    /// 0 = incomplete, 1 = complete
    #[validate(range(min = 0, max = 1))]
    #[param(minimum = 0, maximum = 1)]
    pub status: i16,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TodoStatusResponseDto {
    pub id: i64,
    pub status: i16,
}

/// Accept RFC 3339 or a zoneless `YYYY-MM-DDTHH:MM:SS[.fff]`, read as UTC
pub fn parse_iso_time(value: &str) -> Result<DateTime<Utc>, AppError> {
    let value = value.trim();
    if let Ok(time) = DateTime::parse_from_rfc3339(value) {
        return Ok(time.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AppError::BadRequest(format!("Invalid ISO 8601 time: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_time_variants() {
        let expected = 1_700_000_000;
        let timestamp = |input| parse_iso_time(input).unwrap().timestamp();
        assert_eq!(timestamp("2023-11-14T22:13:20Z"), expected);
        assert_eq!(timestamp("2023-11-15T05:13:20+07:00"), expected);
        assert_eq!(timestamp("2023-11-14T22:13:20"), expected);
        assert_eq!(timestamp("2023-11-14 22:13:20.000"), expected);
    }

    #[test]
    fn test_parse_iso_time_rejects_garbage() {
        assert!(matches!(parse_iso_time("yesterday"), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_activity_filter_range() {
        let query = ActivityFilterQuery {
            start_time: Some("2023-11-14T22:13:20Z".into()),
            end_time: None,
        };
        let (start, end) = query.range().unwrap();
        assert!(start.is_some());
        assert!(end.is_none());
    }
}
