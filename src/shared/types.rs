use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::shared::constants::{DEFAULT_LIMIT, MAX_LIMIT};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<Meta>,
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Limit/offset pagination used by the debug list endpoints.
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
pub struct LimitOffsetQuery {
    /// Number of rows to return (1-100, default: 10)
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    #[param(minimum = 1, maximum = 100)]
    pub limit: i64,

    /// Number of rows to skip (default: 0)
    #[serde(default)]
    #[validate(range(min = 0))]
    #[param(minimum = 0)]
    pub offset: i64,
}

pub(crate) fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl Default for LimitOffsetQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl LimitOffsetQuery {
    /// Clamped limit, even when validation was skipped
    pub fn limit(&self) -> i64 {
        self.limit.clamp(1, MAX_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        self.offset.max(0)
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            errors: None,
        }
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_offset_defaults() {
        let query: LimitOffsetQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.limit, 10);
        assert_eq!(query.offset, 0);
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_limit_offset_rejects_out_of_range() {
        let too_big = LimitOffsetQuery {
            limit: 101,
            offset: 0,
        };
        assert!(too_big.validate().is_err());
        assert_eq!(too_big.limit(), 100);

        let negative = LimitOffsetQuery {
            limit: 10,
            offset: -1,
        };
        assert!(negative.validate().is_err());
        assert_eq!(negative.offset(), 0);
    }
}
