use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::features::generation::services::CustomWindow;
use crate::shared::constants::DEFAULT_ACTIVITY_MINUTES;

/// Report range in unix seconds. Both bounds are needed, otherwise the last
/// 24 hours are used.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ReportWindowQuery {
    /// Start timestamp (unix seconds)
    pub start_time: Option<i64>,
    /// End timestamp (unix seconds)
    pub end_time: Option<i64>,
}

fn default_activity_minutes() -> i64 {
    DEFAULT_ACTIVITY_MINUTES
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct ActivityWindowQuery {
    /// Minutes to look back (default: 15)
    #[serde(default = "default_activity_minutes")]
    #[validate(range(min = 1, max = 10080))]
    #[param(minimum = 1, maximum = 10080)]
    pub minutes: i64,
}

#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
pub struct LookbackQuery {
    /// Minutes to look back
    #[validate(range(min = 1, max = 10080))]
    #[param(minimum = 1, maximum = 10080)]
    pub lookback_minutes: Option<i64>,
}

#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
pub struct CustomGenerateQuery {
    /// Minutes to look back (default 15; 0 selects the category default: todo 30, others 15)
    #[validate(range(min = 0, max = 10080))]
    #[param(minimum = 0, maximum = 10080)]
    pub lookback_minutes: Option<i64>,
    /// Report start timestamp (unix seconds)
    pub start_time: Option<i64>,
    /// Report end timestamp (unix seconds)
    pub end_time: Option<i64>,
}

impl From<CustomGenerateQuery> for CustomWindow {
    fn from(query: CustomGenerateQuery) -> Self {
        Self {
            lookback_minutes: query.lookback_minutes,
            start_time: query.start_time,
            end_time: query.end_time,
        }
    }
}
