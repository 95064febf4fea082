use serde::Serialize;
use utoipa::ToSchema;

/// Rows removed by a clear action
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ClearDataDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contexts_deleted: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activities_deleted: Option<u64>,
}

impl ClearDataDto {
    pub fn message(&self) -> String {
        let contexts = self
            .contexts_deleted
            .map(|n| format!("Deleted {} processed contexts", n));
        let activities = self
            .activities_deleted
            .map(|n| format!("Deleted {} activities", n));

        match (contexts, activities) {
            (Some(c), Some(a)) => format!("contexts: {}; activities: {}", c, a),
            (Some(c), None) => c,
            (None, Some(a)) => a,
            (None, None) => "Nothing cleared".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_all_message() {
        let cleared = ClearDataDto {
            contexts_deleted: Some(3),
            activities_deleted: Some(0),
        };
        assert_eq!(
            cleared.message(),
            "contexts: Deleted 3 processed contexts; activities: Deleted 0 activities"
        );
    }

    #[test]
    fn test_single_table_message() {
        let cleared = ClearDataDto {
            activities_deleted: Some(2),
            ..Default::default()
        };
        assert_eq!(cleared.message(), "Deleted 2 activities");
        assert_eq!(
            serde_json::to_value(&cleared).unwrap(),
            serde_json::json!({"activities_deleted": 2})
        );
    }
}
