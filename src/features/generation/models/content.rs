use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Artifact produced by a generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum GeneratedContent {
    Tip {
        tip_id: i64,
    },
    Todos {
        todo_batch_id: Uuid,
    },
    Report {
        content: String,
        summary: String,
    },
    Activity {
        activity_id: i64,
        title: String,
        description: String,
    },
}

/// Character cap for report summaries
pub const SUMMARY_MAX_CHARS: usize = 200;

/// First non-empty paragraph of a report, with markdown heading markers
/// dropped and capped at [`SUMMARY_MAX_CHARS`].
pub fn summarize(content: &str) -> String {
    let paragraph = content
        .split("\n\n")
        .map(|p| p.trim().trim_start_matches('#').trim())
        .find(|p| !p.is_empty())
        .unwrap_or_default();

    if paragraph.chars().count() <= SUMMARY_MAX_CHARS {
        return paragraph.to_string();
    }

    let mut summary: String = paragraph.chars().take(SUMMARY_MAX_CHARS).collect();
    summary.push_str("...");
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_content_serializes_flat() {
        let tip = serde_json::to_value(GeneratedContent::Tip { tip_id: 7 }).unwrap();
        assert_eq!(tip, json!({"tip_id": 7}));

        let report = serde_json::to_value(GeneratedContent::Report {
            content: "c".into(),
            summary: "s".into(),
        })
        .unwrap();
        assert_eq!(report, json!({"content": "c", "summary": "s"}));
    }

    #[test]
    fn test_summarize_takes_first_paragraph() {
        let content = "## Daily report\n\nShipped the parser.\n\nMore details.";
        assert_eq!(summarize(content), "Daily report");
        assert_eq!(summarize("\n\n  Just one line  "), "Just one line");
    }

    #[test]
    fn test_summarize_caps_length() {
        let long = "x".repeat(500);
        let summary = summarize(&long);
        assert_eq!(summary.chars().count(), SUMMARY_MAX_CHARS + 3);
        assert!(summary.ends_with("..."));
    }
}
