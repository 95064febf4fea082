use lazy_static::lazy_static;
use regex::Regex;

use super::LlmResponse;

lazy_static! {
    /// `,` directly before a closing `}` or `]`
    static ref TRAILING_COMMA_RE: Regex = Regex::new(r",(\s*[}\]])").unwrap();

    /// `"a" + "b"` style concatenation
    static ref STRING_CONCAT_RE: Regex = Regex::new(r#""\s*\+\s*""#).unwrap();

    /// Opening fence with optional language tag, and the closing fence
    static ref CODE_FENCE_RE: Regex = Regex::new(r"(?s)```[A-Za-z0-9_-]*\s*\n?(.*?)```").unwrap();
}

/// Unwrap a reply that is entirely one fenced block; anything else is just
/// trimmed. Used for plain-text outputs such as reports and tips.
pub fn strip_code_fences(text: &str) -> String {
    let trimmed = text.trim();
    if !(trimmed.starts_with("```") && trimmed.ends_with("```")) {
        return trimmed.to_string();
    }
    CODE_FENCE_RE
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|body| body.as_str().trim().to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

/// Locate the JSON payload in a model reply.
///
/// Fenced blocks win. Otherwise the slice from the first `{` or `[` to the
/// matching last closer is taken.
pub fn extract_json(text: &str) -> Result<String, String> {
    if let Some(body) = CODE_FENCE_RE.captures(text).and_then(|caps| caps.get(1)) {
        let body = body.as_str().trim();
        if body.starts_with('{') || body.starts_with('[') {
            return Ok(body.to_string());
        }
    }

    let trimmed = text.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return Ok(trimmed.to_string());
    }

    let start = text
        .find(['{', '['])
        .ok_or_else(|| "No JSON found in response".to_string())?;
    let closer = if text[start..].starts_with('{') { '}' } else { ']' };
    let end = text
        .rfind(closer)
        .filter(|end| *end > start)
        .ok_or_else(|| "Unterminated JSON in response".to_string())?;

    Ok(text[start..=end].to_string())
}

pub fn fix_trailing_commas(json_str: &str) -> String {
    TRAILING_COMMA_RE.replace_all(json_str, "$1").to_string()
}

pub fn fix_string_concatenation(json_str: &str) -> String {
    STRING_CONCAT_RE.replace_all(json_str, "").to_string()
}

fn repair(json_str: &str) -> Option<String> {
    let options = llm_json::RepairOptions::default();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        llm_json::repair_json(json_str, &options)
    }));

    match result {
        Ok(Ok(repaired)) => Some(repaired),
        Ok(Err(e)) => {
            tracing::debug!("JSON repair failed: {:?}", e);
            None
        }
        Err(_) => {
            tracing::warn!("JSON repair panicked");
            None
        }
    }
}

/// Parse model output as `T`, trying progressively more lenient inputs:
/// the extracted payload, then with regex fixes, then `llm_json` repair.
pub fn parse_lenient<T: LlmResponse>(text: &str) -> Result<T, String> {
    let json_str = extract_json(text)?;

    let candidates = [
        Some(json_str.clone()),
        Some(fix_trailing_commas(&fix_string_concatenation(&json_str))),
    ];
    for candidate in candidates.into_iter().flatten() {
        if let Ok(parsed) = serde_json::from_str::<T>(&candidate) {
            return Ok(parsed);
        }
    }

    if let Some(repaired) = repair(&json_str) {
        match serde_json::from_str::<T>(&repaired) {
            Ok(parsed) => {
                tracing::debug!("Model output parsed after repair");
                return Ok(parsed);
            }
            Err(e) => tracing::debug!("Repaired JSON still invalid: {}", e),
        }
    }

    Err(format!(
        "Unparseable model output: {}",
        json_str.chars().take(200).collect::<String>()
    ))
}

/// Parse model output, returning a marked default when nothing works.
pub fn parse_with_fallback<T: LlmResponse>(text: &str) -> T {
    parse_lenient(text).unwrap_or_else(|error| {
        tracing::warn!("Model output parsing failed, using fallback: {}", error);
        let mut fallback = T::default();
        fallback.mark_as_fallback(error);
        fallback
    })
}
