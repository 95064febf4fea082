/// Default number of rows returned by debug list endpoints
pub const DEFAULT_LIMIT: i64 = 10;

/// Maximum number of rows a debug list endpoint may return
pub const MAX_LIMIT: i64 = 100;

// =============================================================================
// GENERATION WINDOWS
// =============================================================================

/// Default report window when no explicit range is given (24 hours)
pub const DEFAULT_REPORT_WINDOW_SECS: i64 = 24 * 60 * 60;

/// Default lookback for manual activity generation
pub const DEFAULT_ACTIVITY_MINUTES: i64 = 15;

/// Default lookback for manual tip generation
pub const DEFAULT_TIPS_LOOKBACK_MINUTES: i64 = 60;

/// Default lookback for manual todo generation
pub const DEFAULT_TODOS_LOOKBACK_MINUTES: i64 = 30;

/// Default lookback for generation with custom prompts (tips, activity)
pub const DEFAULT_CUSTOM_LOOKBACK_MINUTES: i64 = 15;

/// Reports shorter than this are treated as empty on the custom-prompt path
pub const MIN_CUSTOM_REPORT_CHARS: usize = 50;
