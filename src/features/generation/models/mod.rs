mod content;
mod context_record;
mod window;

pub use content::{summarize, GeneratedContent};
pub use context_record::ContextRecord;
pub use window::TimeWindow;
