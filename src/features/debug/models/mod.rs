mod activity;
mod report;
mod tip;
mod todo;

pub use activity::{Activity, ActivityRow};
pub use report::Report;
pub use tip::Tip;
pub use todo::{Todo, TodoStatus};
