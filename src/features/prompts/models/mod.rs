pub mod category;
pub mod definition;

pub use category::PromptCategory;
pub use definition::PromptDefinition;
