//! Prompt assembly for every generation call

pub mod template;

pub use template::PromptTemplate;
