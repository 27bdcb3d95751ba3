//! Prompt domain
//!
//! Fixed templates for the persona prefix and each role's single prompt.

mod template;

pub use template::PromptTemplate;
