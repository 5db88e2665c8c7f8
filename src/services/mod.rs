// Service exports
pub mod genai;
pub mod requirements;

pub use genai::{build_prompt, GenAiClient, GenAiError};
pub use requirements::{RequirementStore, StoreError};
