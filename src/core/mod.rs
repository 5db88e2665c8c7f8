// Core algorithm exports
pub mod advisor;
pub mod matcher;
pub mod normalizer;
pub mod scoring;

pub use advisor::{build_context, classify, respond, should_flag, Topic};
pub use matcher::Matcher;
pub use normalizer::normalize_university_name;
pub use scoring::{compose_score, gpa_factor, is_elite, language_factor, ranking_bonus};
