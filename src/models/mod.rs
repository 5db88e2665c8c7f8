// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AdvisoryContext, MajorCategory, RankedMatch, RequirementSnapshot, RequirementSummary,
    ScoringWeights, StudentProfile, UniversityContext, UniversityRequirement,
};
pub use requests::{ChatMessageRequest, MatchRequest, StudentSheet};
pub use responses::{ChatFailureResponse, ChatResponse, HealthResponse, MatchResponse};
