//! Exchange Algo - matching and advisory service for the student exchange
//! platform.
//!
//! This library scores a student's ranked university choices against an
//! in-memory requirement table and answers advisory questions with a
//! keyword-dispatched responder, optionally fronted by an external
//! text-generation service.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{normalize_university_name, Matcher};
pub use crate::models::{
    MatchRequest, MatchResponse, RankedMatch, ScoringWeights, StudentProfile, StudentSheet,
    UniversityRequirement,
};
pub use crate::services::{GenAiClient, RequirementStore};
