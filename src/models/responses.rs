use serde::{Deserialize, Serialize};

use crate::models::domain::RankedMatch;

/// Response for the match scoring endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub rankings: Vec<RankedMatch>,
}

/// Response for one advisory chat turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub flagged: bool,
    #[serde(
        rename = "isLocalFallback",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub is_local_fallback: Option<bool>,
}

/// Body for the chat endpoint's unexpected-failure path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatFailureResponse {
    pub error: String,
    #[serde(rename = "fallbackResponse")]
    pub fallback_response: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "universitiesLoaded")]
    pub universities_loaded: usize,
}
