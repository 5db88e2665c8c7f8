use actix_web::{web, HttpResponse, Responder};

use crate::models::{HealthResponse, MatchRequest, MatchResponse};
use crate::routes::AppState;

/// Configure ranking-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/universities", web::get().to(list_universities))
        .route("/match", web::post().to(match_universities));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    // An empty requirement table means every lookup falls back to defaults
    let status = if state.store.is_empty() {
        "degraded"
    } else {
        "healthy"
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        universities_loaded: state.store.len(),
    })
}

/// University list endpoint
///
/// GET /api/universities
///
/// Returns the names of all universities with loaded requirements, for
/// client-side choice pickers.
async fn list_universities(state: web::Data<AppState>) -> impl Responder {
    let universities: Vec<&str> = state
        .store
        .iter()
        .map(|requirement| requirement.name.as_str())
        .collect();

    HttpResponse::Ok().json(serde_json::json!({ "universities": universities }))
}

/// Match scoring endpoint
///
/// POST /api/match
///
/// Request body:
/// ```json
/// {
///   "student": {
///     "GPA": "3.8",
///     "IELTS": "7.5",
///     "Major": "Engineering",
///     "Top 10": "MIT, Stanford University, University of Oxford"
///   }
/// }
/// ```
async fn match_universities(
    state: web::Data<AppState>,
    req: web::Json<MatchRequest>,
) -> impl Responder {
    let student = req.student.to_profile();

    tracing::info!(
        "Processing match request for {} ranked choices",
        student.ranked_choices.len()
    );

    let rankings = state.matcher.rank(&student, &state.store);

    tracing::debug!("Returning {} rankings", rankings.len());

    HttpResponse::Ok().json(MatchResponse { rankings })
}
