use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::advisor;
use crate::models::{ChatFailureResponse, ChatMessageRequest, ChatResponse};
use crate::routes::AppState;
use crate::services::genai;

/// Apology returned whenever a chat request cannot be processed.
const FALLBACK_APOLOGY: &str = "I'm having trouble processing your request. Please try again \
                                or contact the exchange office for assistance.";

/// Configure chatbot routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/chatbot/message", web::post().to(chat_message));
}

/// Advisory chat endpoint
///
/// POST /api/chatbot/message
///
/// Request body:
/// ```json
/// {
///   "message": "What are the requirements for Stanford University?",
///   "studentProfile": { "GPA": "3.6", "IELTS": "7.0", "Major": "Engineering", "Year": "3" }
/// }
/// ```
async fn chat_message(
    state: web::Data<AppState>,
    req: web::Json<ChatMessageRequest>,
) -> impl Responder {
    if req.validate().is_err() {
        tracing::info!("Rejecting chat request with empty message");
        return HttpResponse::BadRequest().json(ChatFailureResponse {
            error: "Message is required".to_string(),
            fallback_response: FALLBACK_APOLOGY.to_string(),
        });
    }

    // Resolve requirement context directly from the store; the structured
    // context feeds both the generation prompt and the local fallback.
    let context = advisor::build_context(&req.message, &state.store);
    let prompt = genai::build_prompt(&req.message, req.student_profile.as_ref(), &context);

    match state.genai.generate(&prompt).await {
        Ok(generated) => {
            let flagged = advisor::should_flag(&req.message, &generated);

            tracing::debug!("Generated answer (flagged: {})", flagged);

            HttpResponse::Ok().json(ChatResponse {
                response: generated,
                flagged,
                is_local_fallback: None,
            })
        }
        Err(e) => {
            // Single attempt only: any upstream failure drops to the local
            // template path and is reported as a fallback, never an error
            tracing::warn!("Text generation failed, using local fallback: {}", e);

            let local = advisor::respond(&req.message, req.student_profile.as_ref(), &context);
            let flagged = advisor::should_flag(&req.message, &local);

            HttpResponse::Ok().json(ChatResponse {
                response: local,
                flagged,
                is_local_fallback: Some(true),
            })
        }
    }
}
