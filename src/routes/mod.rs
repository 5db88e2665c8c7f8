// Route exports
pub mod chatbot;
pub mod rankings;

use std::sync::Arc;

use actix_web::web;

use crate::core::Matcher;
use crate::services::{GenAiClient, RequirementStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RequirementStore>,
    pub genai: Arc<GenAiClient>,
    pub matcher: Matcher,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(rankings::configure)
            .configure(chatbot::configure),
    );
}
