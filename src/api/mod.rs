mod error;
mod handlers;
mod models;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

use handlers::{ask_tutor, not_found, service_info};

pub const ASK_TUTOR_PATH: &str = "/ask-tutor";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route(ASK_TUTOR_PATH, post(ask_tutor))
        .fallback(not_found)
        .with_state(state)
}
