//! HTTP relay that adapts tutoring answers to a student's stress level.
//!
//! `POST /ask-tutor` takes `{ "message", "stress_level" }`, picks a brief or a
//! structured instruction, and forwards the question to a [`TextGenerator`].

pub mod api;
pub mod config;
pub mod provider;
pub mod tutor;

use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::CorsPolicy;
use crate::provider::TextGenerator;

#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn TextGenerator>,
}

impl AppState {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

pub fn build_app(state: AppState, cors: &CorsPolicy) -> Router {
    api::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors.layer())
}

pub async fn run_server(app: Router, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Tutor service listening");

    axum::serve(listener, app).await
}
