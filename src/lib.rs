pub mod api;
pub mod config;
pub mod font;
pub mod normalize;
pub mod openapi;
pub mod output;
pub mod perf;
pub mod render;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
pub struct AppState {
    pub config: config::RenderConfig,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/openapi.json", openapi::ApiDoc::openapi()))
        .route("/health", get(api::health))
        .route("/render", post(api::render))
        .with_state(state)
}
