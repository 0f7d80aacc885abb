use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::render::RenderError;
use crate::{output, render, AppState};

/// Response header carrying the on-disk location of the rendered quote.
pub const SAVED_PATH_HEADER: &str = "x-saved-path";

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub template_exists: bool,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "flightquote",
    responses((status = 200, body = HealthResponse))
)]
pub async fn health(State(st): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".into(),
        template_exists: st.config.template_path.exists(),
    })
}

fn render_error_response(err: RenderError) -> Response {
    match err {
        // Missing template is a deployment problem, not the caller's.
        RenderError::TemplateNotFound(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
        other => (StatusCode::BAD_REQUEST, format!("failed to render: {other}")).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/render",
    tag = "flightquote",
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Rendered flight quote", content_type = "image/png"),
        (status = 400, description = "Malformed JSON or render failure"),
        (status = 500, description = "Template asset missing")
    )
)]
pub async fn render(State(st): State<Arc<AppState>>, body: Bytes) -> Response {
    // Parse the body by hand so any malformed JSON maps to a plain 400,
    // independent of content-type negotiation.
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, format!("invalid JSON body: {e}")).into_response()
        }
    };
    let Some(payload) = payload.as_object() else {
        return (StatusCode::BAD_REQUEST, "payload must be a JSON object".to_string())
            .into_response();
    };

    let img = match render::render_image(payload, &st.config) {
        Ok(img) => img,
        Err(e) => return render_error_response(e),
    };

    let (out_path, png) = match output::save_and_bytes(&img, &st.config.output_dir) {
        Ok(out) => out,
        Err(e) => return render_error_response(e),
    };

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("image/png"));
    if let Ok(v) = HeaderValue::from_str(&out_path.to_string_lossy()) {
        headers.insert(HeaderName::from_static(SAVED_PATH_HEADER), v);
    }
    (StatusCode::OK, headers, png).into_response()
}
