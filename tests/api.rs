use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use image::{Rgb, RgbImage};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use flightquote_backend::{api::SAVED_PATH_HEADER, config::RenderConfig, router, AppState};

fn app(dir: &TempDir, with_template: bool) -> Router {
    let config = RenderConfig::with_assets_dir(dir.path().to_path_buf());
    if with_template {
        RgbImage::from_pixel(1400, 1000, Rgb([255, 255, 255]))
            .save(&config.template_path)
            .unwrap();
    }
    router(Arc::new(AppState { config }))
}

async fn post_render(app: Router, body: impl Into<String>) -> axum::response::Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri("/render")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.into()))
            .unwrap(),
    )
    .await
    .unwrap()
}

fn quote_payload() -> String {
    json!({
        "companhia": "Azul",
        "classe de passagem": "Executiva",
        "procedencia": "GRU",
        "destino": "JFK",
        "data": "2024-05-01",
        "horario da decolagem da procedencia": "08:00",
        "horario do pouso": "18:00",
        "tempo do voo": "10h",
        "tipo de voo": "Direto"
    })
    .to_string()
}

fn output_files(dir: &TempDir) -> Vec<std::path::PathBuf> {
    let outputs = dir.path().join("outputs");
    if !outputs.exists() {
        return Vec::new();
    }
    std::fs::read_dir(outputs)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect()
}

#[tokio::test]
async fn health_reports_template_presence() {
    for with_template in [false, true] {
        let dir = TempDir::new().unwrap();
        let res = app(&dir, with_template)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let body: Value =
            serde_json::from_slice(&to_bytes(res.into_body(), usize::MAX).await.unwrap()).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["template_exists"], json!(with_template));
    }
}

#[tokio::test]
async fn render_returns_png_and_saves_a_copy() {
    let dir = TempDir::new().unwrap();
    let res = post_render(app(&dir, true), quote_payload()).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()[header::CONTENT_TYPE].to_str().unwrap(),
        "image/png"
    );

    let saved_path = res.headers()[SAVED_PATH_HEADER]
        .to_str()
        .unwrap()
        .to_string();
    let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    assert!(!body.is_empty());

    // Streamed bytes decode and match the persisted file exactly.
    image::load_from_memory(&body).unwrap();
    assert_eq!(std::fs::read(&saved_path).unwrap(), body.to_vec());
}

#[tokio::test]
async fn repeated_renders_write_distinct_files() {
    let dir = TempDir::new().unwrap();
    let service = app(&dir, true);

    let a = post_render(service.clone(), quote_payload()).await;
    let b = post_render(service, quote_payload()).await;
    assert_eq!(a.status(), StatusCode::OK);
    assert_eq!(b.status(), StatusCode::OK);

    let path_a = a.headers()[SAVED_PATH_HEADER].to_str().unwrap().to_string();
    let path_b = b.headers()[SAVED_PATH_HEADER].to_str().unwrap().to_string();
    assert_ne!(path_a, path_b);

    let files = output_files(&dir);
    assert_eq!(files.len(), 2);
    for f in files {
        image::open(f).unwrap();
    }
}

#[tokio::test]
async fn malformed_json_is_a_client_error_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let res = post_render(app(&dir, true), "{not json").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let msg = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&msg).contains("invalid JSON body"));
    assert!(output_files(&dir).is_empty());
}

#[tokio::test]
async fn non_object_payload_is_rejected() {
    let dir = TempDir::new().unwrap();
    let res = post_render(app(&dir, true), "[1, 2, 3]").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(output_files(&dir).is_empty());
}

#[tokio::test]
async fn missing_template_is_a_server_error_naming_the_path() {
    let dir = TempDir::new().unwrap();
    let res = post_render(app(&dir, false), quote_payload()).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let msg = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let msg = String::from_utf8_lossy(&msg);
    assert!(msg.contains("template not found"));
    assert!(msg.contains("template.png"));
    assert!(output_files(&dir).is_empty());
}

#[tokio::test]
async fn unknown_keys_are_ignored() {
    let dir = TempDir::new().unwrap();
    let body = json!({"companhia": "Azul", "totally_unknown": 42}).to_string();
    let res = post_render(app(&dir, true), body).await;
    assert_eq!(res.status(), StatusCode::OK);
}
