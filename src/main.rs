use std::{net::SocketAddr, sync::Arc};

use tracing::info;

use flightquote_backend::{config::RenderConfig, router, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("BACKEND_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);

    let config = RenderConfig::from_env();
    if !config.template_path.exists() {
        tracing::warn!(
            path = %config.template_path.display(),
            "template asset missing, /render will fail until it is provided"
        );
    }

    let state = Arc::new(AppState { config });
    let app = router(state);

    let addr: SocketAddr = format!("{host}:{port}").parse().expect("bind addr");
    info!("Starting flightquote-backend on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
