use super::{
    admin_login, create_artwork, delete_artwork, embedded_assets::WebAssets, get_artwork_image,
    get_like_log, get_ranking, list_artworks, reorder_artworks, reset_likes, submit_like,
    update_artwork,
};
use super::models::HealthResponse;
use super::state::GalleryState;
use axum::{
    Json, Router,
    body::Body,
    extract::DefaultBodyLimit,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Build the application router with all endpoints
pub fn build_router(state: Arc<GalleryState>) -> Router {
    Router::new()
        // Public endpoints
        .route("/api/health", get(get_health))
        .route("/api/artworks", get(list_artworks).post(create_artwork))
        .route("/api/artworks/order", put(reorder_artworks))
        .route(
            "/api/artworks/{id}",
            put(update_artwork).delete(delete_artwork),
        )
        .route("/api/artworks/{id}/image", get(get_artwork_image))
        .route(
            "/api/likes",
            post(submit_like).get(get_like_log).delete(reset_likes),
        )
        .route("/api/ranking", get(get_ranking))
        // Admin login
        .route("/api/admin/login", post(admin_login))
        // Add state
        .with_state(state)
        // Add CORS support and body size limit
        .layer(
            ServiceBuilder::new()
                .layer(DefaultBodyLimit::max(10 * 1024 * 1024)) // 10MB limit
                .layer(CorsLayer::permissive()),
        )
        // Serve embedded static files as fallback
        .fallback(static_handler)
}

pub async fn create_server(
    host: String,
    port: u16,
    state: Arc<GalleryState>,
) -> anyhow::Result<()> {
    info!("Starting exhibition gallery web server...");

    // Parse socket address
    let addr: SocketAddr = format!("{host}:{port}").parse()?;

    let app = build_router(state);

    // Create TCP listener
    let listener = TcpListener::bind(&addr).await?;

    println!("🌐 Web server started successfully!");
    println!("   URL: http://{addr}");
    println!("   Press Ctrl+C to stop");

    // Run the server
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}

/// Liveness endpoint with build information
async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        built_at: env!("BUILD_TIMESTAMP").to_string(),
    })
}

/// 埋め込まれた静的ファイルを提供するハンドラ
async fn static_handler(uri: Uri) -> impl IntoResponse {
    let path = uri.path().trim_start_matches('/');

    // ルートパスの場合はindex.htmlを提供
    let path = if path.is_empty() || path == "/" {
        "index.html"
    } else {
        path
    };

    // ファイルを取得
    match WebAssets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();

            Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, mime.as_ref())
                .body(Body::from(content.data.to_vec()))
                .unwrap()
        }
        None => {
            // ファイルが見つからない場合はindex.htmlを返す（SPAのため）
            if let Some(content) = WebAssets::get("index.html") {
                Response::builder()
                    .status(StatusCode::OK)
                    .header(header::CONTENT_TYPE, "text/html")
                    .body(Body::from(content.data.to_vec()))
                    .unwrap()
            } else {
                Response::builder()
                    .status(StatusCode::NOT_FOUND)
                    .body(Body::from("404 Not Found"))
                    .unwrap()
            }
        }
    }
}
