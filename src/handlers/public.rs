use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};

use crate::app::AppState;

/// 1x1 32-bit icon: ICONDIR, one ICONDIRENTRY, BITMAPINFOHEADER, pixel, AND mask.
static FAVICON_ICO: [u8; 70] = [
    0x00, 0x00, 0x01, 0x00, 0x01, 0x00, // ICONDIR
    0x01, 0x01, 0x00, 0x00, 0x01, 0x00, 0x20, 0x00, 0x30, 0x00, 0x00, 0x00, 0x16, 0x00, 0x00, 0x00,
    0x28, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x01, 0x00, 0x20, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x9c, 0x5a, 0x2e, 0xff, // BGRA
    0x00, 0x00, 0x00, 0x00, // AND mask, one padded row
];

/// GET / - Service status document
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Users API (Rust)",
        "version": version,
        "status": "running",
        "endpoints": {
            "home": "/ (public)",
            "health": "/health (public)",
            "users": "/users, /users/:id (protected - Authorization: Bearer <token>)",
        }
    }))
}

/// GET /favicon.ico
pub async fn favicon() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/x-icon")], &FAVICON_ICO[..])
}

/// GET /health - Liveness plus a store round-trip
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                })),
            )
        }
    }
}
