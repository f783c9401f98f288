pub mod booking_routes;
pub mod checkpoint_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use crate::state::AppState;

/// Router completo del checkpoint
pub fn create_app(state: AppState) -> Router {
    let cors = if state.config.is_development() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(state.config.cors_origins.clone())
    };

    Router::new()
        .route("/health", get(health))
        .nest("/api/checkpoint", checkpoint_routes::create_checkpoint_router())
        .nest("/api/bookings", booking_routes::create_booking_router())
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors))
        .with_state(state)
}

/// Endpoint de prueba simple
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "service": "mall-parking-checkpoint",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
