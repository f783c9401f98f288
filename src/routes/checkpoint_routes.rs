use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::checkpoint_controller::{CheckpointController, FrameAck};
use crate::dto::checkpoint_dto::{CheckpointView, FrameRequest, ScanRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_checkpoint_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_checkpoint))
        .route("/scan", post(scan_ticket))
        .route("/entry", post(register_entry))
        .route("/exit", post(register_exit))
        .route("/reset", post(reset_checkpoint))
        .route("/scanner/start", post(start_scanner))
        .route("/scanner/stop", post(stop_scanner))
        .route("/scanner/frame", post(push_frame))
}

async fn get_checkpoint(State(state): State<AppState>) -> Json<CheckpointView> {
    Json(CheckpointController::new(state).view().await)
}

async fn scan_ticket(
    State(state): State<AppState>,
    Json(request): Json<ScanRequest>,
) -> Result<Json<CheckpointView>, AppError> {
    let controller = CheckpointController::new(state);
    Ok(Json(controller.scan(request).await?))
}

async fn register_entry(State(state): State<AppState>) -> Result<Json<CheckpointView>, AppError> {
    let controller = CheckpointController::new(state);
    Ok(Json(controller.register_entry().await?))
}

async fn register_exit(State(state): State<AppState>) -> Result<Json<CheckpointView>, AppError> {
    let controller = CheckpointController::new(state);
    Ok(Json(controller.register_exit().await?))
}

async fn reset_checkpoint(State(state): State<AppState>) -> Json<CheckpointView> {
    Json(CheckpointController::new(state).reset().await)
}

async fn start_scanner(State(state): State<AppState>) -> Json<CheckpointView> {
    Json(CheckpointController::new(state).start_scanner().await)
}

async fn stop_scanner(State(state): State<AppState>) -> Json<CheckpointView> {
    Json(CheckpointController::new(state).stop_scanner().await)
}

async fn push_frame(
    State(state): State<AppState>,
    Json(request): Json<FrameRequest>,
) -> Result<Json<FrameAck>, AppError> {
    let controller = CheckpointController::new(state);
    Ok(Json(controller.push_frame(request).await?))
}
