use serde::Serialize;
use validator::Validate;

use crate::dto::checkpoint_dto::{CheckpointView, FrameRequest, ScanRequest, ScannerView};
use crate::scanner::decode_scan;
use crate::state::AppState;
use crate::utils::errors::AppError;

#[derive(Debug, Serialize)]
pub struct FrameAck {
    pub accepted: bool,
    pub scanner: ScannerView,
}

pub struct CheckpointController {
    state: AppState,
}

impl CheckpointController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn view(&self) -> CheckpointView {
        let (session, alert) = self.state.sessions.snapshot().await;
        let scanner = self.state.station.view().await;
        CheckpointView::build(
            &session,
            alert,
            scanner,
            self.state.clock(),
            &self.state.config.currency_label,
        )
    }

    /// Búsqueda manual: escáneres de mano que teclean el ticket
    pub async fn scan(&self, request: ScanRequest) -> Result<CheckpointView, AppError> {
        request.validate()?;
        let ticket = decode_scan(&request.ticket)?;
        self.state.sessions.load_booking(ticket).await?;
        Ok(self.view().await)
    }

    pub async fn register_entry(&self) -> Result<CheckpointView, AppError> {
        self.state.sessions.register_entry().await?;
        Ok(self.view().await)
    }

    pub async fn register_exit(&self) -> Result<CheckpointView, AppError> {
        self.state.sessions.register_exit().await?;
        Ok(self.view().await)
    }

    pub async fn reset(&self) -> CheckpointView {
        self.state.sessions.reset().await;
        self.view().await
    }

    pub async fn start_scanner(&self) -> CheckpointView {
        self.state.station.start().await;
        self.view().await
    }

    pub async fn stop_scanner(&self) -> CheckpointView {
        self.state.station.stop().await;
        self.view().await
    }

    pub async fn push_frame(&self, request: FrameRequest) -> Result<FrameAck, AppError> {
        request.validate()?;
        let accepted = self.state.station.push_frame(request.payload).await?;
        Ok(FrameAck {
            accepted,
            scanner: self.state.station.view().await,
        })
    }
}
