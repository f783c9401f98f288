//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::clients::{MallApiClient, ParkingApi};
use crate::config::environment::EnvironmentConfig;
use crate::services::{ParkingSessionService, ScannerStation};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::time::ReferenceClock;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub api: Arc<dyn ParkingApi>,
    pub sessions: Arc<ParkingSessionService>,
    pub station: Arc<ScannerStation>,
}

impl AppState {
    /// Estado con el cliente HTTP real hacia el API del mall
    pub fn new(config: EnvironmentConfig) -> AppResult<Self> {
        let client = MallApiClient::new(
            config.mall_api_base_url.clone(),
            Duration::from_secs(config.http_timeout_secs),
        )
        .map_err(|e| AppError::Config(format!("Cannot build mall API client: {}", e)))?;

        info!("🔗 API del mall: {}", client.base_url());
        Ok(Self::with_api(config, Arc::new(client)))
    }

    pub fn with_api(config: EnvironmentConfig, api: Arc<dyn ParkingApi>) -> Self {
        let sessions = Arc::new(ParkingSessionService::new(
            Arc::clone(&api),
            ReferenceClock::new(config.reference_timezone),
            config.currency_label.clone(),
        ));
        let station = Arc::new(ScannerStation::new(
            Arc::clone(&sessions),
            config.scanner_buffer,
        ));

        Self {
            config,
            api,
            sessions,
            station,
        }
    }

    pub fn clock(&self) -> &ReferenceClock {
        self.sessions.clock()
    }

    /// Liberar el escáner, cancelar llamadas en curso y esperar notificaciones
    pub async fn shutdown(&self) {
        self.station.stop().await;
        self.sessions.teardown();
        self.sessions.drain_notifications().await;
    }
}
