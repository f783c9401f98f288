//! Estación de escaneo
//!
//! Conecta un stream de escaneo con la sesión de parking: el primer ticket
//! leído dispara la búsqueda de la reserva. Cada `start()` construye un
//! stream nuevo; un stream detenido no se reutiliza.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::dto::checkpoint_dto::ScannerView;
use crate::scanner::{scan_channel, FrameDecode, ScanFeed};
use crate::services::parking_session_service::ParkingSessionService;
use crate::utils::errors::{AppError, AppResult};

struct ActiveScan {
    feed: ScanFeed,
    task: JoinHandle<()>,
}

pub struct ScannerStation {
    sessions: Arc<ParkingSessionService>,
    buffer: usize,
    active: Mutex<Option<ActiveScan>>,
}

impl ScannerStation {
    pub fn new(sessions: Arc<ParkingSessionService>, buffer: usize) -> Self {
        Self {
            sessions,
            buffer,
            active: Mutex::new(None),
        }
    }

    /// Abrir un escaneo nuevo, liberando el anterior si existía
    pub async fn start(&self) -> Uuid {
        let mut active = self.active.lock().await;
        if let Some(previous) = active.take() {
            release(previous);
        }

        let (feed, mut stream) = scan_channel(self.buffer);
        let scan_id = feed.id();
        let sessions = Arc::clone(&self.sessions);

        let task = tokio::spawn(async move {
            match stream.next_ticket().await {
                Ok(ticket) => {
                    if let Err(e) = sessions.load_booking(ticket).await {
                        warn!("⚠️ Escaneo {} sin reserva: {}", scan_id, e);
                    }
                }
                Err(e) => debug!("📷 Escaneo {} terminado: {}", scan_id, e),
            }
        });

        info!("📷 Escaneo {} iniciado", scan_id);
        *active = Some(ActiveScan { feed, task });
        scan_id
    }

    /// Entregar un frame de la cámara al escaneo activo
    pub async fn push_frame(&self, payload: Option<String>) -> AppResult<bool> {
        let active = self.active.lock().await;
        let scan = active.as_ref().ok_or(AppError::ScannerStopped)?;
        scan.feed.push(FrameDecode::from_payload(payload))
    }

    /// Liberar la entrada de escaneo
    pub async fn stop(&self) {
        if let Some(previous) = self.active.lock().await.take() {
            release(previous);
        }
    }

    pub async fn view(&self) -> ScannerView {
        let active = self.active.lock().await;
        match active.as_ref() {
            Some(scan) => ScannerView {
                scan_id: Some(scan.feed.id()),
                listening: !scan.feed.is_closed(),
            },
            None => ScannerView {
                scan_id: None,
                listening: false,
            },
        }
    }
}

fn release(scan: ActiveScan) {
    // Solo se aborta si aún espera frames; una búsqueda ya lanzada termina
    if !scan.feed.is_closed() {
        scan.task.abort();
        debug!("📷 Escaneo {} liberado", scan.feed.id());
    }
}
