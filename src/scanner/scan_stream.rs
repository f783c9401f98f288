//! Stream de escaneo QR
//!
//! Secuencia perezosa de intentos de decodificación. Los frames llegan por
//! un canal acotado desde el lado de la cámara (`ScanFeed`) y el consumidor
//! (`ScanStream`) devuelve el primer ticket válido y se cierra. Un stream
//! cerrado no se reinicia: hay que construir uno nuevo.

use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::booking::TicketId;
use crate::utils::errors::{AppError, AppResult};

/// Resultado de la decodificación de un frame de cámara
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameDecode {
    Decoded(String),
    Unreadable(String),
}

impl FrameDecode {
    pub fn from_payload(payload: Option<String>) -> Self {
        match payload {
            Some(text) => FrameDecode::Decoded(text),
            None => FrameDecode::Unreadable("no QR code in frame".to_string()),
        }
    }
}

/// Interpreta el texto de un QR como ticket. Un texto vacío es ruido.
pub fn decode_scan(raw: &str) -> AppResult<TicketId> {
    TicketId::parse(raw).ok_or_else(|| AppError::ScanDecodeNoise("empty QR payload".to_string()))
}

/// Crear un par productor/consumidor para una sesión de escaneo
pub fn scan_channel(buffer: usize) -> (ScanFeed, ScanStream) {
    let id = Uuid::new_v4();
    let (tx, rx) = mpsc::channel(buffer.max(1));
    (ScanFeed { id, tx }, ScanStream { id, rx: Some(rx) })
}

/// Lado de la cámara
#[derive(Debug, Clone)]
pub struct ScanFeed {
    id: Uuid,
    tx: mpsc::Sender<FrameDecode>,
}

impl ScanFeed {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Entregar un frame. Devuelve `false` si el buffer está lleno y el frame
    /// se descarta; `ScannerStopped` si el stream ya se cerró.
    pub fn push(&self, frame: FrameDecode) -> AppResult<bool> {
        match self.tx.try_send(frame) {
            Ok(()) => Ok(true),
            Err(TrySendError::Full(_)) => {
                debug!("📷 Buffer de escaneo {} lleno, frame descartado", self.id);
                Ok(false)
            }
            Err(TrySendError::Closed(_)) => Err(AppError::ScannerStopped),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Lado del consumidor
#[derive(Debug)]
pub struct ScanStream {
    id: Uuid,
    rx: Option<mpsc::Receiver<FrameDecode>>,
}

impl ScanStream {
    pub fn is_stopped(&self) -> bool {
        self.rx.is_none()
    }

    /// Esperar el primer ticket válido. Los frames ilegibles se ignoran y el
    /// escaneo continúa. Tras el primer éxito el stream se cierra.
    pub async fn next_ticket(&mut self) -> AppResult<TicketId> {
        let rx = self.rx.as_mut().ok_or(AppError::ScannerStopped)?;

        while let Some(frame) = rx.recv().await {
            let raw = match frame {
                FrameDecode::Decoded(raw) => raw,
                FrameDecode::Unreadable(reason) => {
                    debug!("📷 Frame ilegible: {}", reason);
                    continue;
                }
            };

            match decode_scan(&raw) {
                Ok(ticket) => {
                    info!("✅ QR leído en escaneo {}: {}", self.id, ticket);
                    self.stop();
                    return Ok(ticket);
                }
                Err(e) => debug!("📷 {}", e),
            }
        }

        // Todos los productores desaparecieron
        self.stop();
        Err(AppError::ScannerStopped)
    }

    /// Liberar la entrada de escaneo. Los productores ven el canal cerrado.
    pub fn stop(&mut self) {
        if let Some(mut rx) = self.rx.take() {
            rx.close();
            debug!("📷 Escaneo {} detenido", self.id);
        }
    }
}

impl Drop for ScanStream {
    fn drop(&mut self) {
        self.stop();
    }
}
