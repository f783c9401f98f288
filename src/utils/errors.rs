//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del checkpoint de parking
//! y su conversión a respuestas HTTP apropiadas. Cada respuesta de error
//! lleva el `Alert` que la interfaz muestra como diálogo bloqueante.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::alert::Alert;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    /// Texto de QR sin ticket. El stream de escaneo lo ignora; una búsqueda
    /// manual lo devuelve como ticket inválido.
    #[error("Scan decode noise: {0}")]
    ScanDecodeNoise(String),

    /// Reserva no encontrada o error de red durante la búsqueda
    #[error("Lookup failure: {0}")]
    LookupFailure(String),

    /// Registro de entrada/salida rechazado por el servicio
    #[error("Transition failure: {0}")]
    TransitionFailure(String),

    /// Fallo del envío de notificación (solo se registra en logs)
    #[error("Notification failure: {0}")]
    NotificationFailure(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Scanner stopped")]
    ScannerStopped,

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: String,
    alert: Alert,
}

impl AppError {
    /// Diálogo que la interfaz muestra al operador
    pub fn alert(&self) -> Alert {
        match self {
            // El título es el mensaje del servidor, sin texto adicional
            AppError::LookupFailure(msg) => Alert::error(msg.clone(), ""),
            AppError::TransitionFailure(msg) | AppError::InvalidTransition(msg) => {
                Alert::error("Error", msg.clone())
            }
            AppError::ScanDecodeNoise(_) => {
                Alert::error("Invalid ticket", "The scanned code does not contain a ticket.")
            }
            AppError::ScannerStopped => {
                Alert::error("Scanner stopped", "Start a new scan to read another ticket.")
            }
            AppError::Cancelled => Alert::error("Cancelled", "The checkpoint is shutting down."),
            AppError::Validation(e) => Alert::error("Invalid request", e.to_string()),
            _ => Alert::error("Error", "An unexpected error occurred"),
        }
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::ScanDecodeNoise(_) => (StatusCode::UNPROCESSABLE_ENTITY, "SCAN_NOISE"),
            AppError::LookupFailure(_) => (StatusCode::BAD_GATEWAY, "LOOKUP_FAILURE"),
            AppError::TransitionFailure(_) => (StatusCode::BAD_GATEWAY, "TRANSITION_FAILURE"),
            AppError::NotificationFailure(_) => {
                (StatusCode::BAD_GATEWAY, "NOTIFICATION_FAILURE")
            }
            AppError::InvalidTransition(_) => (StatusCode::CONFLICT, "INVALID_TRANSITION"),
            AppError::ScannerStopped => (StatusCode::CONFLICT, "SCANNER_STOPPED"),
            AppError::Cancelled => (StatusCode::SERVICE_UNAVAILABLE, "CANCELLED"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!("❌ {}", self);
        } else {
            tracing::warn!("⚠️ {}", self);
        }

        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
            code: code.to_string(),
            alert: self.alert(),
        };

        (status, Json(body)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de transición inválida
pub fn invalid_transition(operation: &str, state: &str) -> AppError {
    AppError::InvalidTransition(format!("Cannot {} while the checkpoint is {}", operation, state))
}
