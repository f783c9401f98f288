//! Services module
//!
//! Este módulo contiene la lógica del checkpoint: la sesión de parking,
//! la estación de escaneo y las notificaciones al cliente.

pub mod notification_service;
pub mod parking_session_service;
pub mod scanner_station;

#[cfg(test)]
pub(crate) mod test_support;

pub use notification_service::NotificationService;
pub use parking_session_service::ParkingSessionService;
pub use scanner_station::ScannerStation;
