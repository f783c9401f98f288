//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores y tiempo
//! normalizado a la zona de referencia.

pub mod errors;
pub mod time;

pub use errors::{AppError, AppResult};
pub use time::ReferenceClock;
