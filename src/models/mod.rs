//! Modelos de datos
//!
//! Este módulo contiene los modelos del checkpoint: reservas, facturas,
//! estado de la sesión y alertas para la interfaz.

pub mod alert;
pub mod bill;
pub mod booking;
pub mod session;

pub use alert::*;
pub use bill::*;
pub use booking::*;
pub use session::*;
