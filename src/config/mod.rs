//! Configuración del proyecto
//!
//! Este módulo contiene las variables de entorno del checkpoint.

pub mod environment;

pub use environment::*;
