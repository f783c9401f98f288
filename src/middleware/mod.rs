//! Middleware del sistema
//!
//! Este módulo contiene el middleware HTTP del checkpoint.

pub mod cors;

pub use cors::*;
