//! Checkpoint de parking del mall
//!
//! Servicio de la estación de entrada/salida del parking: lee el QR del
//! ticket, busca la reserva en el API del mall, registra entrada o salida,
//! muestra la factura y notifica al cliente.

pub mod clients;
pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod scanner;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app;
pub use state::AppState;
