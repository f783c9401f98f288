//! Clients - HTTP Clients for External APIs
//!
//! This module contains the HTTP client for the mall booking, billing and
//! mail services.

pub mod mall_api;

// Re-export main types for convenience
pub use mall_api::{MallApiClient, MallApiError, MallApiResult, ParkingApi};
