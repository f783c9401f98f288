//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno del checkpoint:
//! dirección del servidor, URL del API del mall y zona horaria de referencia.

use std::env;
use std::str::FromStr;

use chrono_tz::Tz;

use crate::utils::errors::{AppError, AppResult};

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    /// URL base del API del mall, sin barra final (ej: http://localhost:8080/api)
    pub mall_api_base_url: String,
    pub http_timeout_secs: u64,
    pub reference_timezone: Tz,
    /// Capacidad del canal de frames del escáner
    pub scanner_buffer: usize,
    pub currency_label: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            cors_origins: Vec::new(),
            mall_api_base_url: "http://localhost:8080/api".to_string(),
            http_timeout_secs: 30,
            reference_timezone: chrono_tz::Asia::Colombo,
            scanner_buffer: 16,
            currency_label: "Rs.".to_string(),
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración desde variables de entorno.
    /// Las variables ausentes toman el valor por defecto.
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();

        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_var("PORT", defaults.port)?,
            host: env::var("HOST").unwrap_or(defaults.host),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.cors_origins),
            mall_api_base_url: env::var("MALL_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.mall_api_base_url),
            http_timeout_secs: parse_var("HTTP_TIMEOUT_SECS", defaults.http_timeout_secs)?,
            reference_timezone: match env::var("REFERENCE_TIMEZONE") {
                Ok(name) => Tz::from_str(&name).map_err(|e| {
                    AppError::Config(format!("REFERENCE_TIMEZONE '{}' is invalid: {}", name, e))
                })?,
                Err(_) => defaults.reference_timezone,
            },
            scanner_buffer: parse_var("SCANNER_BUFFER", defaults.scanner_buffer)?,
            currency_label: env::var("CURRENCY_LABEL").unwrap_or(defaults.currency_label),
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T>(name: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{} must be a valid number: {}", name, e))),
        Err(_) => Ok(default),
    }
}
