//! Cliente HTTP para el API del mall
//!
//! Este módulo contiene el cliente HTTP para los servicios de reservas,
//! facturación y correo del mall. Los identificadores de reserva se
//! codifican antes de colocarse en la ruta.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info};

use crate::dto::park_dto::{ExitSettlementResponse, MailRequest, ServiceMessage, TimeUpdateRequest};
use crate::models::booking::{Booking, TicketId};

/// Errores del API del mall
#[derive(Error, Debug)]
pub enum MallApiError {
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl MallApiError {
    /// Mensaje enviado por el servicio en el cuerpo de la respuesta, si lo hay
    pub fn server_message(&self) -> Option<&str> {
        match self {
            MallApiError::Status { message, .. } => message.as_deref(),
            MallApiError::Transport(_) => None,
        }
    }
}

pub type MallApiResult<T> = Result<T, MallApiError>;

/// Contratos consumidos del API del mall
#[async_trait]
pub trait ParkingApi: Send + Sync {
    /// GET /park/{bookingId}
    async fn fetch_booking(&self, ticket: &TicketId) -> MallApiResult<Booking>;

    /// PUT /park/time/{bookingId}
    async fn register_arrival(&self, booking_id: &str, time: &str) -> MallApiResult<()>;

    /// PUT /park/disable/{bookingId}
    async fn disable_booking(
        &self,
        booking_id: &str,
        time: &str,
    ) -> MallApiResult<ExitSettlementResponse>;

    /// POST /mail/{userId}
    async fn send_mail(&self, user_id: &str, mail: &MailRequest) -> MallApiResult<()>;

    /// GET /park/bookings
    async fn list_bookings(&self) -> MallApiResult<Vec<Booking>>;
}

/// Cliente HTTP para el API del mall
#[derive(Clone)]
pub struct MallApiClient {
    client: Client,
    base_url: String,
}

impl MallApiClient {
    /// Crear nuevo cliente con URL base configurable
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> MallApiResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Convierte respuestas no exitosas en `MallApiError::Status`,
    /// extrayendo `message` del cuerpo JSON si existe
    async fn check(response: Response) -> MallApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ServiceMessage>(&body)
            .ok()
            .and_then(|m| m.message);
        debug!("📡 Mall API respondió {}: {}", status, body);

        Err(MallApiError::Status { status, message })
    }

    async fn json<T: DeserializeOwned>(response: Response) -> MallApiResult<T> {
        Ok(Self::check(response).await?.json::<T>().await?)
    }
}

#[async_trait]
impl ParkingApi for MallApiClient {
    async fn fetch_booking(&self, ticket: &TicketId) -> MallApiResult<Booking> {
        let url = self.url(&format!("/park/{}", urlencoding::encode(ticket.as_str())));
        info!("🔍 Buscando reserva: {}", url);

        let response = self.client.get(&url).send().await?;
        Self::json(response).await
    }

    async fn register_arrival(&self, booking_id: &str, time: &str) -> MallApiResult<()> {
        let url = self.url(&format!("/park/time/{}", urlencoding::encode(booking_id)));
        info!("🚗 Registrando llegada: {} @ {}", booking_id, time);

        let response = self
            .client
            .put(&url)
            .json(&TimeUpdateRequest {
                time: time.to_string(),
            })
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn disable_booking(
        &self,
        booking_id: &str,
        time: &str,
    ) -> MallApiResult<ExitSettlementResponse> {
        let url = self.url(&format!("/park/disable/{}", urlencoding::encode(booking_id)));
        info!("🏁 Registrando salida: {} @ {}", booking_id, time);

        let response = self
            .client
            .put(&url)
            .json(&TimeUpdateRequest {
                time: time.to_string(),
            })
            .send()
            .await?;
        Self::json(response).await
    }

    async fn send_mail(&self, user_id: &str, mail: &MailRequest) -> MallApiResult<()> {
        let url = self.url(&format!("/mail/{}", urlencoding::encode(user_id)));
        info!("📧 Enviando correo a usuario {}", user_id);

        let response = self.client.post(&url).json(mail).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn list_bookings(&self) -> MallApiResult<Vec<Booking>> {
        let url = self.url("/park/bookings");
        let response = self.client.get(&url).send().await?;
        Self::json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = MallApiClient::new("http://localhost:8080/api/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api");
        assert_eq!(client.url("/park/BK1"), "http://localhost:8080/api/park/BK1");
    }

    #[test]
    fn test_status_error_message() {
        let err = MallApiError::Status {
            status: StatusCode::NOT_FOUND,
            message: Some("Booking not found".to_string()),
        };
        assert_eq!(err.server_message(), Some("Booking not found"));
        assert_eq!(err.to_string(), "HTTP 404 Not Found: Booking not found");

        let err = MallApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: None,
        };
        assert_eq!(err.server_message(), None);
    }
}
