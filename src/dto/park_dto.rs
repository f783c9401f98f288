use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// Body de PUT /park/time/{id} y PUT /park/disable/{id}
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeUpdateRequest {
    pub time: String,
}

// Respuesta de PUT /park/disable/{id}: liquidación calculada por el servicio
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitSettlementResponse {
    #[serde(default)]
    pub arrival_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub departure_time: Option<DateTime<Utc>>,
    pub total_cost: Decimal,
    #[serde(default)]
    pub message: Option<String>,
}

// Body de POST /mail/{userId}
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MailRequest {
    pub subject: String,
    pub html: String,
}

// Cuerpo de error del API del mall; solo interesa `message`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceMessage {
    #[serde(default)]
    pub message: Option<String>,
}
