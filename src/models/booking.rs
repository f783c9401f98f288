//! Modelo de Booking
//!
//! Copia de solo lectura de una reserva de parking tal como la devuelve el
//! API del mall. Los nombres de campo siguen el JSON del servicio
//! (`_id`, `carNumber`, `parkingSlot`...).

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::session::CheckpointAction;

/// Identificador decodificado del QR del ticket. Opaco: solo se exige
/// que no esté vacío tras recortar espacios.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(String);

impl TicketId {
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
}

/// Etiqueta de plaza: el servicio la envía como número o como texto
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SlotLabel {
    Number(i64),
    Text(String),
}

impl fmt::Display for SlotLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotLabel::Number(n) => write!(f, "{}", n),
            SlotLabel::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParkingSlot {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub slot: SlotLabel,
}

/// Reserva de una plaza para un vehículo
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: BookingUser,
    pub car_number: String,
    #[serde(default)]
    pub parking_slot: Option<ParkingSlot>,
    #[serde(default)]
    pub booking_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub arrival_time: Option<DateTime<Utc>>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Booking {
    /// Sin hora de llegada solo se ofrece la entrada; con ella, solo la salida
    pub fn available_action(&self) -> CheckpointAction {
        match self.arrival_time {
            None => CheckpointAction::RegisterEntry,
            Some(_) => CheckpointAction::RegisterExit,
        }
    }

    pub fn slot_label(&self) -> Option<String> {
        self.parking_slot.as_ref().map(|slot| slot.slot.to_string())
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_active {
            "Active"
        } else {
            "Inactive"
        }
    }
}
