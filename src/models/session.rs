//! Estado de la sesión de parking
//!
//! Una sola reserva en foco por sesión de escaneo:
//! `Idle → BookingLoaded → EntryRegistered → Settled`.

use serde::Serialize;

use super::bill::Bill;
use super::booking::Booking;

/// Acción que el checkpoint ofrece para la reserva en foco
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CheckpointAction {
    RegisterEntry,
    RegisterExit,
}

impl CheckpointAction {
    pub fn label(&self) -> &'static str {
        match self {
            CheckpointAction::RegisterEntry => "Register Entry",
            CheckpointAction::RegisterExit => "Disable Booking",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ParkingSession {
    #[default]
    Idle,
    BookingLoaded(Booking),
    EntryRegistered(Booking),
    Settled { booking: Booking, bill: Bill },
}

impl ParkingSession {
    /// Poner una reserva en foco, descartando cualquier reserva o factura previa
    pub fn focus(booking: Booking) -> Self {
        if booking.arrival_time.is_some() {
            ParkingSession::EntryRegistered(booking)
        } else {
            ParkingSession::BookingLoaded(booking)
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ParkingSession::Idle => "idle",
            ParkingSession::BookingLoaded(_) => "booking_loaded",
            ParkingSession::EntryRegistered(_) => "entry_registered",
            ParkingSession::Settled { .. } => "settled",
        }
    }

    pub fn booking(&self) -> Option<&Booking> {
        match self {
            ParkingSession::Idle => None,
            ParkingSession::BookingLoaded(booking) | ParkingSession::EntryRegistered(booking) => {
                Some(booking)
            }
            ParkingSession::Settled { booking, .. } => Some(booking),
        }
    }

    pub fn bill(&self) -> Option<&Bill> {
        match self {
            ParkingSession::Settled { bill, .. } => Some(bill),
            _ => None,
        }
    }

    /// Una liquidación cerrada no ofrece más acciones
    pub fn offered_action(&self) -> Option<CheckpointAction> {
        match self {
            ParkingSession::BookingLoaded(booking) | ParkingSession::EntryRegistered(booking) => {
                Some(booking.available_action())
            }
            _ => None,
        }
    }
}
