use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Alert, Bill, Booking, CheckpointAction, ParkingSession};
use crate::utils::time::ReferenceClock;

// Request para buscar un ticket tecleado o leído por un escáner de mano
#[derive(Debug, Deserialize, Validate)]
pub struct ScanRequest {
    #[validate(length(min = 1, max = 256))]
    pub ticket: String,
}

// Frame del escáner de cámara. `payload` ausente = frame ilegible
#[derive(Debug, Deserialize, Validate)]
pub struct FrameRequest {
    #[validate(length(max = 4096))]
    pub payload: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ActionView {
    pub kind: CheckpointAction,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct BookingView {
    pub booking_id: String,
    pub user_name: String,
    pub vehicle_number: String,
    pub slot: Option<String>,
    pub booked_time: Option<String>,
    pub arrival_time: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BillView {
    pub user_name: String,
    pub arrival_time: String,
    pub departure_time: String,
    pub amount: String,
}

// Vista completa del checkpoint para la interfaz
#[derive(Debug, Serialize)]
pub struct CheckpointView {
    pub state: String,
    pub booking: Option<BookingView>,
    pub action: Option<ActionView>,
    pub bill: Option<BillView>,
    pub alert: Option<Alert>,
    pub scanner: ScannerView,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScannerView {
    pub scan_id: Option<Uuid>,
    pub listening: bool,
}

// Fila del listado de reservas
#[derive(Debug, Serialize)]
pub struct BookingRow {
    pub booking_id: String,
    pub slot: Option<String>,
    pub username: String,
    pub vehicle_number: String,
    pub status: String,
}

impl BookingView {
    pub fn from_booking(booking: &Booking, clock: &ReferenceClock) -> Self {
        Self {
            booking_id: booking.id.clone(),
            user_name: booking.user.username.clone(),
            vehicle_number: booking.car_number.clone(),
            slot: booking.slot_label(),
            booked_time: booking.booking_time.as_ref().map(|t| clock.display(t)),
            arrival_time: booking.arrival_time.as_ref().map(|t| clock.display(t)),
        }
    }
}

impl BillView {
    pub fn from_bill(bill: &Bill, clock: &ReferenceClock, currency: &str) -> Self {
        Self {
            user_name: bill.user_name.clone(),
            arrival_time: clock.display(&bill.arrival_time),
            departure_time: clock.display(&bill.departure_time),
            amount: bill.amount_label(currency),
        }
    }
}

impl CheckpointView {
    pub fn build(
        session: &ParkingSession,
        alert: Option<Alert>,
        scanner: ScannerView,
        clock: &ReferenceClock,
        currency: &str,
    ) -> Self {
        Self {
            state: session.name().to_string(),
            booking: session
                .booking()
                .map(|booking| BookingView::from_booking(booking, clock)),
            action: session.offered_action().map(|kind| ActionView {
                kind,
                label: kind.label().to_string(),
            }),
            bill: session
                .bill()
                .map(|bill| BillView::from_bill(bill, clock, currency)),
            alert,
            scanner,
        }
    }
}

impl From<&Booking> for BookingRow {
    fn from(booking: &Booking) -> Self {
        Self {
            booking_id: booking.id.clone(),
            slot: booking.slot_label(),
            username: booking.user.username.clone(),
            vehicle_number: booking.car_number.clone(),
            status: booking.status_label().to_string(),
        }
    }
}
