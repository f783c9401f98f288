//! API del mall en memoria para tests unitarios

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use tokio::sync::Notify;

use crate::clients::{MallApiError, MallApiResult, ParkingApi};
use crate::dto::park_dto::{ExitSettlementResponse, MailRequest};
use crate::models::{Booking, BookingUser, ParkingSlot, SlotLabel, TicketId};

#[derive(Default)]
pub struct FakeParkingApi {
    bookings: Mutex<HashMap<String, Booking>>,
    hanging: Mutex<HashSet<String>>,
    silent: Mutex<HashSet<String>>,
    release: Notify,
    calls: Mutex<Vec<String>>,
    mails: Mutex<Vec<(String, MailRequest)>>,
    sent_times: Mutex<Vec<String>>,
    total_cost: Mutex<Option<Decimal>>,
    pub fail_entry: AtomicBool,
    pub fail_exit: AtomicBool,
    pub fail_mail: AtomicBool,
}

pub fn booking(id: &str, slot: Option<i64>) -> Booking {
    Booking {
        id: id.to_string(),
        user: BookingUser {
            id: "U42".to_string(),
            username: "nimal".to_string(),
        },
        car_number: "CAB-1234".to_string(),
        parking_slot: slot.map(|n| ParkingSlot {
            id: None,
            slot: SlotLabel::Number(n),
        }),
        booking_time: None,
        arrival_time: None,
        is_active: true,
    }
}

impl FakeParkingApi {
    pub fn with_booking(booking: Booking) -> Self {
        let api = Self::default();
        api.insert(booking);
        api
    }

    pub fn insert(&self, booking: Booking) {
        self.bookings
            .lock()
            .unwrap()
            .insert(booking.id.clone(), booking);
    }

    /// Las búsquedas de este ticket esperan a `release_lookups()`
    pub fn hang_lookup(&self, ticket: &str) {
        self.hanging.lock().unwrap().insert(ticket.to_string());
    }

    pub fn release_lookups(&self) {
        self.hanging.lock().unwrap().clear();
        self.release.notify_waiters();
    }

    /// Las búsquedas de este ticket fallan sin mensaje del servidor
    pub fn fail_lookup_silently(&self, ticket: &str) {
        self.silent.lock().unwrap().insert(ticket.to_string());
    }

    pub fn set_total_cost(&self, cost: Decimal) {
        *self.total_cost.lock().unwrap() = Some(cost);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mails(&self) -> Vec<(String, MailRequest)> {
        self.mails.lock().unwrap().clone()
    }

    pub fn sent_times(&self) -> Vec<String> {
        self.sent_times.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn rejected(message: &str) -> MallApiError {
        MallApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: Some(message.to_string()),
        }
    }

    fn parse_time(time: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(time)
            .expect("time must be RFC 3339")
            .with_timezone(&Utc)
    }
}

#[async_trait]
impl ParkingApi for FakeParkingApi {
    async fn fetch_booking(&self, ticket: &TicketId) -> MallApiResult<Booking> {
        self.record(format!("GET /park/{}", ticket));
        let hangs = self.hanging.lock().unwrap().contains(ticket.as_str());
        if hangs {
            self.release.notified().await;
        }
        if self.silent.lock().unwrap().contains(ticket.as_str()) {
            return Err(MallApiError::Status {
                status: StatusCode::NOT_FOUND,
                message: None,
            });
        }

        self.bookings
            .lock()
            .unwrap()
            .get(ticket.as_str())
            .cloned()
            .ok_or(MallApiError::Status {
                status: StatusCode::NOT_FOUND,
                message: Some("Booking not found".to_string()),
            })
    }

    async fn register_arrival(&self, booking_id: &str, time: &str) -> MallApiResult<()> {
        self.record(format!("PUT /park/time/{}", booking_id));
        self.sent_times.lock().unwrap().push(time.to_string());
        if self.fail_entry.load(Ordering::SeqCst) {
            return Err(Self::rejected("arrival rejected"));
        }

        let mut bookings = self.bookings.lock().unwrap();
        let booking = bookings.get_mut(booking_id).ok_or(MallApiError::Status {
            status: StatusCode::NOT_FOUND,
            message: None,
        })?;
        booking.arrival_time = Some(Self::parse_time(time));
        Ok(())
    }

    async fn disable_booking(
        &self,
        booking_id: &str,
        time: &str,
    ) -> MallApiResult<ExitSettlementResponse> {
        self.record(format!("PUT /park/disable/{}", booking_id));
        self.sent_times.lock().unwrap().push(time.to_string());
        if self.fail_exit.load(Ordering::SeqCst) {
            return Err(Self::rejected("disable rejected"));
        }

        let mut bookings = self.bookings.lock().unwrap();
        let booking = bookings.get_mut(booking_id).ok_or(MallApiError::Status {
            status: StatusCode::NOT_FOUND,
            message: None,
        })?;
        booking.is_active = false;

        let cost = self.total_cost.lock().unwrap().unwrap_or(Decimal::from(150));
        Ok(ExitSettlementResponse {
            arrival_time: booking.arrival_time,
            departure_time: Some(Self::parse_time(time)),
            total_cost: cost,
            message: Some("Booking disabled successfully".to_string()),
        })
    }

    async fn send_mail(&self, user_id: &str, mail: &MailRequest) -> MallApiResult<()> {
        self.record(format!("POST /mail/{}", user_id));
        if self.fail_mail.load(Ordering::SeqCst) {
            return Err(Self::rejected("mail service down"));
        }
        self.mails
            .lock()
            .unwrap()
            .push((user_id.to_string(), mail.clone()));
        Ok(())
    }

    async fn list_bookings(&self) -> MallApiResult<Vec<Booking>> {
        self.record("GET /park/bookings".to_string());
        let mut bookings: Vec<Booking> = self.bookings.lock().unwrap().values().cloned().collect();
        bookings.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(bookings)
    }
}
