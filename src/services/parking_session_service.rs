//! Servicio de sesión de parking
//!
//! Lleva una reserva a través de entrada y salida:
//! `Idle → BookingLoaded → EntryRegistered → Settled`.
//!
//! Las transiciones pasan por una compuerta (`in_flight`): mientras una
//! llamada al API del mall está en curso, otra transición se rechaza con
//! `InvalidTransition`. El estado solo se bloquea para leerlo y para
//! aplicar el resultado, así la vista y `reset()` responden durante la
//! llamada. Un `reset()` en medio de una llamada descarta su resultado en
//! pantalla. Un fallo no avanza el estado. Las llamadas en curso se
//! cancelan con `teardown()` y en ese caso el estado tampoco cambia.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{watch, Mutex, MutexGuard};
use tracing::{debug, error, info, warn};

use crate::clients::ParkingApi;
use crate::models::{Alert, Bill, Booking, ParkingSession, TicketId};
use crate::services::notification_service::NotificationService;
use crate::utils::errors::{invalid_transition, AppError, AppResult};
use crate::utils::time::{to_iso, ReferenceClock};

const LOOKUP_FALLBACK_MESSAGE: &str = "Error fetching booking details";
const ENTRY_FAILED_MESSAGE: &str = "Failed to update arrival time";
const EXIT_FAILED_MESSAGE: &str = "Failed to update booking status";
const MISSING_SLOT_MESSAGE: &str = "Booking or parking slot information is missing.";
const ENTRY_REGISTERED_MESSAGE: &str = "Entry registered Successfully";
const BUSY_STATE: &str = "waiting for the mall API";

#[derive(Debug, Default)]
struct SessionSlot {
    session: ParkingSession,
    last_alert: Option<Alert>,
    /// Se incrementa en cada `reset()`
    epoch: u64,
}

impl SessionSlot {
    /// Registrar el diálogo de error y devolver el error
    fn fail(&mut self, err: AppError) -> AppError {
        self.last_alert = Some(err.alert());
        err
    }
}

pub struct ParkingSessionService {
    api: Arc<dyn ParkingApi>,
    clock: ReferenceClock,
    notifications: NotificationService,
    slot: Mutex<SessionSlot>,
    in_flight: Mutex<()>,
    teardown: watch::Sender<bool>,
}

impl ParkingSessionService {
    pub fn new(api: Arc<dyn ParkingApi>, clock: ReferenceClock, currency_label: String) -> Self {
        let (teardown, _) = watch::channel(false);
        Self {
            notifications: NotificationService::new(Arc::clone(&api), currency_label),
            api,
            clock,
            slot: Mutex::new(SessionSlot::default()),
            in_flight: Mutex::new(()),
            teardown,
        }
    }

    pub fn clock(&self) -> &ReferenceClock {
        &self.clock
    }

    /// Copia del estado actual y del último diálogo
    pub async fn snapshot(&self) -> (ParkingSession, Option<Alert>) {
        let slot = self.slot.lock().await;
        (slot.session.clone(), slot.last_alert.clone())
    }

    /// Buscar la reserva de un ticket y ponerla en foco
    pub async fn load_booking(&self, ticket: TicketId) -> AppResult<Booking> {
        let _gate = self.begin("load a booking")?;
        let epoch = self.slot.lock().await.epoch;

        let fetched = self.until_teardown(self.api.fetch_booking(&ticket)).await?;

        let mut slot = self.slot.lock().await;
        let current = self.is_current(&slot, epoch);
        match fetched {
            Ok(booking) => {
                info!(
                    "📋 Reserva {} cargada (vehículo {}, llegada {})",
                    booking.id,
                    booking.car_number,
                    if booking.arrival_time.is_some() { "registrada" } else { "pendiente" }
                );
                if current {
                    slot.session = ParkingSession::focus(booking.clone());
                    slot.last_alert = None;
                }
                Ok(booking)
            }
            Err(e) => {
                error!("❌ Error buscando reserva {}: {}", ticket, e);
                let message = e
                    .server_message()
                    .unwrap_or(LOOKUP_FALLBACK_MESSAGE)
                    .to_string();
                let err = AppError::LookupFailure(message);
                if !current {
                    return Err(err);
                }
                slot.session = ParkingSession::Idle;
                Err(slot.fail(err))
            }
        }
    }

    /// Registrar la llegada de la reserva en foco
    pub async fn register_entry(&self) -> AppResult<Booking> {
        let _gate = self.begin("register entry")?;

        let (booking, epoch) = {
            let mut slot = self.slot.lock().await;
            match &slot.session {
                ParkingSession::BookingLoaded(booking) if booking.arrival_time.is_none() => {
                    (booking.clone(), slot.epoch)
                }
                other => {
                    let err = invalid_transition("register entry", other.name());
                    return Err(slot.fail(err));
                }
            }
        };

        let now = self.clock.now();
        let time = to_iso(&now);

        let registered = self
            .until_teardown(self.api.register_arrival(&booking.id, &time))
            .await?;

        let mut slot = self.slot.lock().await;
        let current = self.is_current(&slot, epoch);
        match registered {
            Ok(()) => {
                info!("🚗 Entrada registrada para reserva {} @ {}", booking.id, time);
                let mut entered = booking;
                entered.arrival_time = Some(now.with_timezone(&Utc));
                if current {
                    slot.session = ParkingSession::EntryRegistered(entered.clone());
                    slot.last_alert = Some(Alert::success(ENTRY_REGISTERED_MESSAGE));
                }
                Ok(entered)
            }
            Err(e) => {
                error!("❌ Error registrando llegada de {}: {}", booking.id, e);
                let err = AppError::TransitionFailure(ENTRY_FAILED_MESSAGE.to_string());
                Err(if current { slot.fail(err) } else { err })
            }
        }
    }

    /// Registrar la salida de la reserva en foco y construir la factura.
    /// La notificación al cliente se lanza aparte y no se espera.
    pub async fn register_exit(&self) -> AppResult<Bill> {
        let _gate = self.begin("register exit")?;

        let (booking, known_arrival, epoch) = {
            let mut slot = self.slot.lock().await;
            let epoch = slot.epoch;
            match &slot.session {
                ParkingSession::EntryRegistered(booking) => match booking.arrival_time {
                    Some(arrival) => (booking.clone(), arrival, epoch),
                    None => {
                        let err = invalid_transition("register exit", "awaiting entry");
                        return Err(slot.fail(err));
                    }
                },
                other => {
                    let err = invalid_transition("register exit", other.name());
                    return Err(slot.fail(err));
                }
            }
        };

        if booking.parking_slot.is_none() {
            warn!("⚠️ Reserva {} sin plaza asignada", booking.id);
            let err = AppError::TransitionFailure(MISSING_SLOT_MESSAGE.to_string());
            return Err(self.record_failure(epoch, err).await);
        }

        let time = self.clock.now_iso();

        let settlement = match self
            .until_teardown(self.api.disable_booking(&booking.id, &time))
            .await?
        {
            Ok(settlement) => settlement,
            Err(e) => {
                error!("❌ Error registrando salida de {}: {}", booking.id, e);
                let err = AppError::TransitionFailure(EXIT_FAILED_MESSAGE.to_string());
                return Err(self.record_failure(epoch, err).await);
            }
        };

        let Some(departure) = settlement.departure_time else {
            error!("❌ Liquidación de {} sin hora de salida", booking.id);
            let err = AppError::TransitionFailure(EXIT_FAILED_MESSAGE.to_string());
            return Err(self.record_failure(epoch, err).await);
        };
        let arrival = settlement.arrival_time.unwrap_or(known_arrival);

        let bill = match Bill::settle(
            booking.user.username.clone(),
            arrival,
            departure,
            settlement.total_cost,
        ) {
            Ok(bill) => bill,
            Err(e) => {
                error!("❌ Liquidación inconsistente para {}: {}", booking.id, e);
                return Err(self.record_failure(epoch, e).await);
            }
        };

        info!(
            "🏁 Reserva {} liquidada: {} minutos, importe {}",
            booking.id,
            bill.duration().num_minutes(),
            bill.amount
        );

        let message = settlement
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| "Booking disabled".to_string());

        {
            let mut slot = self.slot.lock().await;
            if self.is_current(&slot, epoch) {
                slot.session = ParkingSession::Settled {
                    booking: booking.clone(),
                    bill: bill.clone(),
                };
                slot.last_alert = Some(Alert::success(message));
            }
        }

        self.notifications.dispatch(&booking, &bill).await;

        Ok(bill)
    }

    /// Volver a `Idle` descartando reserva y factura
    pub async fn reset(&self) {
        let mut slot = self.slot.lock().await;
        *slot = SessionSlot {
            epoch: slot.epoch + 1,
            ..SessionSlot::default()
        };
    }

    /// Cancelar las llamadas en curso y rechazar las siguientes
    pub fn teardown(&self) {
        self.teardown.send_replace(true);
    }

    pub async fn drain_notifications(&self) {
        self.notifications.drain().await;
    }

    /// Tomar la compuerta de transiciones o rechazar si hay una en curso
    fn begin(&self, operation: &str) -> AppResult<MutexGuard<'_, ()>> {
        self.in_flight
            .try_lock()
            .map_err(|_| invalid_transition(operation, BUSY_STATE))
    }

    fn is_current(&self, slot: &SessionSlot, epoch: u64) -> bool {
        if slot.epoch != epoch {
            debug!("🔄 Pantalla reiniciada durante la llamada, resultado descartado");
        }
        slot.epoch == epoch
    }

    async fn record_failure(&self, epoch: u64, err: AppError) -> AppError {
        let mut slot = self.slot.lock().await;
        if self.is_current(&slot, epoch) {
            slot.fail(err)
        } else {
            err
        }
    }

    async fn until_teardown<F: Future>(&self, fut: F) -> AppResult<F::Output> {
        let mut down = self.teardown.subscribe();
        if *down.borrow_and_update() {
            return Err(AppError::Cancelled);
        }

        tokio::select! {
            out = fut => Ok(out),
            _ = down.changed() => {
                warn!("🛑 Operación cancelada por apagado del checkpoint");
                Err(AppError::Cancelled)
            }
        }
    }
}
