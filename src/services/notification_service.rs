//! Servicio de notificaciones
//!
//! Envía el correo "Booking Disabled" tras una liquidación. El envío corre
//! en una tarea independiente: su fallo se registra en logs y nunca vuelve
//! al flujo de salida.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::clients::ParkingApi;
use crate::dto::park_dto::MailRequest;
use crate::models::{Bill, Booking};
use crate::utils::errors::AppError;

pub const BOOKING_DISABLED_SUBJECT: &str = "Booking Disabled";

pub struct NotificationService {
    api: Arc<dyn ParkingApi>,
    currency_label: String,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl NotificationService {
    pub fn new(api: Arc<dyn ParkingApi>, currency_label: String) -> Self {
        Self {
            api,
            currency_label,
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Construir el correo de fin de reserva
    pub fn booking_disabled_mail(&self, booking: &Booking, bill: &Bill) -> MailRequest {
        let slot = booking.slot_label().unwrap_or_else(|| "-".to_string());
        let html = format!(
            concat!(
                "<h2 style=\"color: #f54242;\">Booking Disabled</h2>",
                "<p>Your booking for <strong>Slot {slot}</strong> has been disabled.</p>",
                "<p>Amount to be paid: <strong>{amount}</strong></p>",
                "<p>Thank you for using our service.</p>",
                "<p style=\"font-style: italic; color: #888;\">Smart Parking Service Team</p>"
            ),
            slot = slot,
            amount = bill.amount_label(&self.currency_label),
        );

        MailRequest {
            subject: BOOKING_DISABLED_SUBJECT.to_string(),
            html,
        }
    }

    /// Lanzar el envío sin esperar su resultado
    pub async fn dispatch(&self, booking: &Booking, bill: &Bill) {
        let mail = self.booking_disabled_mail(booking, bill);
        let user_id = booking.user.id.clone();
        let booking_id = booking.id.clone();
        let api = Arc::clone(&self.api);

        let handle = tokio::spawn(async move {
            match api.send_mail(&user_id, &mail).await {
                Ok(()) => info!("📧 Notificación enviada para reserva {}", booking_id),
                Err(e) => {
                    let failure = AppError::NotificationFailure(e.to_string());
                    error!("❌ Reserva {}: {}", booking_id, failure);
                }
            }
        });

        let mut pending = self.pending.lock().await;
        pending.retain(|h| !h.is_finished());
        pending.push(handle);
    }

    /// Esperar los envíos pendientes (apagado del servidor)
    pub async fn drain(&self) {
        let handles: Vec<_> = self.pending.lock().await.drain(..).collect();
        if handles.is_empty() {
            return;
        }

        info!("📧 Esperando {} notificaciones pendientes", handles.len());
        for result in futures::future::join_all(handles).await {
            if let Err(e) = result {
                error!("❌ Tarea de notificación abortada: {}", e);
            }
        }
    }
}
