//! Modelo de Bill
//!
//! Factura de salida construida a partir de la respuesta del servicio de
//! facturación. Solo vive en memoria mientras la sesión está liquidada.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::utils::errors::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Bill {
    pub user_name: String,
    pub arrival_time: DateTime<Utc>,
    pub departure_time: DateTime<Utc>,
    pub amount: Decimal,
}

impl Bill {
    /// Construir la factura. Rechaza importes negativos y salidas anteriores
    /// a la llegada.
    pub fn settle(
        user_name: String,
        arrival_time: DateTime<Utc>,
        departure_time: DateTime<Utc>,
        amount: Decimal,
    ) -> AppResult<Self> {
        if amount < Decimal::ZERO {
            return Err(AppError::TransitionFailure(format!(
                "Settlement returned a negative amount ({})",
                amount
            )));
        }

        if departure_time < arrival_time {
            return Err(AppError::TransitionFailure(format!(
                "Settlement departure {} precedes arrival {}",
                departure_time, arrival_time
            )));
        }

        Ok(Self {
            user_name,
            arrival_time,
            departure_time,
            amount,
        })
    }

    pub fn duration(&self) -> Duration {
        self.departure_time - self.arrival_time
    }

    /// Importe con el prefijo de moneda, ej: "Rs. 150"
    pub fn amount_label(&self, currency: &str) -> String {
        format!("{} {}", currency, self.amount.normalize())
    }
}
