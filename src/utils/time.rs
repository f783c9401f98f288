//! Utilidades de tiempo
//!
//! Todas las marcas de tiempo enviadas al API del mall se normalizan a una
//! zona horaria de referencia fija, independiente del locale del cliente,
//! para que la duración facturada sea la misma en todos los dispositivos.

use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use chrono_tz::Tz;

/// Reloj en la zona horaria de referencia del mall
#[derive(Debug, Clone, Copy)]
pub struct ReferenceClock {
    tz: Tz,
}

impl ReferenceClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Instante actual normalizado
    pub fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.tz)
    }

    /// Instante actual como ISO-8601 con el offset de la zona de referencia
    pub fn now_iso(&self) -> String {
        to_iso(&self.now())
    }

    /// Formato de visualización: "October 19th 2026, 3:04:05 pm"
    pub fn display(&self, instant: &DateTime<Utc>) -> String {
        format_display(&instant.with_timezone(&self.tz))
    }
}

pub fn to_iso(instant: &DateTime<Tz>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, false)
}

pub fn format_display(local: &DateTime<Tz>) -> String {
    let day = local.day();
    format!(
        "{} {}{} {}",
        local.format("%B"),
        day,
        ordinal_suffix(day),
        local.format("%Y, %-I:%M:%S %P")
    )
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
