//! Modelo de Alert
//!
//! Diálogo de confirmación que la interfaz muestra tras cada acción
//! del checkpoint (éxito o error). El operador debe cerrarlo.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertIcon {
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Alert {
    pub icon: AlertIcon,
    pub title: String,
    pub text: String,
}

impl Alert {
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            icon: AlertIcon::Success,
            title: title.into(),
            text: String::new(),
        }
    }

    pub fn error(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            icon: AlertIcon::Error,
            title: title.into(),
            text: text.into(),
        }
    }
}
