use tracing::error;

use crate::dto::checkpoint_dto::BookingRow;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct BookingController {
    state: AppState,
}

impl BookingController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Listado de reservas con su estado Active/Inactive
    pub async fn list(&self) -> Result<Vec<BookingRow>, AppError> {
        let bookings = self.state.api.list_bookings().await.map_err(|e| {
            error!("❌ Error listando reservas: {}", e);
            AppError::LookupFailure(
                e.server_message()
                    .unwrap_or("Error fetching bookings")
                    .to_string(),
            )
        })?;

        Ok(bookings.iter().map(BookingRow::from).collect())
    }
}
