use std::collections::HashMap;

use tokio::sync::RwLockWriteGuard;
use uuid::Uuid;

use crate::database::Table;
use crate::models::checkout::Booking;

#[derive(Clone, Default)]
pub struct BookingRepository {
    bookings: Table<Booking>,
}

impl BookingRepository {
    pub async fn create(&self, booking: Booking) -> Booking {
        self.bookings.insert(booking.id, booking.clone()).await;
        booking
    }

    pub async fn find_by_customer(&self, customer_id: Uuid) -> Vec<Booking> {
        let mut bookings = self.bookings.filter(|b| b.customer_id == customer_id).await;
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        bookings
    }

    pub async fn find_by_request(&self, service_request_id: Uuid) -> Option<Booking> {
        self.bookings
            .filter(|b| b.service_request_id == service_request_id)
            .await
            .into_iter()
            .next()
    }

    /// Guard de escritura para commits que abarcan varias tablas
    pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, HashMap<Uuid, Booking>> {
        self.bookings.write().await
    }
}
