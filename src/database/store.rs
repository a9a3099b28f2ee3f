//! Tablas en memoria
//!
//! Cada tabla es un `HashMap` protegido por un `RwLock` de tokio. Los
//! repositorios envuelven una o varias tablas; el `Store` los agrupa.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockWriteGuard};
use uuid::Uuid;

use crate::repositories::{
    booking_repository::BookingRepository, chat_repository::ChatRepository,
    diagnosis_repository::DiagnosisRepository, fleet_repository::FleetRepository,
    garage_repository::GarageRepository, history_repository::HistoryRepository,
    inspection_repository::InspectionRepository, loyalty_repository::LoyaltyRepository,
    review_repository::ReviewRepository, service_request_repository::ServiceRequestRepository,
    user_repository::UserRepository, vehicle_repository::VehicleRepository,
    warranty_repository::WarrantyRepository,
};
use crate::utils::errors::{AppError, AppResult};

/// Tabla indexada por id
#[derive(Debug)]
pub struct Table<T> {
    rows: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T> Clone for Table<T> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
        }
    }
}

impl<T: Clone> Table<T> {
    pub fn new() -> Self {
        Self::from_rows(Vec::new())
    }

    pub fn from_rows(rows: Vec<(Uuid, T)>) -> Self {
        Self {
            rows: Arc::new(RwLock::new(rows.into_iter().collect())),
        }
    }

    pub async fn get(&self, id: Uuid) -> Option<T> {
        self.rows.read().await.get(&id).cloned()
    }

    pub async fn insert(&self, id: Uuid, row: T) {
        self.rows.write().await.insert(id, row);
    }

    pub async fn remove(&self, id: Uuid) -> Option<T> {
        self.rows.write().await.remove(&id)
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Copia de las filas que cumplen `predicate`, sin orden definido
    pub async fn filter<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        self.rows
            .read()
            .await
            .values()
            .filter(|row| predicate(row))
            .cloned()
            .collect()
    }

    pub async fn all(&self) -> Vec<T> {
        self.filter(|_| true).await
    }

    /// Modifica una fila bajo el lock de escritura. Si `f` falla, la fila
    /// debe quedar intacta: `f` valida antes de mutar.
    pub async fn update<R, F>(&self, id: Uuid, resource: &str, f: F) -> AppResult<R>
    where
        F: FnOnce(&mut T) -> AppResult<R>,
    {
        let mut rows = self.rows.write().await;
        let row = rows
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("{} with id '{}' not found", resource, id)))?;
        f(row)
    }

    /// Lock de escritura para operaciones que abarcan varias tablas
    pub async fn write(&self) -> RwLockWriteGuard<'_, HashMap<Uuid, T>> {
        self.rows.write().await
    }
}

impl<T: Clone> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Conjunto de repositorios de la aplicación
#[derive(Clone, Default)]
pub struct Store {
    pub users: UserRepository,
    pub garages: GarageRepository,
    pub vehicles: VehicleRepository,
    pub requests: ServiceRequestRepository,
    pub warranties: WarrantyRepository,
    pub bookings: BookingRepository,
    pub loyalty: LoyaltyRepository,
    pub diagnosis: DiagnosisRepository,
    pub history: HistoryRepository,
    pub fleets: FleetRepository,
    pub inspections: InspectionRepository,
    pub chat: ChatRepository,
    pub reviews: ReviewRepository,
}

impl Store {
    /// Store vacío, útil en tests
    pub fn empty() -> Self {
        Self::default()
    }

    /// Store con los datos de demostración
    pub fn seeded() -> Self {
        super::seed::fixtures()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let table: Table<u32> = Table::new();
        let result = table.update(Uuid::new_v4(), "Counter", |n| Ok(*n)).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_failed_update_leaves_row_untouched() {
        let id = Uuid::new_v4();
        let table = Table::from_rows(vec![(id, 1u32)]);

        let result: AppResult<()> = table
            .update(id, "Counter", |_| Err(AppError::Conflict("nope".to_string())))
            .await;

        assert!(result.is_err());
        assert_eq!(table.get(id).await, Some(1));
    }

    #[tokio::test]
    async fn test_clones_share_rows() {
        let table: Table<&'static str> = Table::new();
        let other = table.clone();
        let id = Uuid::new_v4();
        other.insert(id, "shared").await;
        assert_eq!(table.get(id).await, Some("shared"));
        assert_eq!(table.len().await, 1);
    }
}
