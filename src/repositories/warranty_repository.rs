use std::collections::HashMap;
use tokio::sync::RwLockWriteGuard;
use uuid::Uuid;

use crate::database::Table;
use crate::models::warranty::Warranty;
use crate::utils::errors::{not_found_error, AppResult};

#[derive(Clone, Default)]
pub struct WarrantyRepository {
    warranties: Table<Warranty>,
}

impl WarrantyRepository {
    pub fn new(warranties: Vec<Warranty>) -> Self {
        Self {
            warranties: Table::from_rows(warranties.into_iter().map(|w| (w.id, w)).collect()),
        }
    }

    /// Ordenadas por fecha de fin, las que vencen antes primero
    pub async fn find_by_customer(&self, customer_id: Uuid) -> Vec<Warranty> {
        let mut warranties = self.warranties.filter(|w| w.customer_id == customer_id).await;
        warranties.sort_by(|a, b| a.end_date.cmp(&b.end_date));
        warranties
    }

    pub async fn find_owned(&self, customer_id: Uuid, id: Uuid) -> AppResult<Warranty> {
        self.warranties
            .get(id)
            .await
            .filter(|w| w.customer_id == customer_id)
            .ok_or_else(|| not_found_error("Warranty", &id.to_string()))
    }

    pub async fn update<R, F>(&self, id: Uuid, f: F) -> AppResult<R>
    where
        F: FnOnce(&mut Warranty) -> AppResult<R>,
    {
        self.warranties.update(id, "Warranty", f).await
    }

    pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, HashMap<Uuid, Warranty>> {
        self.warranties.write().await
    }

    pub async fn count(&self) -> usize {
        self.warranties.len().await
    }
}
