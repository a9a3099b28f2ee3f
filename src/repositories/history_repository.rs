use uuid::Uuid;

use crate::database::Table;
use crate::models::job::{CompletedJob, MaintenanceItem};

/// Historial de trabajos importado y mantenimiento previsto
#[derive(Clone, Default)]
pub struct HistoryRepository {
    jobs: Table<CompletedJob>,
    maintenance: Table<MaintenanceItem>,
}

impl HistoryRepository {
    pub fn new(jobs: Vec<CompletedJob>, maintenance: Vec<MaintenanceItem>) -> Self {
        Self {
            jobs: Table::from_rows(jobs.into_iter().map(|j| (j.id, j)).collect()),
            maintenance: Table::from_rows(maintenance.into_iter().map(|m| (m.id, m)).collect()),
        }
    }

    pub async fn jobs_for(&self, customer_id: Uuid) -> Vec<CompletedJob> {
        self.jobs.filter(|j| j.customer_id == customer_id).await
    }

    /// Ordenado por fecha prevista
    pub async fn maintenance_for(&self, owner_id: Uuid, vehicle_id: Option<Uuid>) -> Vec<MaintenanceItem> {
        let mut items = self
            .maintenance
            .filter(|m| m.owner_id == owner_id && vehicle_id.map_or(true, |v| m.vehicle_id == v))
            .await;
        items.sort_by(|a, b| a.due_date.cmp(&b.due_date));
        items
    }
}
