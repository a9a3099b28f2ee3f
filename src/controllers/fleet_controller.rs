use uuid::Uuid;

use crate::dto::account_dto::FleetOverview;
use crate::dto::common_dto::ApiResponse;
use crate::models::job::Priority;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub struct FleetController {
    state: AppState,
}

impl FleetController {
    pub fn new(state: &AppState) -> Self {
        Self {
            state: state.clone(),
        }
    }

    /// Flota administrada por el usuario
    pub async fn overview(&self, admin_id: Uuid) -> AppResult<ApiResponse<FleetOverview>> {
        let fleet = self
            .state
            .store
            .fleets
            .find_by_admin(admin_id)
            .await
            .ok_or_else(|| AppError::NotFound("No fleet is registered for this account".to_string()))?;

        let mut high_priority_alerts: Vec<_> = fleet
            .alerts
            .iter()
            .filter(|a| a.priority == Priority::High)
            .cloned()
            .collect();
        high_priority_alerts.sort_by_key(|a| a.due_date);

        Ok(ApiResponse::success(FleetOverview {
            vehicle_count: fleet.vehicles.len(),
            driver_count: fleet.drivers.len(),
            unassigned_vehicles: fleet
                .vehicles
                .iter()
                .filter(|v| fleet.driver_for(v.id).is_none())
                .count(),
            high_priority_alerts,
            fleet,
        }))
    }
}
