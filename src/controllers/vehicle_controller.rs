use uuid::Uuid;

use crate::dto::common_dto::ApiResponse;
use crate::dto::vehicle_dto::CreateVehicleRequest;
use crate::models::vehicle::Vehicle;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: state.store.vehicles.clone(),
        }
    }

    pub async fn create(
        &self,
        owner_id: Uuid,
        request: CreateVehicleRequest,
    ) -> AppResult<ApiResponse<Vehicle>> {
        let vehicle = self
            .repository
            .create(
                owner_id,
                request.make.trim().to_string(),
                request.model.trim().to_string(),
                request.year,
                request.plate.trim().to_uppercase(),
            )
            .await?;

        tracing::info!(%owner_id, vehicle_id = %vehicle.id, "🚗 Vehicle added");
        Ok(ApiResponse::success_with_message(
            vehicle,
            "Vehicle added successfully".to_string(),
        ))
    }

    pub async fn list(&self, owner_id: Uuid) -> ApiResponse<Vec<Vehicle>> {
        ApiResponse::success(self.repository.find_by_owner(owner_id).await)
    }

    pub async fn get(&self, owner_id: Uuid, id: Uuid) -> AppResult<ApiResponse<Vehicle>> {
        Ok(ApiResponse::success(self.repository.find_owned(owner_id, id).await?))
    }

    pub async fn set_primary(&self, owner_id: Uuid, id: Uuid) -> AppResult<ApiResponse<Vehicle>> {
        let vehicle = self.repository.set_primary(owner_id, id).await?;
        Ok(ApiResponse::success_with_message(
            vehicle,
            "Primary vehicle updated".to_string(),
        ))
    }

    pub async fn delete(&self, owner_id: Uuid, id: Uuid) -> AppResult<ApiResponse<Vehicle>> {
        let removed = self.repository.delete(owner_id, id).await?;
        tracing::info!(%owner_id, vehicle_id = %id, "🗑️ Vehicle removed");
        Ok(ApiResponse::success_with_message(
            removed,
            "Vehicle removed".to_string(),
        ))
    }
}
