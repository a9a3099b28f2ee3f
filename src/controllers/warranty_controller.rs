use uuid::Uuid;

use crate::dto::account_dto::FileClaimRequest;
use crate::dto::common_dto::ApiResponse;
use crate::models::warranty::WarrantyClaim;
use crate::services::warranty_service::{WarrantyOverview, WarrantyService, WarrantyView};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct WarrantyController {
    service: WarrantyService,
    state: AppState,
}

impl WarrantyController {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: WarrantyService::new(state.store.warranties.clone()),
            state: state.clone(),
        }
    }

    pub async fn overview(&self, customer_id: Uuid) -> ApiResponse<WarrantyOverview> {
        ApiResponse::success(self.service.overview(customer_id, self.state.today()).await)
    }

    pub async fn get(&self, customer_id: Uuid, id: Uuid) -> AppResult<ApiResponse<WarrantyView>> {
        let view = self.service.get(customer_id, id, self.state.today()).await?;
        Ok(ApiResponse::success(view))
    }

    pub async fn file_claim(
        &self,
        customer_id: Uuid,
        id: Uuid,
        request: FileClaimRequest,
    ) -> AppResult<ApiResponse<WarrantyClaim>> {
        let claim = self
            .service
            .file_claim(
                customer_id,
                id,
                request.description.trim().to_string(),
                request.amount,
                self.state.today(),
            )
            .await?;
        Ok(ApiResponse::success_with_message(
            claim,
            "Claim submitted".to_string(),
        ))
    }
}
