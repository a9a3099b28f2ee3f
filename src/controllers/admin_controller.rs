use std::collections::BTreeMap;
use uuid::Uuid;

use crate::dto::admin_dto::{AdminDashboard, GarageSearchQuery, UserSearchQuery};
use crate::dto::common_dto::ApiResponse;
use crate::models::garage::Garage;
use crate::models::service_request::RequestStatus;
use crate::models::user::{AuthUser, UserRole};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct AdminController {
    state: AppState,
}

impl AdminController {
    pub fn new(state: &AppState) -> Self {
        Self {
            state: state.clone(),
        }
    }

    pub async fn users(&self, query: UserSearchQuery) -> ApiResponse<Vec<AuthUser>> {
        let users = self
            .state
            .store
            .users
            .search(query.q.as_deref(), query.role)
            .await;
        ApiResponse::success(users)
    }

    pub async fn garages(&self, query: GarageSearchQuery) -> ApiResponse<Vec<Garage>> {
        let garages = self
            .state
            .store
            .garages
            .search(query.q.as_deref(), query.status)
            .await;
        ApiResponse::success(garages)
    }

    pub async fn approve_garage(&self, admin_id: Uuid, id: Uuid) -> AppResult<ApiResponse<Garage>> {
        let garage = self.state.store.garages.approve(id).await?;
        tracing::info!(%admin_id, garage_id = %id, name = %garage.name, "✅ Garage approved");
        Ok(ApiResponse::success_with_message(
            garage,
            "Garage approved".to_string(),
        ))
    }

    /// Rechaza un taller pendiente y elimina la cuenta de su propietario
    pub async fn reject_garage(&self, admin_id: Uuid, id: Uuid) -> AppResult<ApiResponse<Garage>> {
        let garage = self.state.store.garages.reject(id).await?;
        self.state.store.users.remove(garage.owner_id).await;
        tracing::info!(%admin_id, garage_id = %id, name = %garage.name, "🚫 Garage rejected");
        Ok(ApiResponse::success_with_message(
            garage,
            "Garage rejected".to_string(),
        ))
    }

    pub async fn dashboard(&self) -> ApiResponse<AdminDashboard> {
        let users = self.state.store.users.all().await;
        let garages = self.state.store.garages.all().await;
        let requests = self.state.store.requests.all().await;

        let mut users_by_role: BTreeMap<&'static str, usize> = [UserRole::Customer, UserRole::Garage, UserRole::Admin]
            .iter()
            .map(|r| (r.as_str(), 0))
            .collect();
        for user in &users {
            *users_by_role.entry(user.role.as_str()).or_default() += 1;
        }

        let mut requests_by_status: BTreeMap<&'static str, usize> =
            RequestStatus::ALL.iter().map(|s| (s.as_str(), 0)).collect();
        for request in &requests {
            *requests_by_status.entry(request.status.as_str()).or_default() += 1;
        }

        let garages_verified = garages.iter().filter(|g| g.verified).count();
        ApiResponse::success(AdminDashboard {
            users_by_role,
            garages_verified,
            garages_pending: garages.len() - garages_verified,
            requests_by_status,
            warranties_issued: self.state.store.warranties.count().await,
            inspection_reports: self.state.store.inspections.count_reports().await,
        })
    }
}
