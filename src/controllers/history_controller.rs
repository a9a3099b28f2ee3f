use std::collections::BTreeMap;
use uuid::Uuid;

use crate::dto::account_dto::{HistoryQuery, VehicleFilterQuery};
use crate::dto::admin_dto::GarageDashboard;
use crate::dto::common_dto::ApiResponse;
use crate::models::quote::QuoteStatus;
use crate::models::service_request::RequestStatus;
use crate::services::job_history_service::{
    job_history, maintenance_plan, merge_history, JobHistory, MaintenancePlan,
};
use crate::services::pricing_service::total;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppResult};

pub struct HistoryController {
    state: AppState,
}

impl HistoryController {
    pub fn new(state: &AppState) -> Self {
        Self {
            state: state.clone(),
        }
    }

    /// Trabajos importados más los cerrados en la plataforma
    pub async fn jobs(&self, customer_id: Uuid, query: HistoryQuery) -> ApiResponse<JobHistory> {
        let imported = self.state.store.history.jobs_for(customer_id).await;
        let requests = self.state.store.requests.list(Some(customer_id), None).await;
        let jobs = merge_history(imported, &requests, customer_id);

        ApiResponse::success(job_history(jobs, query.period, query.sort, self.state.today()))
    }

    pub async fn maintenance(
        &self,
        owner_id: Uuid,
        query: VehicleFilterQuery,
    ) -> ApiResponse<MaintenancePlan> {
        let items = self
            .state
            .store
            .history
            .maintenance_for(owner_id, query.vehicle_id)
            .await;
        ApiResponse::success(maintenance_plan(items))
    }

    pub async fn garage_dashboard(&self, garage_id: Uuid) -> AppResult<ApiResponse<GarageDashboard>> {
        let garage = self
            .state
            .store
            .garages
            .find_by_id(garage_id)
            .await
            .ok_or_else(|| not_found_error("Garage", &garage_id.to_string()))?;
        let requests = self.state.store.requests.all().await;

        let mut requests_by_status: BTreeMap<&'static str, usize> =
            RequestStatus::ALL.iter().map(|s| (s.as_str(), 0)).collect();
        let mut open_requests = 0;
        let mut quotes_submitted = 0;
        let mut active_jobs = 0;
        let mut completed_jobs = 0;

        for request in &requests {
            *requests_by_status.entry(request.status.as_str()).or_default() += 1;

            let mut own_quotes = request.quotes.iter().filter(|q| q.garage_id == garage_id);
            let quoted = own_quotes.clone().count();
            quotes_submitted += quoted;
            if request.status.accepts_quotes() && quoted == 0 {
                open_requests += 1;
            }

            let accepted_here = own_quotes.any(|q| q.status == QuoteStatus::Accepted);
            match request.status {
                RequestStatus::Accepted | RequestStatus::InProgress if accepted_here => active_jobs += 1,
                RequestStatus::Completed if accepted_here => completed_jobs += 1,
                _ => {}
            }
        }

        let revenue = total(
            requests
                .iter()
                .filter_map(|r| r.completion.as_ref())
                .filter(|c| c.garage_id == garage_id)
                .map(|c| c.total_cost),
        );

        Ok(ApiResponse::success(GarageDashboard {
            garage,
            requests_by_status,
            open_requests,
            quotes_submitted,
            active_jobs,
            completed_jobs,
            revenue,
        }))
    }
}
