use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::fleet_controller::FleetController;
use crate::controllers::history_controller::HistoryController;
use crate::controllers::loyalty_controller::LoyaltyController;
use crate::controllers::warranty_controller::WarrantyController;
use crate::dto::account_dto::{
    FileClaimRequest, FleetOverview, HistoryQuery, RedeemRewardRequest, VehicleFilterQuery,
};
use crate::dto::common_dto::{ApiResponse, ValidatedJson};
use crate::middleware::auth::Session;
use crate::models::warranty::WarrantyClaim;
use crate::services::job_history_service::{JobHistory, MaintenancePlan};
use crate::services::loyalty_service::{LoyaltyOverview, Redemption};
use crate::services::warranty_service::{WarrantyOverview, WarrantyView};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Rutas del perfil del cliente: fidelidad, garantías, historial y flota
pub fn create_account_router() -> Router<AppState> {
    Router::new()
        .route("/loyalty", get(loyalty_overview))
        .route("/loyalty/redeem", post(redeem_reward))
        .route("/warranties", get(warranty_overview))
        .route("/warranties/:id", get(get_warranty))
        .route("/warranties/:id/claims", post(file_claim))
        .route("/history", get(job_history))
        .route("/maintenance", get(maintenance_plan))
        .route("/fleet", get(fleet_overview))
}

async fn loyalty_overview(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<ApiResponse<LoyaltyOverview>>, AppError> {
    let controller = LoyaltyController::new(&state);
    Ok(Json(controller.overview(session.customer_id()?).await))
}

async fn redeem_reward(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    ValidatedJson(request): ValidatedJson<RedeemRewardRequest>,
) -> Result<Json<ApiResponse<Redemption>>, AppError> {
    let controller = LoyaltyController::new(&state);
    let response = controller.redeem(session.customer_id()?, request).await?;
    Ok(Json(response))
}

async fn warranty_overview(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<ApiResponse<WarrantyOverview>>, AppError> {
    let controller = WarrantyController::new(&state);
    Ok(Json(controller.overview(session.customer_id()?).await))
}

async fn get_warranty(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<WarrantyView>>, AppError> {
    let controller = WarrantyController::new(&state);
    let response = controller.get(session.customer_id()?, id).await?;
    Ok(Json(response))
}

async fn file_claim(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<FileClaimRequest>,
) -> Result<Json<ApiResponse<WarrantyClaim>>, AppError> {
    let controller = WarrantyController::new(&state);
    let response = controller.file_claim(session.customer_id()?, id, request).await?;
    Ok(Json(response))
}

async fn job_history(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<JobHistory>>, AppError> {
    let controller = HistoryController::new(&state);
    Ok(Json(controller.jobs(session.customer_id()?, query).await))
}

async fn maintenance_plan(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<VehicleFilterQuery>,
) -> Result<Json<ApiResponse<MaintenancePlan>>, AppError> {
    let controller = HistoryController::new(&state);
    Ok(Json(controller.maintenance(session.customer_id()?, query).await))
}

async fn fleet_overview(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<ApiResponse<FleetOverview>>, AppError> {
    let controller = FleetController::new(&state);
    let response = controller.overview(session.customer_id()?).await?;
    Ok(Json(response))
}
