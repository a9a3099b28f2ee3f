use axum::{extract::State, routing::get, Extension, Json, Router};

use crate::controllers::garage_controller::GarageController;
use crate::controllers::history_controller::HistoryController;
use crate::dto::admin_dto::GarageDashboard;
use crate::dto::common_dto::{ApiResponse, ValidatedJson};
use crate::dto::garage_dto::{GarageProfile, UpdateGarageProfileRequest};
use crate::middleware::auth::Session;
use crate::models::garage::Garage;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_garage_router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/profile", get(profile).put(update_profile))
}

async fn dashboard(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<ApiResponse<GarageDashboard>>, AppError> {
    let (_, garage_id) = session.garage()?;
    let controller = HistoryController::new(&state);
    let response = controller.garage_dashboard(garage_id).await?;
    Ok(Json(response))
}

async fn profile(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<ApiResponse<GarageProfile>>, AppError> {
    let (_, garage_id) = session.garage()?;
    let response = GarageController::new(&state).profile(garage_id).await?;
    Ok(Json(response))
}

async fn update_profile(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    ValidatedJson(request): ValidatedJson<UpdateGarageProfileRequest>,
) -> Result<Json<ApiResponse<Garage>>, AppError> {
    let (_, garage_id) = session.garage()?;
    let controller = GarageController::new(&state);
    let response = controller.update_profile(garage_id, request).await?;
    Ok(Json(response))
}
