use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::garage_controller::GarageController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::garage_dto::{GarageDetails, GarageSummary, NearbyGarageQuery};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Talleres verificados vistos desde la app del cliente
pub fn create_garage_directory_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_garages))
        .route("/:id", get(garage_details))
}

async fn list_garages(
    State(state): State<AppState>,
    Query(query): Query<NearbyGarageQuery>,
) -> Json<ApiResponse<Vec<GarageSummary>>> {
    Json(GarageController::new(&state).list(query).await)
}

async fn garage_details(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<NearbyGarageQuery>,
) -> Result<Json<ApiResponse<GarageDetails>>, AppError> {
    let controller = GarageController::new(&state);
    let response = controller.details(id, query).await?;
    Ok(Json(response))
}
