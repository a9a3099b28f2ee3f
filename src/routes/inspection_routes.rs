use axum::{extract::State, routing::get, Extension, Json, Router};

use crate::controllers::inspection_controller::InspectionController;
use crate::dto::common_dto::{ApiResponse, ValidatedJson};
use crate::dto::inspection_dto::{BookInspectionRequest, InspectionOptionsResponse};
use crate::middleware::auth::Session;
use crate::models::inspection::{InspectionBooking, InspectionReport};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_inspection_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_bookings).post(book_inspection))
        .route("/options", get(options))
        .route("/reports", get(reports))
}

async fn options(State(state): State<AppState>) -> Json<ApiResponse<InspectionOptionsResponse>> {
    Json(InspectionController::new(&state).options())
}

async fn book_inspection(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    ValidatedJson(request): ValidatedJson<BookInspectionRequest>,
) -> Result<Json<ApiResponse<InspectionBooking>>, AppError> {
    let controller = InspectionController::new(&state);
    let response = controller.book(session.customer_id()?, request).await?;
    Ok(Json(response))
}

async fn list_bookings(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<ApiResponse<Vec<InspectionBooking>>>, AppError> {
    let controller = InspectionController::new(&state);
    Ok(Json(controller.bookings(session.customer_id()?).await))
}

async fn reports(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<ApiResponse<Vec<InspectionReport>>>, AppError> {
    let controller = InspectionController::new(&state);
    Ok(Json(controller.reports(session.customer_id()?).await))
}
