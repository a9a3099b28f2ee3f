use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::diagnosis_controller::DiagnosisController;
use crate::dto::account_dto::{AnalyzeRequest, BookDiagnosisRequest, VehicleFilterQuery};
use crate::dto::common_dto::{ApiResponse, ValidatedJson};
use crate::middleware::auth::Session;
use crate::models::diagnosis::{DiagnosisBooking, DiagnosisOption, DiagnosisReport, DiagnosticJob};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_diagnosis_router() -> Router<AppState> {
    Router::new()
        .route("/reports", get(reports))
        .route("/options", get(options))
        .route("/book", post(book))
        .route("/bookings", get(bookings))
        .route("/analyze", post(analyze))
        .route("/jobs", get(jobs))
        .route("/:id", get(get_job).delete(cancel_job))
}

async fn reports(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<VehicleFilterQuery>,
) -> Result<Json<ApiResponse<Vec<DiagnosisReport>>>, AppError> {
    let controller = DiagnosisController::new(&state);
    Ok(Json(controller.reports(session.customer_id()?, query).await))
}

async fn options(State(state): State<AppState>) -> Json<ApiResponse<Vec<DiagnosisOption>>> {
    Json(DiagnosisController::new(&state).options())
}

async fn book(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    ValidatedJson(request): ValidatedJson<BookDiagnosisRequest>,
) -> Result<Json<ApiResponse<DiagnosisBooking>>, AppError> {
    let controller = DiagnosisController::new(&state);
    let response = controller.book(session.customer_id()?, request).await?;
    Ok(Json(response))
}

async fn bookings(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<ApiResponse<Vec<DiagnosisBooking>>>, AppError> {
    let controller = DiagnosisController::new(&state);
    Ok(Json(controller.bookings(session.customer_id()?).await))
}

async fn analyze(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    ValidatedJson(request): ValidatedJson<AnalyzeRequest>,
) -> Result<Json<ApiResponse<DiagnosticJob>>, AppError> {
    let controller = DiagnosisController::new(&state);
    let response = controller.analyze(session.customer_id()?, request).await?;
    Ok(Json(response))
}

async fn jobs(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<ApiResponse<Vec<DiagnosticJob>>>, AppError> {
    let controller = DiagnosisController::new(&state);
    Ok(Json(controller.jobs(session.customer_id()?).await))
}

async fn get_job(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DiagnosticJob>>, AppError> {
    let controller = DiagnosisController::new(&state);
    let response = controller.get(session.customer_id()?, id).await?;
    Ok(Json(response))
}

async fn cancel_job(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DiagnosticJob>>, AppError> {
    let controller = DiagnosisController::new(&state);
    let response = controller.cancel(session.customer_id()?, id).await?;
    Ok(Json(response))
}
