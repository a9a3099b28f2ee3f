use axum::{
    extract::{DefaultBodyLimit, Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::admin_controller::AdminController;
use crate::controllers::report_controller::ReportController;
use crate::dto::admin_dto::{AdminDashboard, GarageSearchQuery, UserSearchQuery};
use crate::dto::common_dto::{ApiResponse, ValidatedJson};
use crate::dto::inspection_dto::{
    CustomerLookup, CustomerLookupQuery, ReportSearchQuery, UpdateReportStatusRequest,
    UploadReportRequest,
};
use crate::middleware::auth::Session;
use crate::models::garage::Garage;
use crate::models::inspection::InspectionReport;
use crate::models::user::AuthUser;
use crate::services::attachment_service::attachment_body_limit;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// La subida de informes lleva fotos y documento en base64; su límite de
/// cuerpo sale de `max_attachment_bytes`.
pub fn create_admin_router(state: &AppState) -> Router<AppState> {
    let upload_limit = attachment_body_limit(state.config.max_attachment_bytes);

    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/users", get(search_users))
        .route("/garages", get(search_garages))
        .route("/garages/:id/approve", post(approve_garage))
        .route("/garages/:id/reject", post(reject_garage))
        .route(
            "/reports",
            get(list_reports).post(upload_report).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/reports/:id/status", post(update_report_status))
        .route("/customers/lookup", get(lookup_customer))
}

async fn dashboard(State(state): State<AppState>) -> Json<ApiResponse<AdminDashboard>> {
    Json(AdminController::new(&state).dashboard().await)
}

async fn search_users(
    State(state): State<AppState>,
    Query(query): Query<UserSearchQuery>,
) -> Json<ApiResponse<Vec<AuthUser>>> {
    Json(AdminController::new(&state).users(query).await)
}

async fn search_garages(
    State(state): State<AppState>,
    Query(query): Query<GarageSearchQuery>,
) -> Json<ApiResponse<Vec<Garage>>> {
    Json(AdminController::new(&state).garages(query).await)
}

async fn approve_garage(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Garage>>, AppError> {
    let controller = AdminController::new(&state);
    let response = controller.approve_garage(session.admin_id()?, id).await?;
    Ok(Json(response))
}

async fn reject_garage(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Garage>>, AppError> {
    let controller = AdminController::new(&state);
    let response = controller.reject_garage(session.admin_id()?, id).await?;
    Ok(Json(response))
}

async fn list_reports(
    State(state): State<AppState>,
    Query(query): Query<ReportSearchQuery>,
) -> Json<ApiResponse<Vec<InspectionReport>>> {
    Json(ReportController::new(&state).list(query).await)
}

async fn upload_report(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    ValidatedJson(request): ValidatedJson<UploadReportRequest>,
) -> Result<Json<ApiResponse<InspectionReport>>, AppError> {
    let controller = ReportController::new(&state);
    let response = controller.upload(session.admin_id()?, request).await?;
    Ok(Json(response))
}

async fn update_report_status(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateReportStatusRequest>,
) -> Result<Json<ApiResponse<InspectionReport>>, AppError> {
    let controller = ReportController::new(&state);
    let response = controller.update_status(session.admin_id()?, id, request).await?;
    Ok(Json(response))
}

async fn lookup_customer(
    State(state): State<AppState>,
    Query(query): Query<CustomerLookupQuery>,
) -> Result<Json<ApiResponse<CustomerLookup>>, AppError> {
    let controller = ReportController::new(&state);
    let response = controller.lookup_customer(&query.phone).await?;
    Ok(Json(response))
}
