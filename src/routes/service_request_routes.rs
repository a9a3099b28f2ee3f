use axum::{
    extract::{DefaultBodyLimit, Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::service_request_controller::ServiceRequestController;
use crate::dto::common_dto::{ApiResponse, ValidatedJson};
use crate::dto::service_request_dto::{
    AcceptQuoteRequest, CompleteJobRequest, CreateServiceRequestRequest, ListRequestsQuery,
    ServiceRequestSummary, SubmitQuoteRequest, UpdateStatusRequest,
};
use crate::middleware::auth::Session;
use crate::models::completion::JobCloseOut;
use crate::models::quote::Quote;
use crate::models::service_request::ServiceRequest;
use crate::services::attachment_service::attachment_body_limit;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// El cierre de trabajo lleva adjuntos en base64, así que su límite de
/// cuerpo sale de `max_attachment_bytes` y no del valor por defecto de axum.
pub fn create_service_request_router(state: &AppState) -> Router<AppState> {
    let completion_limit = attachment_body_limit(state.config.max_attachment_bytes);

    Router::new()
        .route("/", post(create_request).get(list_requests))
        .route("/:id", get(get_request))
        .route("/:id/quotes", get(list_quotes).post(submit_quote))
        .route("/:id/accept", post(accept_quote))
        .route("/:id/status", post(update_status))
        .route(
            "/:id/complete",
            post(complete_job).layer(DefaultBodyLimit::max(completion_limit)),
        )
}

async fn create_request(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    ValidatedJson(request): ValidatedJson<CreateServiceRequestRequest>,
) -> Result<Json<ApiResponse<ServiceRequest>>, AppError> {
    let controller = ServiceRequestController::new(&state);
    let response = controller.create(&session, request).await?;
    Ok(Json(response))
}

async fn list_requests(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<ListRequestsQuery>,
) -> Result<Json<ApiResponse<Vec<ServiceRequestSummary>>>, AppError> {
    let controller = ServiceRequestController::new(&state);
    let response = controller.list(&session, query).await?;
    Ok(Json(response))
}

async fn get_request(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ServiceRequest>>, AppError> {
    let controller = ServiceRequestController::new(&state);
    let response = controller.get(&session, id).await?;
    Ok(Json(response))
}

async fn list_quotes(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Quote>>>, AppError> {
    let controller = ServiceRequestController::new(&state);
    let response = controller.quotes(&session, id).await?;
    Ok(Json(response))
}

async fn submit_quote(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<SubmitQuoteRequest>,
) -> Result<Json<ApiResponse<Quote>>, AppError> {
    let controller = ServiceRequestController::new(&state);
    let response = controller.submit_quote(&session, id, request).await?;
    Ok(Json(response))
}

async fn accept_quote(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<AcceptQuoteRequest>,
) -> Result<Json<ApiResponse<Quote>>, AppError> {
    let controller = ServiceRequestController::new(&state);
    let response = controller.accept_quote(&session, id, request.quote_id).await?;
    Ok(Json(response))
}

async fn update_status(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<ServiceRequest>>, AppError> {
    let controller = ServiceRequestController::new(&state);
    let response = controller.update_status(&session, id, request.status).await?;
    Ok(Json(response))
}

async fn complete_job(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<CompleteJobRequest>,
) -> Result<Json<ApiResponse<JobCloseOut>>, AppError> {
    let controller = ServiceRequestController::new(&state);
    let response = controller.complete_job(&session, id, request).await?;
    Ok(Json(response))
}
