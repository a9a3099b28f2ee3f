use axum::{
    extract::{Query, State},
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::checkout_controller::CheckoutController;
use crate::dto::checkout_dto::{
    ApplyFinancingRequest, ApplyFinancingResponse, BookingRequest, CheckoutSummaryRequest,
    CheckoutSummaryResponse, FinancingOptionsResponse, FinancingQuery,
};
use crate::dto::common_dto::{ApiResponse, ValidatedJson};
use crate::middleware::auth::Session;
use crate::models::checkout::Booking;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_checkout_router() -> Router<AppState> {
    Router::new()
        .route("/summary", post(summary))
        .route("/book", post(book))
        .route("/bookings", get(bookings))
        .route("/financing", get(financing_options))
        .route("/financing/apply", post(apply_financing))
}

async fn summary(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    ValidatedJson(request): ValidatedJson<CheckoutSummaryRequest>,
) -> Result<Json<ApiResponse<CheckoutSummaryResponse>>, AppError> {
    let controller = CheckoutController::new(&state);
    let response = controller.summary(session.customer_id()?, request).await?;
    Ok(Json(response))
}

async fn book(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    ValidatedJson(request): ValidatedJson<BookingRequest>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let controller = CheckoutController::new(&state);
    let response = controller.book(session.customer_id()?, request).await?;
    Ok(Json(response))
}

async fn bookings(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<ApiResponse<Vec<Booking>>>, AppError> {
    let controller = CheckoutController::new(&state);
    Ok(Json(controller.bookings(session.customer_id()?).await))
}

async fn financing_options(
    State(state): State<AppState>,
    Query(query): Query<FinancingQuery>,
) -> Result<Json<ApiResponse<FinancingOptionsResponse>>, AppError> {
    let controller = CheckoutController::new(&state);
    let response = controller.financing_options(query.amount)?;
    Ok(Json(response))
}

async fn apply_financing(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    ValidatedJson(request): ValidatedJson<ApplyFinancingRequest>,
) -> Result<Json<ApiResponse<ApplyFinancingResponse>>, AppError> {
    let controller = CheckoutController::new(&state);
    let response = controller.apply_financing(session.customer_id()?, request)?;
    Ok(Json(response))
}
