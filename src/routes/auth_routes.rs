use axum::{
    extract::State,
    middleware::from_fn_with_state,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{AuthResponse, LoginRequest, LogoutResponse, SessionResponse, SignupRequest};
use crate::dto::common_dto::{ApiResponse, ValidatedJson};
use crate::middleware::auth::Session;
use crate::middleware::rate_limit::rate_limit_middleware;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Rutas públicas de alta y login, con rate limiting por IP
pub fn create_public_auth_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route_layer(from_fn_with_state(state.rate_limit.clone(), rate_limit_middleware))
}

/// Rutas que requieren sesión
pub fn create_session_router() -> Router<AppState> {
    Router::new()
        .route("/auth/logout", post(logout))
        .route("/session", get(session))
}

async fn signup(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    let controller = AuthController::new(&state);
    let response = controller.signup(request).await?;
    Ok(Json(response))
}

async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    let controller = AuthController::new(&state);
    let response = controller.login(request).await?;
    Ok(Json(response))
}

async fn logout(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<ApiResponse<LogoutResponse>>, AppError> {
    let controller = AuthController::new(&state);
    let response = controller.logout(&session).await?;
    Ok(Json(response))
}

async fn session(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Json<ApiResponse<SessionResponse>> {
    Json(AuthController::new(&state).session(session))
}
