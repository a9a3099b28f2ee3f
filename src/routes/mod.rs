//! Router de la API
//!
//! `/api/auth/{signup,login}` son públicas. El resto de `/api` pasa por
//! `auth_middleware`, que deja la `Session` en las extensiones; cada área
//! añade su guardia de rol.

pub mod account_routes;
pub mod admin_routes;
pub mod auth_routes;
pub mod chat_routes;
pub mod checkout_routes;
pub mod diagnosis_routes;
pub mod garage_directory_routes;
pub mod garage_routes;
pub mod inspection_routes;
pub mod service_request_routes;
pub mod vehicle_routes;

use axum::{
    middleware::{from_fn, from_fn_with_state},
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::auth::{
    admin_only_middleware, auth_middleware, customer_only_middleware, garage_only_middleware,
};
use crate::middleware::cors::cors_for;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .merge(auth_routes::create_session_router())
        .nest(
            "/vehicles",
            vehicle_routes::create_vehicle_router().route_layer(from_fn(customer_only_middleware)),
        )
        .nest("/requests", service_request_routes::create_service_request_router(&state))
        .nest(
            "/checkout",
            checkout_routes::create_checkout_router().route_layer(from_fn(customer_only_middleware)),
        )
        .nest(
            "/account",
            account_routes::create_account_router().route_layer(from_fn(customer_only_middleware)),
        )
        .nest(
            "/diagnostics",
            diagnosis_routes::create_diagnosis_router().route_layer(from_fn(customer_only_middleware)),
        )
        .nest(
            "/inspections",
            inspection_routes::create_inspection_router().route_layer(from_fn(customer_only_middleware)),
        )
        .nest(
            "/chat",
            chat_routes::create_chat_router().route_layer(from_fn(customer_only_middleware)),
        )
        .nest(
            "/garages",
            garage_directory_routes::create_garage_directory_router()
                .route_layer(from_fn(customer_only_middleware)),
        )
        .nest(
            "/garage",
            garage_routes::create_garage_router().route_layer(from_fn(garage_only_middleware)),
        )
        .nest(
            "/admin",
            admin_routes::create_admin_router(&state).route_layer(from_fn(admin_only_middleware)),
        )
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/health", get(health))
        .nest("/api/auth", auth_routes::create_public_auth_router(&state))
        .nest("/api", protected)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors_for(&state.config)),
        )
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "repyr_backend",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
