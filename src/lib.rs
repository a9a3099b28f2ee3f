//! Repyr: backend de reservas de reparación de vehículos
//!
//! Clientes piden servicios y reciben cotizaciones de talleres, reservan en
//! el checkout y siguen garantías, historial y puntos de fidelidad. Los
//! talleres cotizan y cierran trabajos; los admins verifican talleres.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::Router;

use config::environment::EnvironmentConfig;
use database::Store;
use state::AppState;

/// Router completo sobre un store dado
pub fn build_app(config: EnvironmentConfig, store: Store) -> Router {
    routes::create_router(AppState::new(config, store))
}
