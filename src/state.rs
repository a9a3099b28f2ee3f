//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::database::Store;
use crate::middleware::rate_limit::RateLimitState;
use crate::services::chat_service::ChatService;
use crate::services::diagnostics_service::{DiagnosticsService, RuleBasedEngine};
use crate::services::jwt_service::JwtService;
use crate::services::task_registry::PendingTasks;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EnvironmentConfig>,
    pub store: Store,
    pub jwt: Arc<JwtService>,
    pub rate_limit: RateLimitState,
    pub tasks: PendingTasks,
    pub diagnostics: DiagnosticsService,
    pub chat: ChatService,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, store: Store) -> Self {
        let tasks = PendingTasks::new();
        let diagnostics = DiagnosticsService::new(
            store.diagnosis.clone(),
            Arc::new(RuleBasedEngine),
            tasks.clone(),
            config.simulated_latency(),
        );
        let chat = ChatService::new(store.chat.clone(), tasks.clone(), config.simulated_latency());

        Self {
            jwt: Arc::new(JwtService::new(&config)),
            rate_limit: RateLimitState::new(&config),
            config: Arc::new(config),
            store,
            tasks,
            diagnostics,
            chat,
        }
    }

    /// Fecha de referencia para estados derivados (garantías, historial)
    pub fn today(&self) -> chrono::NaiveDate {
        self.config
            .reference_date
            .unwrap_or_else(|| chrono::Utc::now().date_naive())
    }
}
