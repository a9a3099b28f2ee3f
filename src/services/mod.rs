//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación: cálculos de
//! precios, fidelidad, garantías, historial, diagnóstico y tareas simuladas.

pub mod attachment_service;
pub mod chat_service;
pub mod diagnostics_service;
pub mod garage_profile_service;
pub mod inspection_service;
pub mod job_history_service;
pub mod jwt_service;
pub mod loyalty_service;
pub mod pricing_service;
pub mod task_registry;
pub mod warranty_service;
