//! Repositorios
//!
//! Acceso a las tablas en memoria del `Store`.

pub mod booking_repository;
pub mod chat_repository;
pub mod diagnosis_repository;
pub mod fleet_repository;
pub mod garage_repository;
pub mod history_repository;
pub mod inspection_repository;
pub mod loyalty_repository;
pub mod review_repository;
pub mod service_request_repository;
pub mod user_repository;
pub mod vehicle_repository;
pub mod warranty_repository;
