//! DTOs de entrada y salida de la API

pub mod account_dto;
pub mod admin_dto;
pub mod auth_dto;
pub mod chat_dto;
pub mod checkout_dto;
pub mod common_dto;
pub mod garage_dto;
pub mod inspection_dto;
pub mod service_request_dto;
pub mod vehicle_dto;
