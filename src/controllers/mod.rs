//! Controllers: orquestan repositorios y servicios para cada área de la API

pub mod admin_controller;
pub mod auth_controller;
pub mod chat_controller;
pub mod checkout_controller;
pub mod diagnosis_controller;
pub mod fleet_controller;
pub mod garage_controller;
pub mod history_controller;
pub mod inspection_controller;
pub mod loyalty_controller;
pub mod report_controller;
pub mod service_request_controller;
pub mod vehicle_controller;
pub mod warranty_controller;
